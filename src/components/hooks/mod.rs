mod use_field_id;
mod use_live_collection;

pub use use_field_id::use_field_id;
pub use use_live_collection::use_live_collection;
