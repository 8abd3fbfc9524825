use std::sync::atomic::{AtomicUsize, Ordering};

const PREFIX: &str = "quirk"; // Must NOT contain "/" or "-"

static COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Unique DOM id for pairing a `<Label>` with its control, e.g. `name_quirk_7`.
pub fn use_field_id(field: &str) -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{field}_{PREFIX}_{n}")
}
