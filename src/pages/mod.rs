mod about;
mod admin;
mod cards;
mod categories;
mod contact;
mod fields;
mod home;
mod idea_form;
mod layout;
mod not_found;

pub use about::AboutPage;
pub use admin::{AdminDashboardPage, AdminLoginPage};
pub use categories::CategoriesPage;
pub use contact::ContactPage;
pub use home::HomePage;
pub use idea_form::IdeaFormPage;
pub use not_found::NotFoundPage;
