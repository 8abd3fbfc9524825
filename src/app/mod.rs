use crate::components::ui::Toaster;
use crate::config::AppConfig;
use crate::pages::{
    AboutPage, AdminDashboardPage, AdminLoginPage, CategoriesPage, ContactPage, HomePage,
    IdeaFormPage, NotFoundPage,
};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let app_state = AppState::new(config);
    app_state.start_live_sync();
    let notifier = app_state.notifier;
    provide_context(AppContext(app_state));

    view! {
        <Router>
            <Routes fallback=NotFoundPage>
                <Route path=path!("") view=HomePage />
                <Route path=path!("about") view=AboutPage />
                <Route path=path!("categories") view=CategoriesPage />
                <Route path=path!("contact") view=ContactPage />
                <Route path=path!("idea-form") view=IdeaFormPage />
                <Route path=path!("admin") view=|| view! { <Redirect path="/admin/login" /> } />
                <Route path=path!("admin/login") view=AdminLoginPage />
                <Route path=path!("admin/dashboard") view=AdminDashboardPage />
            </Routes>
        </Router>
        <Toaster notifier=notifier />
    }
}
