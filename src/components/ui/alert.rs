use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-lg border px-4 py-3 text-sm"}
    clx! {AlertDescription, p, "text-sm [&_p]:leading-relaxed"}
}

pub use components::*;

/// Inline error box for a whole form (not tied to one field).
#[component]
pub fn FormAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|m| {
            view! {
                <Alert class="border-destructive/30 bg-destructive/5" attr:role="alert">
                    <AlertDescription class="text-destructive">{m}</AlertDescription>
                </Alert>
            }
        })
    }
}
