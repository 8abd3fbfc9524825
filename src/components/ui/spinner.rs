use icons::LoaderCircle;
use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Spinner(#[prop(into, optional)] class: String) -> impl IntoView {
    let merged_class = tw_merge!("size-4 animate-spin", class);

    view! { <LoaderCircle class=merged_class attr:role="status" attr:aria-label="Loading" /> }
}

/// Centered spinner shown while a live list waits for its first snapshot.
#[component]
pub fn LoadingBlock() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center h-64">
            <Spinner class="size-8 text-primary" />
        </div>
    }
}
