use icons::X;
use leptos::prelude::*;
use tw_merge::tw_merge;

use crate::notify::{Notice, NoticeKind, Notifier};

/// Fixed stack of transient notices, newest at the bottom.
#[component]
pub fn Toaster(notifier: Notifier) -> impl IntoView {
    view! {
        <div class="fixed bottom-4 right-4 z-50 flex flex-col gap-2 w-[360px] max-w-[calc(100vw-2rem)]" aria-live="polite">
            <For
                each=move || notifier.notices()
                key=|n: &Notice| n.id
                children=move |n: Notice| {
                    let id = n.id;
                    let tone = match n.kind {
                        NoticeKind::Success => "bg-background text-foreground",
                        NoticeKind::Error => "bg-destructive text-white border-destructive",
                    };
                    let class = tw_merge!("relative rounded-lg border p-4 pr-8 shadow-lg text-sm", tone);
                    view! {
                        <div class=class role="status">
                            <p class="font-semibold">{n.title}</p>
                            {n.description.map(|d| view! { <p class="mt-1 opacity-90">{d}</p> })}
                            <button
                                class="absolute right-2 top-2 opacity-70 hover:opacity-100"
                                aria-label="Dismiss"
                                on:click=move |_| notifier.dismiss(id)
                            >
                                <X class="size-4" />
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
