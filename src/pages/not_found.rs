use leptos::prelude::*;

use super::layout::SiteLayout;
use crate::util::set_document_title;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    set_document_title("Page Not Found");

    view! {
        <SiteLayout>
            <div class="min-h-[70vh] flex items-center justify-center bg-light dark:bg-dark">
                <div class="container mx-auto px-4 text-center">
                    <div class="text-9xl mb-6 animate-bounce">"🧩"</div>
                    <h1 class="text-4xl md:text-5xl font-serif font-bold mb-6">"Oops! Page Not Found"</h1>
                    <p class="text-xl mb-8 max-w-2xl mx-auto">
                        "It seems like you've ventured into an unexplored corner of Quirkitopia. Let's get you back on track!"
                    </p>
                    <a href="/" class="inline-block rounded-xl bg-accent text-dark font-bold px-8 py-4 hover:bg-accent/80">
                        "Return to Homepage"
                    </a>
                </div>
            </div>
        </SiteLayout>
    }
}
