use leptos::prelude::*;

use super::layout::{PageHero, SiteLayout, INSTAGRAM_URL, TELEGRAM_URL};
use crate::util::set_document_title;

#[component]
pub fn ContactPage() -> impl IntoView {
    set_document_title("Contact");

    view! {
        <SiteLayout>
            <PageHero
                title="Connect With Us"
                subtitle="Have questions, suggestions, or just want to say hello? We'd love to hear from you!"
            />
            <section class="py-16 bg-light dark:bg-dark">
                <div class="container mx-auto px-4">
                    <div class="max-w-4xl mx-auto">
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
                            <div class="bg-white dark:bg-dark/80 rounded-xl p-8 shadow-lg">
                                <div class="text-4xl mb-4">"📱"</div>
                                <h2 class="text-2xl font-serif font-bold mb-4">"Social Media"</h2>
                                <p class="mb-6">
                                    "Follow us on social media to stay updated with the latest quirky content and community events."
                                </p>
                                <div class="space-y-4">
                                    <a href=INSTAGRAM_URL target="_blank" rel="noopener noreferrer"
                                        class="flex items-center text-primary hover:text-creative transition-colors">
                                        "@quirki_topia"
                                    </a>
                                    <a href=TELEGRAM_URL target="_blank" rel="noopener noreferrer"
                                        class="flex items-center text-primary hover:text-creative transition-colors">
                                        "t.me/quirkitopia"
                                    </a>
                                </div>
                            </div>

                            <div class="bg-white dark:bg-dark/80 rounded-xl p-8 shadow-lg">
                                <div class="text-4xl mb-4">"💡"</div>
                                <h2 class="text-2xl font-serif font-bold mb-4">"Share Your Ideas"</h2>
                                <p class="mb-6">
                                    "Have a quirky idea or suggestion for our community? We'd love to hear it!"
                                </p>
                                <a href="/idea-form" class="block w-full text-center rounded-md bg-accent text-dark font-bold py-2 hover:bg-accent/80">
                                    "Submit an Idea"
                                </a>
                            </div>
                        </div>

                        <div class="mt-16 text-center">
                            <h2 class="text-2xl font-serif font-bold mb-4">"Join Our Community"</h2>
                            <p class="mb-8 max-w-2xl mx-auto">
                                "Quirkitopia Space is more than just a website; it's a community of creative minds. Join us and be part of something special!"
                            </p>
                            <div class="bg-gradient-to-br from-creative to-creative/60 rounded-xl p-8 shadow-lg inline-block">
                                <p class="text-xl font-serif font-bold mb-2">"Our Community Values"</p>
                                <p class="italic">"\"Creativity, Knowledge, Community, and Wonder\""</p>
                            </div>
                        </div>
                    </div>
                </div>
            </section>
        </SiteLayout>
    }
}
