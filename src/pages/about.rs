use leptos::prelude::*;

use super::layout::{PageHero, SectionWrapper, SiteLayout};
use crate::util::set_document_title;

const VALUES: [(&str, &str, &str); 4] = [
    (
        "🌈",
        "Creativity",
        "We value thinking outside the box and approaching problems from unique angles.",
    ),
    (
        "🧠",
        "Knowledge",
        "We believe in continuous learning across various disciplines.",
    ),
    (
        "🤝",
        "Community",
        "We grow together by sharing ideas and supporting each other.",
    ),
    (
        "💫",
        "Wonder",
        "We maintain a sense of curiosity and awe about the world around us.",
    ),
];

#[component]
pub fn AboutPage() -> impl IntoView {
    set_document_title("About Us");

    view! {
        <SiteLayout>
            <PageHero title="What is Quirkitopia? 🎩💡" />
            <SectionWrapper title="Our Story" bg_class="bg-light dark:bg-dark">
                <div class="max-w-3xl mx-auto">
                    <p class="text-lg mb-6">
                        "Quirkitopia is a team made by NHSAST students. It's a creative space where being different means being special. We promote content in religious, scientific, technological, and health fields to grow great minds. We believe every idea brings magic, and we want yours too!"
                    </p>

                    <div class="bg-creative/10 border-l-4 border-creative p-6 my-8 rounded-r-lg">
                        <h3 class="text-xl font-serif font-bold mb-3">"What it means to be a Quirkitopier"</h3>
                        <p class="italic">
                            "\"Being a Quirkitopier means embracing your unique perspective, celebrating creativity, and sharing knowledge that can spark imagination and growth in others. We don't just consume content; we thoughtfully engage with it and allow it to transform our thinking.\""
                        </p>
                    </div>

                    <h3 class="text-2xl font-serif font-bold mt-8 mb-4">"Our Values"</h3>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-6 mb-8">
                        {VALUES
                            .into_iter()
                            .map(|(emoji, name, text)| {
                                view! {
                                    <div class="bg-white dark:bg-dark/80 p-6 rounded-xl shadow-md">
                                        <div class="text-3xl mb-3">{emoji}</div>
                                        <h4 class="font-serif font-bold text-lg mb-2">{name}</h4>
                                        <p>{text}</p>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>

                    <div class="text-center mt-12">
                        <a href="/idea-form" class="inline-block rounded-xl bg-accent text-dark font-bold px-8 py-4 hover:bg-accent/80 transition-transform hover:scale-105">
                            "💡 Propose Your Idea"
                        </a>
                    </div>
                </div>
            </SectionWrapper>
        </SiteLayout>
    }
}
