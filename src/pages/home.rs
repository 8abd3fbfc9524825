use icons::ChevronRight;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::layout::{SectionWrapper, SiteLayout, INSTAGRAM_URL, TELEGRAM_URL};
use crate::models::ContentKind;
use crate::util::set_document_title;

fn category_blurb(kind: ContentKind) -> (&'static str, &'static str) {
    match kind {
        ContentKind::Books => (
            "Discover quirky books that expand your mind and imagination.",
            "bg-accent/20",
        ),
        ContentKind::Youtube => (
            "Explore amazing YouTube channels that educate and entertain.",
            "bg-creative/20",
        ),
        ContentKind::Podcasts => (
            "Listen to thought-provoking podcasts from various fields.",
            "bg-primary/10",
        ),
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    set_document_title("Home");

    view! {
        <SiteLayout>
            <HeroSection />
            <SectionWrapper
                title="Explore Categories"
                subtitle="Discover amazing content curated by our community"
                bg_class="bg-light dark:bg-dark"
                centered=true
            >
                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    {ContentKind::all()
                        .map(|kind| view! { <CategoryCard kind=kind /> })
                        .collect_view()}
                </div>
            </SectionWrapper>
            <ContactSection />
        </SiteLayout>
    }
}

#[component]
fn HeroSection() -> impl IntoView {
    view! {
        <section class="relative overflow-hidden bg-gradient-to-br from-primary via-primary/90 to-creative text-white py-24 md:py-36">
            <div class="container mx-auto px-4 text-center">
                <div class="text-5xl md:text-6xl mb-6 space-x-2">"🎩💡✨🌈🎭"</div>
                <h1 class="text-5xl md:text-7xl font-serif font-bold mb-6">
                    "Quirkitopia " <span class="text-accent">"Space!"</span>
                </h1>
                <p class="text-xl md:text-2xl max-w-2xl mx-auto mb-10">
                    "Where every moment is a celebration of uniqueness and creativity!"
                </p>
                <div class="flex flex-wrap justify-center gap-4">
                    <a href="/categories" class="rounded-xl bg-accent text-dark font-bold px-8 py-4 hover:bg-accent/80 transition-transform hover:scale-105">
                        "Explore Categories"
                    </a>
                    <a href="/idea-form" class="rounded-xl border-2 border-white px-8 py-4 hover:bg-white/10 transition-transform hover:scale-105">
                        "💡 Submit an Idea"
                    </a>
                </div>
            </div>
        </section>
    }
}

#[component]
fn CategoryCard(kind: ContentKind) -> impl IntoView {
    let navigate = use_navigate();
    let (description, tone) = category_blurb(kind);
    let link = format!("/categories#{}", kind.slug());
    let class = format!(
        "group rounded-xl p-6 {tone} cursor-pointer h-full flex flex-col justify-between transition-transform hover:-translate-y-1 hover:shadow-lg"
    );

    view! {
        <div class=class role="link" on:click=move |_| navigate(&link, Default::default())>
            <div>
                <div class="text-4xl mb-4">{kind.emoji()}</div>
                <h3 class="text-2xl font-serif font-bold mb-2">{kind.section_title()}</h3>
                <p class="text-muted-foreground">{description}</p>
            </div>
            <div class="mt-4 text-sm text-right">
                <span class="inline-flex items-center font-medium">
                    "Explore"
                    <ChevronRight class="size-4 ml-1 transition-transform group-hover:translate-x-1" />
                </span>
            </div>
        </div>
    }
}

#[component]
fn ContactSection() -> impl IntoView {
    view! {
        <section class="py-16 bg-gradient-to-br from-primary via-primary/90 to-primary/80 text-white">
            <div class="container mx-auto px-4">
                <div class="max-w-3xl mx-auto text-center">
                    <h2 class="text-3xl md:text-4xl font-serif font-bold mb-4">"Join Our Community!"</h2>
                    <p class="text-lg mb-8">
                        "Connect with us on social media to stay updated with the latest quirky content and community events."
                    </p>
                    <div class="flex flex-wrap justify-center gap-6">
                        <a href=INSTAGRAM_URL target="_blank" rel="noopener noreferrer"
                            class="rounded-xl border-2 border-white px-6 py-4 hover:bg-white/10 transition-transform hover:scale-105">
                            "Instagram: @quirki_topia"
                        </a>
                        <a href=TELEGRAM_URL target="_blank" rel="noopener noreferrer"
                            class="rounded-xl bg-accent text-dark px-6 py-4 hover:bg-accent/80 transition-transform hover:scale-105">
                            "Telegram: Join Here"
                        </a>
                    </div>
                </div>
            </div>
        </section>
    }
}
