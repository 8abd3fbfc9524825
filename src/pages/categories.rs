use leptos::prelude::*;
use leptos_router::hooks::use_location;
use std::time::Duration;

use super::cards::{BookCard, ChannelCard, LiveGrid, PodcastCard};
use super::layout::{PageHero, SectionWrapper, SiteLayout};
use crate::components::hooks::use_live_collection;
use crate::components::ui::{Button, ButtonVariant};
use crate::models::{Book, ContentKind, Podcast, YouTubeChannel};
use crate::state::AppContext;
use crate::util::set_document_title;

/// Waits a frame or so for the section to lay out before scrolling.
fn scroll_to_section(kind: ContentKind) {
    set_timeout(
        move || {
            if let Some(el) = document().get_element_by_id(kind.slug()) {
                let opts = web_sys::ScrollIntoViewOptions::new();
                opts.set_behavior(web_sys::ScrollBehavior::Smooth);
                el.scroll_into_view_with_scroll_into_view_options(&opts);
            }
        },
        Duration::from_millis(100),
    );
}

#[component]
pub fn CategoriesPage() -> impl IntoView {
    set_document_title("Categories");

    let app_state = expect_context::<AppContext>();
    let active: RwSignal<ContentKind> = RwSignal::new(ContentKind::default());

    let books = use_live_collection(app_state.0.books.clone());
    let channels = use_live_collection(app_state.0.youtube.clone());
    let podcasts = use_live_collection(app_state.0.podcasts.clone());

    // `/categories#podcasts` preselects and scrolls; unknown fragments are ignored.
    let location = use_location();
    Effect::new(move |_| {
        if let Some(kind) = ContentKind::from_fragment(&location.hash.get()) {
            active.set(kind);
            scroll_to_section(kind);
        }
    });

    let select_tab = move |kind: ContentKind| {
        active.set(kind);
        scroll_to_section(kind);
    };

    view! {
        <SiteLayout>
            <PageHero
                title="Explore Categories"
                subtitle="Discover amazing content curated by our community across different categories."
            />

            <div class="bg-light dark:bg-dark sticky top-16 z-40 shadow-md">
                <div class="container mx-auto px-4">
                    <div class="flex overflow-x-auto py-4 gap-4" role="tablist">
                        {ContentKind::all()
                            .map(move |kind| {
                                let state = move || if active.get() == kind { "active" } else { "inactive" };
                                view! {
                                    <Button
                                        variant=ButtonVariant::Tab
                                        class="px-6"
                                        attr:role="tab"
                                        attr:data-state=state
                                        attr:aria-selected=move || (active.get() == kind).to_string()
                                        on:click=move |_| select_tab(kind)
                                    >
                                        <span>{kind.emoji()}</span>
                                        {kind.title()}
                                    </Button>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </div>

            <SectionWrapper
                id=ContentKind::Books.slug()
                title="📚 Books"
                subtitle="Expand your mind with these thoughtfully selected books"
                bg_class="bg-light dark:bg-dark"
            >
                <LiveGrid
                    state=books
                    empty="No books added yet."
                    card=|book: Book| view! { <BookCard book=book /> }
                />
            </SectionWrapper>

            <SectionWrapper
                id=ContentKind::Youtube.slug()
                title="🎥 YouTube Channels"
                subtitle="Educational and entertaining YouTube channels to follow"
                bg_class="bg-white dark:bg-black/20"
            >
                <LiveGrid
                    state=channels
                    empty="No YouTube channels added yet."
                    card=|channel: YouTubeChannel| view! { <ChannelCard channel=channel /> }
                />
            </SectionWrapper>

            <SectionWrapper
                id=ContentKind::Podcasts.slug()
                title="🎙️ Podcasts"
                subtitle="Listen to these thought-provoking podcasts"
                bg_class="bg-light dark:bg-dark"
            >
                <LiveGrid
                    state=podcasts
                    empty="No podcasts added yet."
                    card=|podcast: Podcast| view! { <PodcastCard podcast=podcast /> }
                />
            </SectionWrapper>
        </SiteLayout>
    }
}
