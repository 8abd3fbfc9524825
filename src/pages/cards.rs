use leptos::prelude::*;
use tw_merge::tw_merge;

use crate::components::ui::{
    Badge, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardFooter,
    CardHeader, CardTitle, LoadingBlock, Spinner,
};
use crate::models::{Book, Idea, Podcast, YouTubeChannel};
use crate::sync::LiveState;
use crate::util::format_timestamp;

/// Renders one live collection: spinner until the first snapshot, then either
/// `empty` or one card per item in snapshot order.
#[component]
pub fn LiveGrid<T, F, V>(
    state: RwSignal<LiveState<T>>,
    empty: &'static str,
    #[prop(into, default = "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6".to_string())]
    class: String,
    card: F,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> V + Clone + Send + Sync + 'static,
    V: IntoView + 'static,
{
    move || {
        state.with(|s| match s {
            LiveState::Loading => view! { <LoadingBlock /> }.into_any(),
            LiveState::Ready(items) if items.is_empty() => view! {
                <div class="text-center py-12 bg-muted/20 rounded-lg">
                    <p class="text-muted-foreground">{empty}</p>
                </div>
            }
            .into_any(),
            LiveState::Ready(items) => {
                let card = card.clone();
                let cards = items.iter().cloned().map(card).collect_view();
                view! { <div class=class.clone()>{cards}</div> }.into_any()
            }
        })
    }
}

#[component]
fn OutboundLink(#[prop(into)] href: String, label: &'static str) -> impl IntoView {
    view! {
        <a href=href target="_blank" rel="noopener noreferrer" class="text-sm text-primary hover:underline">
            {label}
        </a>
    }
}

#[component]
fn DeleteButton(on_click: Callback<()>, busy: Signal<bool>) -> impl IntoView {
    view! {
        <Button
            variant=ButtonVariant::Destructive
            size=ButtonSize::Sm
            attr:disabled=move || busy.get()
            on:click=move |_| on_click.run(())
        >
            <Show when=move || busy.get() fallback=|| ().into_view()>
                <Spinner />
            </Show>
            "Delete"
        </Button>
    }
}

/// Cover images and thumbnails share one aspect-ratio frame.
#[component]
fn CardImage(#[prop(into)] src: String, #[prop(into)] alt: String) -> impl IntoView {
    view! {
        <div class="aspect-video w-full overflow-hidden bg-muted -mt-6">
            <img src=src alt=alt loading="lazy" class="h-full w-full object-cover" />
        </div>
    }
}

#[component]
pub fn BookCard(
    book: Book,
    #[prop(optional)] on_delete: Option<Callback<()>>,
    #[prop(into, optional)] busy: Signal<bool>,
) -> impl IntoView {
    view! {
        <Card>
            <CardImage src=book.image_url alt=book.title.clone() />
            <CardHeader>
                <CardTitle class="text-lg font-serif">{book.title}</CardTitle>
                <CardDescription>{format!("by {}", book.author)}</CardDescription>
            </CardHeader>
            <CardContent>
                <p class="text-sm line-clamp-3">{book.description}</p>
            </CardContent>
            <CardFooter class="mt-auto justify-between">
                <OutboundLink href=book.link label="View Link" />
                {on_delete.map(|cb| view! { <DeleteButton on_click=cb busy=busy /> })}
            </CardFooter>
        </Card>
    }
}

#[component]
pub fn ChannelCard(
    channel: YouTubeChannel,
    #[prop(optional)] on_delete: Option<Callback<()>>,
    #[prop(into, optional)] busy: Signal<bool>,
) -> impl IntoView {
    view! {
        <Card>
            <CardImage src=channel.thumbnail_url alt=channel.title.clone() />
            <CardHeader>
                <CardTitle class="text-lg font-serif">{channel.title}</CardTitle>
                <CardDescription>{format!("by {}", channel.creator)}</CardDescription>
            </CardHeader>
            <CardContent>
                <p class="text-sm line-clamp-3">{channel.description}</p>
            </CardContent>
            <CardFooter class="mt-auto justify-between">
                <OutboundLink href=channel.channel_url label="Visit Channel" />
                {on_delete.map(|cb| view! { <DeleteButton on_click=cb busy=busy /> })}
            </CardFooter>
        </Card>
    }
}

#[component]
pub fn PodcastCard(
    podcast: Podcast,
    #[prop(optional)] on_delete: Option<Callback<()>>,
    #[prop(into, optional)] busy: Signal<bool>,
) -> impl IntoView {
    view! {
        <Card>
            <CardImage src=podcast.image_url alt=podcast.title.clone() />
            <CardHeader>
                <CardTitle class="text-lg font-serif">{podcast.title}</CardTitle>
                <CardDescription>{format!("Hosted by {}", podcast.host)}</CardDescription>
            </CardHeader>
            <CardContent>
                <p class="text-sm line-clamp-3">{podcast.description}</p>
            </CardContent>
            <CardFooter class="mt-auto justify-between">
                <OutboundLink href=podcast.podcast_url label="Listen Now" />
                {on_delete.map(|cb| view! { <DeleteButton on_click=cb busy=busy /> })}
            </CardFooter>
        </Card>
    }
}

/// Admin-only: ideas are never listed publicly.
#[component]
pub fn IdeaCard(
    idea: Idea,
    on_toggle: Callback<()>,
    on_delete: Callback<()>,
    #[prop(into)] busy: Signal<bool>,
) -> impl IntoView {
    let reviewed = idea.reviewed;
    let card_tone = if reviewed {
        "border-green-500/50 bg-green-50/10"
    } else {
        "border-amber-500/50"
    };
    let badge_tone = if reviewed {
        "bg-green-500 text-white"
    } else {
        "bg-amber-500 text-white"
    };
    let card_class = tw_merge!("gap-3", card_tone);

    view! {
        <Card class=card_class>
            <CardHeader>
                <div class="flex w-full justify-between items-start gap-2">
                    <CardTitle class="text-lg">{idea.name}</CardTitle>
                    <Badge class=badge_tone>{if reviewed { "Reviewed" } else { "Pending" }}</Badge>
                </div>
                <div class="text-sm text-muted-foreground flex gap-2">
                    <span>{idea.email}</span>
                    <span>"•"</span>
                    <span>{idea.category.label()}</span>
                </div>
            </CardHeader>
            <CardContent>
                <p class="text-sm whitespace-pre-wrap">{idea.idea}</p>
                {idea.created_at.map(|ts| view! {
                    <p class="text-xs text-muted-foreground mt-2">
                        {format!("Submitted on: {}", format_timestamp(&ts))}
                    </p>
                })}
            </CardContent>
            <CardFooter class="mt-auto justify-between">
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    attr:disabled=move || busy.get()
                    on:click=move |_| on_toggle.run(())
                >
                    {if reviewed { "Mark Unreviewed" } else { "Mark Reviewed" }}
                </Button>
                <DeleteButton on_click=on_delete busy=busy />
            </CardFooter>
        </Card>
    }
}
