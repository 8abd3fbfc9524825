use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_navigate;
use strum::{EnumIter, IntoEnumIterator};

use super::cards::{BookCard, ChannelCard, IdeaCard, LiveGrid, PodcastCard};
use super::fields::{settle, TextField};
use super::layout::SiteLayout;
use crate::components::hooks::{use_field_id, use_live_collection};
use crate::components::ui::{
    Badge, Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    FieldMessage, FormAlert, Input, Label, Spinner, FIELD_CLASS,
};
use crate::forms::{BookFields, ChannelFields, FormMachine, PodcastFields};
use crate::models::{Book, Entity, Idea, Podcast, YouTubeChannel};
use crate::repo::{Deletion, Repository};
use crate::state::AppContext;
use crate::util::{confirm_dialog, read_attachment, set_document_title};

const DASHBOARD_PATH: &str = "/admin/dashboard";

#[component]
pub fn AdminLoginPage() -> impl IntoView {
    set_document_title("Admin Login");
    let session = expect_context::<AppContext>().0.session;

    view! {
        <SiteLayout>
            <Show
                when=move || session.get().is_none()
                fallback=|| view! { <Redirect path=DASHBOARD_PATH /> }
            >
                <LoginCard />
            </Show>
        </SiteLayout>
    }
}

#[component]
fn LoginCard() -> impl IntoView {
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        let app_state = app_state.clone();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match app_state.0.sign_in(&email_val, &password_val).await {
                Ok(()) => {
                    let _ = password.try_set(String::new());
                    navigate.with_value(|nav| nav(DASHBOARD_PATH, Default::default()));
                }
                Err(e) => {
                    log::warn!("admin sign-in failed: {e}");
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    };

    view! {
        <div class="mx-auto flex min-h-[70vh] w-full max-w-sm flex-col justify-center px-4 py-10">
            <Card>
                <CardHeader>
                    <CardTitle class="text-lg">"🔐 Admin Login"</CardTitle>
                    <CardDescription>"Sign in to manage Quirkitopia Space! content."</CardDescription>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-3" on:submit=on_submit>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="email">"Email"</Label>
                            <Input
                                id="email"
                                r#type="email"
                                placeholder="admin@example.com"
                                autocomplete="username"
                                required=true
                                value=email
                                on_input=Callback::new(move |v| email.set(v))
                            />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="password">"Password"</Label>
                            <Input
                                id="password"
                                r#type="password"
                                placeholder="••••••••"
                                autocomplete="current-password"
                                required=true
                                value=password
                                on_input=Callback::new(move |v| password.set(v))
                            />
                        </div>

                        <FormAlert message=error />

                        <Button class="w-full" attr:disabled=move || loading.get()>
                            <Show when=move || loading.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            {move || if loading.get() { "Signing in..." } else { "Sign In" }}
                        </Button>
                    </form>
                </CardContent>
            </Card>
        </div>
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter)]
enum AdminTab {
    #[default]
    Books,
    Youtube,
    Podcasts,
    Ideas,
}

impl AdminTab {
    fn label(self) -> &'static str {
        match self {
            Self::Books => "📚 Books",
            Self::Youtube => "🎥 YouTube",
            Self::Podcasts => "🎙️ Podcasts",
            Self::Ideas => "💡 User Ideas",
        }
    }
}

/// Signed out, this renders the login card in place; signing in swaps the
/// panels in without a navigation.
#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    set_document_title("Admin Panel");
    let session = expect_context::<AppContext>().0.session;

    view! {
        <Show when=move || session.get().is_some() fallback=|| view! { <AdminLoginPage /> }>
            <SiteLayout>
                <Dashboard />
            </SiteLayout>
        </Show>
    }
}

#[component]
fn Dashboard() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());
    let tab: RwSignal<AdminTab> = RwSignal::new(AdminTab::default());

    let on_logout = move |_: leptos::ev::MouseEvent| {
        app_state.0.sign_out();
        navigate.with_value(|nav| nav("/", Default::default()));
    };

    view! {
        <div class="bg-primary text-white py-10 md:py-16">
            <div class="container mx-auto px-4 text-center">
                <h1 class="text-3xl md:text-4xl font-serif font-bold mb-4">"🔐 Admin Panel"</h1>
                <p class="text-lg max-w-2xl mx-auto">"Manage your Quirkitopia Space! content here."</p>
                <Button variant=ButtonVariant::Accent class="mt-4" on:click=on_logout>
                    "Logout"
                </Button>
            </div>
        </div>

        <section class="py-10 bg-light dark:bg-dark min-h-screen">
            <div class="container mx-auto px-4">
                <div class="w-full flex flex-wrap gap-1 mb-8 bg-primary/10 p-1 rounded-lg" role="tablist">
                    {AdminTab::iter()
                        .map(move |t| {
                            view! {
                                <Button
                                    variant=ButtonVariant::Tab
                                    class="flex-1"
                                    attr:role="tab"
                                    attr:data-state=move || if tab.get() == t { "active" } else { "inactive" }
                                    on:click=move |_| tab.set(t)
                                >
                                    {t.label()}
                                </Button>
                            }
                        })
                        .collect_view()}
                </div>

                // Only the visible panel holds a live subscription.
                <div class="p-4">
                    {move || match tab.get() {
                        AdminTab::Books => view! { <BooksPanel /> }.into_any(),
                        AdminTab::Youtube => view! { <ChannelsPanel /> }.into_any(),
                        AdminTab::Podcasts => view! { <PodcastsPanel /> }.into_any(),
                        AdminTab::Ideas => view! { <IdeasPanel /> }.into_any(),
                    }}
                </div>
            </div>
        </section>
    }
}

/// Confirm-then-delete for one card. `busy` holds the id being removed.
fn delete_action<T: Entity>(
    app_state: AppContext,
    repo: Repository<T>,
    busy: RwSignal<Option<String>>,
    prompt: &'static str,
    deleted: &'static str,
    failed: &'static str,
) -> Callback<String> {
    Callback::new(move |id: String| {
        let app_state = app_state.clone();
        let repo = repo.clone();
        spawn_local(async move {
            let confirm = || {
                let ok = confirm_dialog(prompt);
                if ok {
                    let _ = busy.try_set(Some(id.clone()));
                }
                ok
            };
            match repo.delete(&id, confirm).await {
                Ok(Deletion::Deleted) => app_state.0.notifier.success(deleted),
                Ok(Deletion::Cancelled) => {}
                Err(e) => app_state.0.report_failure(failed, &e),
            }
            let _ = busy.try_update(|b| {
                if b.as_deref() == Some(id.as_str()) {
                    *b = None;
                }
            });
        });
    })
}

fn is_busy(busy: RwSignal<Option<String>>, id: String) -> Signal<bool> {
    Signal::derive(move || busy.with(|b| b.as_deref() == Some(id.as_str())))
}

#[component]
fn PanelHeading(title: &'static str) -> impl IntoView {
    view! { <h2 class="text-xl font-bold mb-4">{title}</h2> }
}

#[component]
fn SubmitButton(
    #[prop(into)] submitting: Signal<bool>,
    idle: &'static str,
    busy: &'static str,
) -> impl IntoView {
    view! {
        <Button class="w-full" attr:disabled=move || submitting.get()>
            <Show when=move || submitting.get() fallback=|| ().into_view()>
                <Spinner />
            </Show>
            {move || if submitting.get() { busy } else { idle }}
        </Button>
    }
}

#[component]
fn BooksPanel() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let repo = app_state.0.books.clone();
    let books = use_live_collection(repo.clone());

    let form: RwSignal<FormMachine<BookFields>> = RwSignal::new(FormMachine::new());
    let submitting = Signal::derive(move || form.with(|m| m.is_submitting()));
    let file_ref: NodeRef<html::Input> = NodeRef::new();
    let cover_id = use_field_id("cover");
    let cover_error = Signal::derive(move || form.with(|m| m.error("imageUrl")));

    let notifier = app_state.0.notifier;
    let on_file = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|list| list.get(0)) else {
            form.update(|m| m.fields.cover = None);
            return;
        };
        spawn_local(async move {
            match read_attachment(&file).await {
                Ok(cover) => {
                    let _ = form.try_update(|m| m.fields.cover = Some(cover));
                }
                Err(e) => {
                    log::error!("{e}");
                    notifier.error("Error", "Could not read the selected image.");
                }
            }
        });
    };

    let on_submit = {
        let app_state = app_state.clone();
        let repo = repo.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some((draft, cover)) = form.try_update(|m| m.begin_submit()).flatten() else {
                return;
            };
            let app_state = app_state.clone();
            let repo = repo.clone();
            spawn_local(async move {
                let result = repo.create_with_image(draft, cover).await;
                let added = settle(
                    &app_state,
                    form,
                    &result,
                    "Book added successfully!",
                    "Failed to add book.",
                );
                if added {
                    if let Some(input) = file_ref.get_untracked() {
                        input.set_value("");
                    }
                }
            });
        }
    };

    let deleting: RwSignal<Option<String>> = RwSignal::new(None);
    let on_delete = delete_action(
        app_state.clone(),
        repo,
        deleting,
        "Are you sure you want to delete this book?",
        "Book deleted successfully",
        "Failed to delete book.",
    );

    view! {
        <div class="space-y-8">
            <Card class="bg-accent/10">
                <CardHeader>
                    <CardTitle>"Add New Book"</CardTitle>
                </CardHeader>
                <CardContent>
                    <form class="space-y-4" on:submit=on_submit novalidate=true>
                        <TextField form=form name="title" label="Title"
                            get=|f: &BookFields| f.title.clone()
                            set=|f: &mut BookFields, v: String| f.title = v />
                        <TextField form=form name="author" label="Author"
                            get=|f: &BookFields| f.author.clone()
                            set=|f: &mut BookFields, v: String| f.author = v />
                        <TextField form=form name="description" label="Description" multiline=true
                            get=|f: &BookFields| f.description.clone()
                            set=|f: &mut BookFields, v: String| f.description = v />
                        <TextField form=form name="link" label="Link (Amazon, Goodreads, etc.)" input_type="url"
                            placeholder="https://"
                            get=|f: &BookFields| f.link.clone()
                            set=|f: &mut BookFields, v: String| f.link = v />

                        <div class="flex flex-col gap-1.5">
                            <Label html_for=cover_id.clone()>"Cover Image"</Label>
                            <input
                                id=cover_id
                                type="file"
                                accept="image/*"
                                class=format!("{FIELD_CLASS} h-9 file:border-0 file:bg-transparent file:text-sm file:font-medium")
                                disabled=move || submitting.get()
                                aria-invalid=move || cover_error.get().map(|_| "true")
                                node_ref=file_ref
                                on:change=on_file
                            />
                            <FieldMessage message=cover_error />
                        </div>

                        <SubmitButton submitting=submitting idle="Add Book" busy="Adding Book..." />
                    </form>
                </CardContent>
            </Card>

            <div>
                <PanelHeading title="Current Books" />
                <LiveGrid
                    state=books
                    empty="No books added yet."
                    card=move |book: Book| {
                        let id = book.id.clone();
                        let busy = is_busy(deleting, id.clone());
                        view! { <BookCard book=book on_delete=Callback::new(move |_| on_delete.run(id.clone())) busy=busy /> }
                    }
                />
            </div>
        </div>
    }
}

#[component]
fn ChannelsPanel() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let repo = app_state.0.youtube.clone();
    let channels = use_live_collection(repo.clone());

    let form: RwSignal<FormMachine<ChannelFields>> = RwSignal::new(FormMachine::new());
    let submitting = Signal::derive(move || form.with(|m| m.is_submitting()));

    let on_submit = {
        let app_state = app_state.clone();
        let repo = repo.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(draft) = form.try_update(|m| m.begin_submit()).flatten() else {
                return;
            };
            let app_state = app_state.clone();
            let repo = repo.clone();
            spawn_local(async move {
                let result = repo.create(draft).await;
                settle(
                    &app_state,
                    form,
                    &result,
                    "YouTube channel added successfully!",
                    "Failed to add YouTube channel.",
                );
            });
        }
    };

    let deleting: RwSignal<Option<String>> = RwSignal::new(None);
    let on_delete = delete_action(
        app_state.clone(),
        repo,
        deleting,
        "Are you sure you want to delete this YouTube channel?",
        "YouTube channel deleted successfully",
        "Failed to delete YouTube channel.",
    );

    view! {
        <div class="space-y-8">
            <Card class="bg-accent/10">
                <CardHeader>
                    <CardTitle>"Add New YouTube Channel"</CardTitle>
                </CardHeader>
                <CardContent>
                    <form class="space-y-4" on:submit=on_submit novalidate=true>
                        <TextField form=form name="title" label="Channel Title"
                            get=|f: &ChannelFields| f.title.clone()
                            set=|f: &mut ChannelFields, v: String| f.title = v />
                        <TextField form=form name="creator" label="Creator Name"
                            get=|f: &ChannelFields| f.creator.clone()
                            set=|f: &mut ChannelFields, v: String| f.creator = v />
                        <TextField form=form name="description" label="Channel Description" multiline=true
                            get=|f: &ChannelFields| f.description.clone()
                            set=|f: &mut ChannelFields, v: String| f.description = v />
                        <TextField form=form name="channelUrl" label="Channel URL" input_type="url"
                            placeholder="https://youtube.com/@..."
                            get=|f: &ChannelFields| f.channel_url.clone()
                            set=|f: &mut ChannelFields, v: String| f.channel_url = v />
                        <TextField form=form name="thumbnailUrl" label="Thumbnail URL" input_type="url"
                            placeholder="https://"
                            hint="Use a YouTube video thumbnail or channel art URL"
                            get=|f: &ChannelFields| f.thumbnail_url.clone()
                            set=|f: &mut ChannelFields, v: String| f.thumbnail_url = v />

                        <SubmitButton submitting=submitting idle="Add YouTube Channel" busy="Adding Channel..." />
                    </form>
                </CardContent>
            </Card>

            <div>
                <PanelHeading title="Current YouTube Channels" />
                <LiveGrid
                    state=channels
                    empty="No YouTube channels added yet."
                    card=move |channel: YouTubeChannel| {
                        let id = channel.id.clone();
                        let busy = is_busy(deleting, id.clone());
                        view! { <ChannelCard channel=channel on_delete=Callback::new(move |_| on_delete.run(id.clone())) busy=busy /> }
                    }
                />
            </div>
        </div>
    }
}

#[component]
fn PodcastsPanel() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let repo = app_state.0.podcasts.clone();
    let podcasts = use_live_collection(repo.clone());

    let form: RwSignal<FormMachine<PodcastFields>> = RwSignal::new(FormMachine::new());
    let submitting = Signal::derive(move || form.with(|m| m.is_submitting()));

    let on_submit = {
        let app_state = app_state.clone();
        let repo = repo.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(draft) = form.try_update(|m| m.begin_submit()).flatten() else {
                return;
            };
            let app_state = app_state.clone();
            let repo = repo.clone();
            spawn_local(async move {
                let result = repo.create(draft).await;
                settle(
                    &app_state,
                    form,
                    &result,
                    "Podcast added successfully!",
                    "Failed to add podcast.",
                );
            });
        }
    };

    let deleting: RwSignal<Option<String>> = RwSignal::new(None);
    let on_delete = delete_action(
        app_state.clone(),
        repo,
        deleting,
        "Are you sure you want to delete this podcast?",
        "Podcast deleted successfully",
        "Failed to delete podcast.",
    );

    view! {
        <div class="space-y-8">
            <Card class="bg-accent/10">
                <CardHeader>
                    <CardTitle>"Add New Podcast"</CardTitle>
                </CardHeader>
                <CardContent>
                    <form class="space-y-4" on:submit=on_submit novalidate=true>
                        <TextField form=form name="title" label="Podcast Title"
                            get=|f: &PodcastFields| f.title.clone()
                            set=|f: &mut PodcastFields, v: String| f.title = v />
                        <TextField form=form name="host" label="Host/Creator"
                            get=|f: &PodcastFields| f.host.clone()
                            set=|f: &mut PodcastFields, v: String| f.host = v />
                        <TextField form=form name="description" label="Podcast Description" multiline=true
                            get=|f: &PodcastFields| f.description.clone()
                            set=|f: &mut PodcastFields, v: String| f.description = v />
                        <TextField form=form name="podcastUrl" label="Podcast URL" input_type="url"
                            placeholder="https://"
                            get=|f: &PodcastFields| f.podcast_url.clone()
                            set=|f: &mut PodcastFields, v: String| f.podcast_url = v />
                        <TextField form=form name="imageUrl" label="Cover Image URL" input_type="url"
                            placeholder="https://"
                            get=|f: &PodcastFields| f.image_url.clone()
                            set=|f: &mut PodcastFields, v: String| f.image_url = v />

                        <SubmitButton submitting=submitting idle="Add Podcast" busy="Adding Podcast..." />
                    </form>
                </CardContent>
            </Card>

            <div>
                <PanelHeading title="Current Podcasts" />
                <LiveGrid
                    state=podcasts
                    empty="No podcasts added yet."
                    card=move |podcast: Podcast| {
                        let id = podcast.id.clone();
                        let busy = is_busy(deleting, id.clone());
                        view! { <PodcastCard podcast=podcast on_delete=Callback::new(move |_| on_delete.run(id.clone())) busy=busy /> }
                    }
                />
            </div>
        </div>
    }
}

#[component]
fn IdeasPanel() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let repo = app_state.0.ideas.clone();
    let ideas = use_live_collection(repo.clone());

    // One in-flight action (toggle or delete) per idea.
    let busy_id: RwSignal<Option<String>> = RwSignal::new(None);

    let on_delete = delete_action(
        app_state.clone(),
        repo.clone(),
        busy_id,
        "Are you sure you want to delete this idea?",
        "Idea deleted successfully",
        "Failed to delete idea.",
    );

    let on_toggle = Callback::new(move |idea: Idea| {
        let app_state = app_state.clone();
        let repo = repo.clone();
        busy_id.set(Some(idea.id.clone()));
        spawn_local(async move {
            match repo.toggle_reviewed(&idea).await {
                Ok(true) => app_state.0.notifier.success("Marked as reviewed"),
                Ok(false) => app_state.0.notifier.success("Marked as unreviewed"),
                Err(e) => app_state.0.report_failure("Failed to update idea.", &e),
            }
            let _ = busy_id.try_set(None);
        });
    });

    let count_label = move || {
        let n = ideas.with(|s| s.items().len());
        format!("{n} {}", if n == 1 { "Idea" } else { "Ideas" })
    };

    view! {
        <div class="space-y-6">
            <div class="flex justify-between items-center mb-6">
                <h2 class="text-xl font-bold">"User Submitted Ideas"</h2>
                <Badge class="bg-primary text-white">{count_label}</Badge>
            </div>
            <LiveGrid
                state=ideas
                empty="No ideas submitted yet."
                class="grid gap-6 md:grid-cols-2"
                card=move |idea: Idea| {
                    let id = idea.id.clone();
                    let busy = is_busy(busy_id, id.clone());
                    let target = idea.clone();
                    view! {
                        <IdeaCard
                            idea=idea
                            on_toggle=Callback::new(move |_| on_toggle.run(target.clone()))
                            on_delete=Callback::new(move |_| on_delete.run(id.clone()))
                            busy=busy
                        />
                    }
                }
            />
        </div>
    }
}
