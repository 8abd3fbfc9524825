use leptos::prelude::*;
use leptos::task::spawn_local;

use super::fields::{settle, TextField};
use super::layout::{PageHero, SiteLayout};
use crate::components::hooks::use_field_id;
use crate::components::ui::{Button, FieldMessage, Label, Spinner, FIELD_CLASS};
use crate::forms::{FormMachine, IdeaFields};
use crate::models::IdeaCategory;
use crate::state::AppContext;
use crate::util::set_document_title;

#[component]
pub fn IdeaFormPage() -> impl IntoView {
    set_document_title("Submit an Idea");

    view! {
        <SiteLayout>
            <PageHero
                title="💡 Propose Your Idea"
                subtitle="Share your quirky and creative ideas with our community!"
            />
            <section class="py-16 bg-light dark:bg-dark">
                <div class="container mx-auto px-4">
                    <div class="max-w-4xl mx-auto">
                        <div class="mb-12 text-center">
                            <h2 class="text-2xl font-serif font-bold mb-4">"What's Your Quirky Idea?"</h2>
                            <p class="text-lg text-secondary">
                                "We believe every idea brings magic to our community. Fill out the form below to share yours!"
                            </p>
                        </div>
                        <IdeaForm />
                    </div>
                </div>
            </section>
        </SiteLayout>
    }
}

/// Public submission form; writes straight to the `ideas` collection.
#[component]
pub fn IdeaForm() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let form: RwSignal<FormMachine<IdeaFields>> = RwSignal::new(FormMachine::new());
    let submitting = move || form.with(|m| m.is_submitting());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let Some(draft) = form.try_update(|m| m.begin_submit()).flatten() else {
            return;
        };
        let app_state = app_state.clone();

        spawn_local(async move {
            let result = app_state.0.ideas.create(draft).await;
            settle(
                &app_state,
                form,
                &result,
                "Idea submitted successfully!",
                "Failed to submit idea.",
            );
        });
    };

    let category_id = use_field_id("category");
    let category_error = Signal::derive(move || form.with(|m| m.error("category")));

    view! {
        <div class="max-w-xl mx-auto bg-white dark:bg-dark/80 rounded-xl shadow-lg p-8">
            <form class="space-y-6" on:submit=on_submit novalidate=true>
                <TextField
                    form=form
                    name="name"
                    label="Your Name"
                    placeholder="John Doe"
                    get=|f: &IdeaFields| f.name.clone()
                    set=|f: &mut IdeaFields, v: String| f.name = v
                />
                <TextField
                    form=form
                    name="email"
                    label="Email"
                    input_type="email"
                    placeholder="john@example.com"
                    get=|f: &IdeaFields| f.email.clone()
                    set=|f: &mut IdeaFields, v: String| f.email = v
                />

                <div class="flex flex-col gap-1.5">
                    <Label html_for=category_id.clone()>"Category"</Label>
                    <select
                        id=category_id
                        class=format!("{FIELD_CLASS} h-9")
                        disabled=submitting
                        aria-invalid=move || category_error.get().map(|_| "true")
                        prop:value=move || form.with(|m| m.fields.category.clone())
                        on:change=move |ev| {
                            let v = event_target_value(&ev);
                            form.update(|m| m.fields.category = v);
                        }
                    >
                        <option value="">"Select a category"</option>
                        {IdeaCategory::all()
                            .map(|c| view! { <option value=c.value()>{c.label()}</option> })
                            .collect_view()}
                    </select>
                    <FieldMessage message=category_error />
                </div>

                <TextField
                    form=form
                    name="idea"
                    label="Your Idea"
                    multiline=true
                    placeholder="Share your quirky idea with us..."
                    get=|f: &IdeaFields| f.idea.clone()
                    set=|f: &mut IdeaFields, v: String| f.idea = v
                />

                <Button class="w-full bg-accent text-dark hover:bg-accent/80 font-bold" attr:disabled=submitting>
                    <Show when=submitting fallback=|| ().into_view()>
                        <Spinner />
                    </Show>
                    {move || if submitting() { "Submitting..." } else { "💡 Submit Your Idea" }}
                </Button>
            </form>
        </div>
    }
}
