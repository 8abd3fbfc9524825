use leptos::prelude::*;

use crate::components::hooks::use_field_id;
use crate::components::ui::{FieldMessage, Input, Label, Textarea};
use crate::error::SiteError;
use crate::forms::{FormFields, FormMachine};
use crate::state::AppContext;

/// Hands a finished submission back to its form and raises the matching
/// toast. Returns `true` when the write went through.
pub(crate) fn settle<F, T>(
    app_state: &AppContext,
    form: RwSignal<FormMachine<F>>,
    result: &Result<T, SiteError>,
    succeeded: &str,
    failed: &str,
) -> bool
where
    F: FormFields + Send + Sync + 'static,
{
    // The form may have been unmounted while the request was in flight.
    let _ = form.try_update(|m| m.finish(result));
    match result {
        Ok(_) => {
            app_state.0.notifier.success(succeeded);
            true
        }
        Err(SiteError::Validation(_)) => false,
        Err(e) => {
            app_state.0.report_failure(failed, e);
            false
        }
    }
}

/// Label, control and inline error for one text input of a `FormMachine`.
///
/// `name` is the key validation errors are reported under.
#[component]
pub fn TextField<F>(
    form: RwSignal<FormMachine<F>>,
    name: &'static str,
    label: &'static str,
    get: fn(&F) -> String,
    set: fn(&mut F, String),
    #[prop(optional)] multiline: bool,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(optional)] hint: Option<&'static str>,
) -> impl IntoView
where
    F: FormFields + Send + Sync + 'static,
{
    let id = use_field_id(name);
    let value = Signal::derive(move || form.with(|m| get(&m.fields)));
    let error = Signal::derive(move || form.with(|m| m.error(name)));
    let invalid = Signal::derive(move || error.get().is_some());
    let disabled = Signal::derive(move || form.with(|m| m.is_submitting()));
    let on_input = Callback::new(move |v: String| form.update(|m| set(&mut m.fields, v)));

    let control = if multiline {
        view! {
            <Textarea
                id=id.clone()
                rows=4
                class="min-h-32"
                placeholder=placeholder
                value=value
                on_input=on_input
                disabled=disabled
                invalid=invalid
            />
        }
        .into_any()
    } else {
        view! {
            <Input
                id=id.clone()
                r#type=input_type
                placeholder=placeholder
                value=value
                on_input=on_input
                disabled=disabled
                invalid=invalid
            />
        }
        .into_any()
    };

    view! {
        <div class="flex flex-col gap-1.5">
            <Label html_for=id>{label}</Label>
            {control}
            {hint.map(|h| view! { <p class="text-xs text-muted-foreground">{h}</p> })}
            <FieldMessage message=error />
        </div>
    }
}
