use leptos::prelude::*;
use thaw::*;

use crate::shared::form::{FieldKind, FormField, FormValues};
use crate::shared::modal::Modal;

/// Add/edit modal rendered from a list of [`FormField`]s.
///
/// `values` is owned by the caller so dependent fields (sale totals) can be
/// recomputed through `on_field_change` after every keystroke.
#[component]
pub fn EntityFormModal(
    #[prop(into)]
    title: Signal<String>,
    fields: Vec<FormField>,
    values: RwSignal<FormValues>,
    /// Disables the submit button while a save is in flight
    #[prop(into)]
    busy: Signal<bool>,
    /// Called with the key of the field that changed
    on_field_change: Callback<&'static str>,
    on_submit: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let inputs = fields
        .into_iter()
        .map(|field| view! { <FormInput field=field values=values on_field_change=on_field_change /> })
        .collect_view();

    view! {
        <Modal
            title=title
            on_close=on_close
            footer=move || view! {
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_close.run(())
                    disabled=busy
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_submit.run(())
                    disabled=busy
                >
                    {move || if busy.get() { "Saving..." } else { "Save" }}
                </Button>
            }
        >
            <form
                class="entity-form"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    if !busy.get_untracked() {
                        on_submit.run(());
                    }
                }
            >
                {inputs}
            </form>
        </Modal>
    }
}

#[component]
fn FormInput(
    field: FormField,
    values: RwSignal<FormValues>,
    on_field_change: Callback<&'static str>,
) -> impl IntoView {
    let key = field.key;
    let current = move || values.with(|v| v.get(key).cloned().unwrap_or_default());
    let set = move |value: String| {
        values.update(|v| {
            v.insert(key, value);
        });
        on_field_change.run(key);
    };

    let input_type = match &field.kind {
        FieldKind::Email => "email",
        FieldKind::Number => "number",
        FieldKind::Date => "date",
        FieldKind::Password => "password",
        FieldKind::Text | FieldKind::Select(_) => "text",
    };

    let control = match field.kind {
        FieldKind::Select(options) => view! {
            <select
                id=key
                prop:value=current
                on:change=move |ev| set(event_target_value(&ev))
                disabled=field.readonly
            >
                <option value="">"-- Select --"</option>
                {options.into_iter().map(|option| {
                    let value = option.value.clone();
                    view! {
                        <option value=option.value selected=move || current() == value>
                            {option.label}
                        </option>
                    }
                }).collect_view()}
            </select>
        }
        .into_any(),
        _ => view! {
            <input
                id=key
                type=input_type
                step=(input_type == "number").then_some("any")
                prop:value=current
                on:input=move |ev| set(event_target_value(&ev))
                readonly=field.readonly
                required=field.required
            />
        }
        .into_any(),
    };

    view! {
        <div class="form__group">
            <label for=key>
                {field.label}
                {field.required.then_some(" *")}
            </label>
            {control}
        </div>
    }
}
