use crate::shared::modal::Modal;
use leptos::prelude::*;
use thaw::*;

/// Yes/no prompt guarding a destructive action.
#[component]
pub fn ConfirmDialog(
    #[prop(into)]
    title: String,
    #[prop(into)]
    message: String,
    /// Disables both buttons while the action runs
    #[prop(into)]
    busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Modal
            title=title
            on_close=on_cancel
            footer=move || view! {
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_cancel.run(())
                    disabled=busy
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_confirm.run(())
                    disabled=busy
                >
                    {move || if busy.get() { "Deleting..." } else { "Delete" }}
                </Button>
            }
        >
            <p class="confirm-dialog__message">{message}</p>
        </Modal>
    }
}
