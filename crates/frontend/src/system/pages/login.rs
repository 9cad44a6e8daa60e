use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::context::use_api;
use crate::system::auth::api::{login, login_error_message};
use crate::system::auth::context::use_auth;

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let auth = use_auth();
    let api = StoredValue::new_local(use_api());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let username_val = username.get_untracked();
        let password_val = password.get_untracked();
        if username_val.trim().is_empty() || password_val.is_empty() {
            set_error_message.set(Some("Please enter username and password".to_string()));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        let api = api.get_value();
        spawn_local(async move {
            match login(&api, &username_val, &password_val).await {
                // Switches the root view to the main layout
                Ok(user) => auth.signed_in(user),
                Err(e) => {
                    log::warn!("Login failed: {}", e);
                    set_error_message.set(Some(login_error_message(&e)));
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"RamTech"</h1>
                <h2>"Sign in to the admin panel"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            type="text"
                            id="username"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
