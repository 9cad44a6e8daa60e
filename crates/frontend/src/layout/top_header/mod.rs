//! TopHeader component - application top navigation bar.
//!
//! Sidebar toggle, title of the active page, signed-in user and logout.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::context::use_api;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let auth = use_auth();
    let api = StoredValue::new_local(use_api());

    let is_sidebar_visible = move || ctx.left_open.get();
    let logout = move |_| do_logout(api.get_value(), auth);

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {move || if is_sidebar_visible() {
                        icon("chevrons-left")
                    } else {
                        icon("chevrons-right")
                    }}
                </button>
                <span class="top-header__title">"RamTech Admin"</span>
                <span class="top-header__page">{move || ctx.active.get().label()}</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("users")}
                    <span>
                        {move || auth.user().map(|u| u.display_name()).unwrap_or_else(|| "Guest".to_string())}
                    </span>
                    <span class="top-header__role">
                        {move || auth.user().and_then(|u| u.role).unwrap_or_default()}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Logout">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
