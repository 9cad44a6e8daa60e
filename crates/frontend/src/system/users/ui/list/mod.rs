use contracts::system::users::{User, USER_ROLES};
use leptos::prelude::*;

use crate::shared::components::entity_list::EntityListPage;
use crate::shared::context::use_list_controller;
use crate::system::auth::context::use_auth;

#[component]
pub fn UserList() -> impl IntoView {
    let auth = use_auth();
    let controller = use_list_controller::<User>();

    view! {
        <EntityListPage
            controller=controller
            title="Users"
            category_label="Role"
            category_options=USER_ROLES.iter().map(|r| r.to_string()).collect()
            search_placeholder="Username, name or email..."
            can_create=Signal::derive(move || auth.is_admin())
        />
    }
}
