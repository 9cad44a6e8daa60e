use contracts::domain::a001_customer::aggregate::{Customer, CUSTOMER_TYPES};
use leptos::prelude::*;

use crate::shared::components::entity_list::EntityListPage;
use crate::shared::context::use_list_controller;

#[component]
pub fn CustomerList() -> impl IntoView {
    let controller = use_list_controller::<Customer>();

    view! {
        <EntityListPage
            controller=controller
            title="Customers"
            category_label="Type"
            category_options=CUSTOMER_TYPES.iter().map(|t| t.to_string()).collect()
            search_placeholder="Name, email or contact..."
        />
    }
}
