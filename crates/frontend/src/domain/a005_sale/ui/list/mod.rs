use contracts::domain::a005_sale::aggregate::{Sale, SALE_STATUSES};
use leptos::prelude::*;

use crate::shared::components::entity_list::EntityListPage;
use crate::shared::context::use_list_controller;

#[component]
pub fn SaleList() -> impl IntoView {
    let controller = use_list_controller::<Sale>();

    view! {
        <EntityListPage
            controller=controller
            title="Sales"
            category_label="Status"
            category_options=SALE_STATUSES.iter().map(|s| s.to_string()).collect()
            search_placeholder="Sale ID, customer or product..."
        />
    }
}
