use contracts::domain::a003_product::aggregate::{Product, DEFAULT_PRODUCT_CATEGORY};
use leptos::prelude::*;

use crate::shared::components::entity_list::EntityListPage;
use crate::shared::context::use_list_controller;

#[component]
pub fn ProductList() -> impl IntoView {
    let controller = use_list_controller::<Product>();

    view! {
        <EntityListPage
            controller=controller
            title="Products"
            category_label="Category"
            category_options=vec![DEFAULT_PRODUCT_CATEGORY.to_string()]
            search_placeholder="Name, description or category..."
        />
    }
}
