use contracts::domain::a004_supplier::aggregate::Supplier;
use leptos::prelude::*;

use crate::shared::components::entity_list::EntityListPage;
use crate::shared::context::use_list_controller;

#[component]
pub fn SupplierList() -> impl IntoView {
    let controller = use_list_controller::<Supplier>();

    view! {
        <EntityListPage
            controller=controller
            title="Suppliers"
            search_placeholder="Name, contact, address or product..."
        />
    }
}
