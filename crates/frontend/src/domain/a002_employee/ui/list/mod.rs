use contracts::domain::a002_employee::aggregate::Employee;
use leptos::prelude::*;

use crate::shared::components::entity_list::EntityListPage;
use crate::shared::context::use_list_controller;

#[component]
pub fn EmployeeList() -> impl IntoView {
    let controller = use_list_controller::<Employee>();

    view! {
        <EntityListPage
            controller=controller
            title="Employees"
            search_placeholder="Name, position or contact..."
        />
    }
}
