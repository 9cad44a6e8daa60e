use crate::dashboards::OverviewDashboard;
use crate::domain::a001_customer::ui::list::CustomerList;
use crate::domain::a002_employee::ui::list::EmployeeList;
use crate::domain::a003_product::ui::list::ProductList;
use crate::domain::a004_supplier::ui::list::SupplierList;
use crate::domain::a005_sale::ui::list::SaleList;
use crate::layout::global_context::{AppGlobalContext, AppPage};
use crate::system::users::ui::list::UserList;
use leptos::prelude::*;

fn render_page(page: AppPage) -> AnyView {
    match page {
        AppPage::Dashboard => view! { <OverviewDashboard /> }.into_any(),
        AppPage::Customers => view! { <CustomerList /> }.into_any(),
        AppPage::Employees => view! { <EmployeeList /> }.into_any(),
        AppPage::Products => view! { <ProductList /> }.into_any(),
        AppPage::Suppliers => view! { <SupplierList /> }.into_any(),
        AppPage::Sales => view! { <SaleList /> }.into_any(),
        AppPage::Users => view! { <UserList /> }.into_any(),
    }
}

/// Active page; switching pages builds a fresh page with its own controller.
#[component]
pub fn Center() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    view! {
        <div data-zone="center" class="app-main__content" style="flex: 1; overflow: auto;">
            {move || render_page(ctx.active.get())}
        </div>
    }
}
