use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::summary::{fetch_overview, format_count, format_revenue, recent_customer_cells, OverviewSummary};
use crate::shared::context::use_api;
use crate::shared::icons::icon;
use crate::shared::notify;

#[component]
fn StatCard(label: &'static str, icon_name: &'static str, value: Signal<String>) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__body">
                <span class="stat-card__value">{move || value.get()}</span>
                <span class="stat-card__label">{label}</span>
            </div>
        </div>
    }
}

/// Overview dashboard: collection counters, revenue and recent customers
#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let api = StoredValue::new_local(use_api());
    let (summary, set_summary) = signal(OverviewSummary::default());
    let (loading, set_loading) = signal(false);

    let load = move || {
        let api = api.get_value();
        set_loading.set(true);
        spawn_local(async move {
            let (loaded, errors) = fetch_overview(&api).await;
            if !errors.is_empty() {
                notify::alert("Error loading data. Please check your Database server.");
            }
            set_summary.set(loaded);
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let count = move |pick: fn(&OverviewSummary) -> Option<u64>| {
        Signal::derive(move || summary.with(|s| format_count(pick(s))))
    };
    let revenue = Signal::derive(move || summary.with(|s| format_revenue(s.revenue)));

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("dashboard")}
                    <h1 class="page__title">"Dashboard"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="stat-grid">
                <StatCard label="Customers" icon_name="customers" value=count(|s| s.customers) />
                <StatCard label="Products" icon_name="products" value=count(|s| s.products) />
                <StatCard label="Sales" icon_name="sales" value=count(|s| s.sales) />
                <StatCard label="Employees" icon_name="employees" value=count(|s| s.employees) />
                <StatCard label="Suppliers" icon_name="suppliers" value=count(|s| s.suppliers) />
                <StatCard label="Revenue" icon_name="sales" value=revenue />
            </div>

            <h2 class="page__subtitle">"Recent customers"</h2>
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"ID"</TableHeaderCell>
                        <TableHeaderCell>"Name"</TableHeaderCell>
                        <TableHeaderCell>"Contact"</TableHeaderCell>
                        <TableHeaderCell>"Email"</TableHeaderCell>
                        <TableHeaderCell>"Type"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || summary.get().recent_customers
                        key=|c| c.customer_id
                        children=move |c| {
                            let [id, name, contact, email, kind] = recent_customer_cells(&c);
                            view! {
                                <TableRow>
                                    <TableCell>{id}</TableCell>
                                    <TableCell>{name}</TableCell>
                                    <TableCell>{contact}</TableCell>
                                    <TableCell>{email}</TableCell>
                                    <TableCell>{kind}</TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
        </div>
    }
}
