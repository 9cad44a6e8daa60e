//! Counters and recent customers shown on the overview page.

use contracts::domain::a001_customer::aggregate::{Customer, DEFAULT_CUSTOMER_TYPE};
use contracts::domain::a002_employee::aggregate::Employee;
use contracts::domain::a003_product::aggregate::Product;
use contracts::domain::a004_supplier::aggregate::Supplier;
use contracts::domain::a005_sale::aggregate::Sale;
use contracts::domain::common::Entity;

use crate::shared::api_client::{ApiClient, Listing};
use crate::shared::error::ApiError;
use crate::shared::table::{or_default, or_na};

/// Number of customers listed under "Recent customers"
pub const RECENT_CUSTOMERS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewSummary {
    /// `None` when that collection failed to load
    pub customers: Option<u64>,
    pub products: Option<u64>,
    pub sales: Option<u64>,
    pub employees: Option<u64>,
    pub suppliers: Option<u64>,
    pub revenue: f64,
    pub recent_customers: Vec<Customer>,
}

/// Backend `count` when it is positive, otherwise the number of rows.
pub fn collection_count<E>(listing: &Listing<E>) -> u64 {
    listing
        .count
        .filter(|c| *c > 0)
        .unwrap_or(listing.records.len() as u64)
}

pub fn total_revenue(sales: &[Sale]) -> f64 {
    sales.iter().filter_map(|s| s.total_amount).sum()
}

/// `Ghc 1234.50`
pub fn format_revenue(total: f64) -> String {
    format!("Ghc {:.2}", total)
}

pub fn format_count(count: Option<u64>) -> String {
    count.unwrap_or(0).to_string()
}

fn count_of<E: Entity>(result: &Result<Listing<E>, ApiError>) -> Option<u64> {
    result.as_ref().ok().map(collection_count)
}

/// Fetch the five business collections concurrently. A failing collection
/// leaves its counter empty and is reported in the error list.
pub async fn fetch_overview(api: &ApiClient) -> (OverviewSummary, Vec<ApiError>) {
    let (customers, products, sales, employees, suppliers) = futures::join!(
        api.fetch_collection::<Customer>(),
        api.fetch_collection::<Product>(),
        api.fetch_collection::<Sale>(),
        api.fetch_collection::<Employee>(),
        api.fetch_collection::<Supplier>()
    );

    let mut summary = OverviewSummary {
        customers: count_of(&customers),
        products: count_of(&products),
        sales: count_of(&sales),
        employees: count_of(&employees),
        suppliers: count_of(&suppliers),
        ..Default::default()
    };
    if let Ok(sales) = &sales {
        summary.revenue = total_revenue(&sales.records);
    }

    let mut errors = Vec::new();
    match customers {
        Ok(listing) => {
            summary.recent_customers = listing.records.into_iter().take(RECENT_CUSTOMERS).collect()
        }
        Err(e) => errors.push(e),
    }
    errors.extend(
        [products.err(), sales.err(), employees.err(), suppliers.err()]
            .into_iter()
            .flatten(),
    );
    for e in &errors {
        log::error!("Error fetching data: {}", e);
    }
    (summary, errors)
}

/// Id, name, contact, email and type for one "Recent customers" row.
pub fn recent_customer_cells(customer: &Customer) -> [String; 5] {
    [
        customer.customer_id.to_string(),
        customer.full_name(),
        or_na(customer.contact.as_deref()),
        or_na(customer.email.as_deref()),
        or_default(customer.customer_type.as_deref(), DEFAULT_CUSTOMER_TYPE),
    ]
}
