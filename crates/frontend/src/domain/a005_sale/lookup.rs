//! Customer and product names for the sales page.
//!
//! Sales only carry foreign keys; the table, the search box and the form
//! selects all resolve them through this lookup.

use contracts::domain::a001_customer::aggregate::Customer;
use contracts::domain::a003_product::aggregate::Product;
use contracts::domain::common::Entity;

use crate::shared::api_client::ApiClient;
use crate::shared::error::ApiError;
use crate::shared::form::SelectOption;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductEntry {
    pub id: i64,
    pub name: String,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleLookup {
    /// `(customer_id, full name)`
    pub customers: Vec<(i64, String)>,
    pub products: Vec<ProductEntry>,
}

impl SaleLookup {
    pub fn new(customers: &[Customer], products: &[Product]) -> Self {
        Self {
            customers: customers
                .iter()
                .map(|c| (c.customer_id, c.display_name()))
                .collect(),
            products: products
                .iter()
                .map(|p| ProductEntry {
                    id: p.product_id,
                    name: p.display_name(),
                    price: p.unit_price,
                })
                .collect(),
        }
    }

    /// Both collections are needed; either failing fails the page load.
    pub async fn fetch(api: &ApiClient) -> Result<Self, ApiError> {
        let (customers, products) = futures::try_join!(
            api.fetch_collection::<Customer>(),
            api.fetch_collection::<Product>()
        )?;
        log::debug!(
            "sale lookup: {} customers, {} products",
            customers.records.len(),
            products.records.len()
        );
        Ok(Self::new(&customers.records, &products.records))
    }

    pub fn customer_name(&self, id: Option<i64>) -> Option<&str> {
        let id = id?;
        self.customers
            .iter()
            .find(|(cid, _)| *cid == id)
            .map(|(_, name)| name.as_str())
    }

    pub fn product(&self, id: Option<i64>) -> Option<&ProductEntry> {
        let id = id?;
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_name(&self, id: Option<i64>) -> Option<&str> {
        self.product(id).map(|p| p.name.as_str())
    }

    pub fn customer_options(&self) -> Vec<SelectOption> {
        self.customers
            .iter()
            .map(|(id, name)| SelectOption::new(id.to_string(), name.clone()))
            .collect()
    }

    pub fn product_options(&self) -> Vec<SelectOption> {
        self.products
            .iter()
            .map(|p| SelectOption::new(p.id.to_string(), p.name.clone()))
            .collect()
    }
}
