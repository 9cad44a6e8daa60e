use serde::{Deserialize, Serialize};

use crate::domain::common::{text_or, Draft, Entity};
use crate::shared::lenient;
use crate::shared::validation::{Validate, ValidationError};

pub const SALE_STATUSES: [&str; 3] = ["Completed", "Pending", "Cancelled"];
pub const PAYMENT_METHODS: [&str; 3] = ["Cash", "Mobile Money", "Card"];

pub const DEFAULT_SALE_STATUS: &str = "Completed";
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(deserialize_with = "lenient::id")]
    pub sale_id: i64,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub customer_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub product_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub unit_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub total_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub sale_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub status: Option<String>,
}

impl Entity for Sale {
    type Draft = SaleDraft;

    const PLURAL: &'static str = "sales";
    const SINGULAR: &'static str = "sale";
    const LABEL: &'static str = "Sale";

    fn id(&self) -> i64 {
        self.sale_id
    }

    /// Only the free-standing fields; customer and product names need the
    /// lookup collections and are matched by the sales page.
    fn search_fields(&self) -> Vec<&str> {
        [&self.payment_method, &self.status]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .collect()
    }

    /// Status as displayed, so a sale without one files under the default.
    fn category(&self) -> Option<&str> {
        Some(text_or(self.status.as_deref(), DEFAULT_SALE_STATUS))
    }

    fn display_name(&self) -> String {
        format!("sale {}", self.sale_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDraft {
    pub customer_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_amount: f64,
    /// `YYYY-MM-DD`
    pub sale_date: String,
    pub payment_method: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_id: Option<i64>,
}

impl SaleDraft {
    pub fn line_total(quantity: i64, unit_price: f64) -> f64 {
        quantity as f64 * unit_price
    }
}

impl Validate for SaleDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.customer_id <= 0 || self.product_id <= 0 || self.quantity <= 0 {
            return Err(ValidationError::new(
                "quantity",
                "Customer, Product, and valid Quantity are required",
            ));
        }
        if self.unit_price <= 0.0 {
            return Err(ValidationError::new(
                "unit_price",
                "Unit price must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Draft for SaleDraft {
    fn set_id(&mut self, id: i64) {
        self.sale_id = Some(id);
    }
}
