use serde::{Deserialize, Serialize};

use crate::domain::common::{Draft, Entity};
use crate::shared::lenient;
use crate::shared::validation::{require, Validate, ValidationError};

pub const DEFAULT_PRODUCT_CATEGORY: &str = "Electrical";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "lenient::id")]
    pub product_id: i64,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub product_name: Option<String>,
    #[serde(default, alias = "description", deserialize_with = "lenient::opt_text")]
    pub product_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub unit_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub supplier_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub current_stock: Option<i64>,
}

impl Entity for Product {
    type Draft = ProductDraft;

    const PLURAL: &'static str = "products";
    const SINGULAR: &'static str = "product";
    const LABEL: &'static str = "Product";

    fn id(&self) -> i64 {
        self.product_id
    }

    fn search_fields(&self) -> Vec<&str> {
        [&self.product_name, &self.product_description, &self.category]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .collect()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn display_name(&self) -> String {
        self.product_name
            .clone()
            .unwrap_or_else(|| format!("product {}", self.product_id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub product_name: String,
    pub product_description: String,
    pub category: String,
    pub unit_price: f64,
    pub supplier_id: Option<i64>,
    pub current_stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
}

impl Validate for ProductDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.product_name, "product_name", "Product name")
    }
}

impl Draft for ProductDraft {
    fn set_id(&mut self, id: i64) {
        self.product_id = Some(id);
    }
}
