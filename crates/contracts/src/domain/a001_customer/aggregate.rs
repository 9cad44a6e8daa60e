use serde::{Deserialize, Serialize};

use crate::domain::common::{full_name, Draft, Entity};
use crate::shared::lenient;
use crate::shared::validation::{require, Validate, ValidationError};

/// Customer types offered by the form; the backend stores the spelling as-is.
pub const CUSTOMER_TYPES: [&str; 3] = ["Retailler", "Constructor", "Wholesaller"];

pub const DEFAULT_CUSTOMER_TYPE: &str = "Retailler";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(deserialize_with = "lenient::id")]
    pub customer_id: i64,
    #[serde(rename = "F_name", default, deserialize_with = "lenient::opt_text")]
    pub first_name: Option<String>,
    #[serde(rename = "L_name", default, deserialize_with = "lenient::opt_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub customer_type: Option<String>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

impl Entity for Customer {
    type Draft = CustomerDraft;

    const PLURAL: &'static str = "customers";
    const SINGULAR: &'static str = "customer";
    const LABEL: &'static str = "Customer";

    fn id(&self) -> i64 {
        self.customer_id
    }

    fn search_fields(&self) -> Vec<&str> {
        [&self.first_name, &self.last_name, &self.email, &self.contact]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .collect()
    }

    fn category(&self) -> Option<&str> {
        self.customer_type.as_deref()
    }

    fn display_name(&self) -> String {
        self.full_name()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDraft {
    #[serde(rename = "F_name")]
    pub first_name: String,
    #[serde(rename = "L_name")]
    pub last_name: String,
    pub contact: String,
    pub email: String,
    pub customer_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
}

impl Validate for CustomerDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.first_name, "F_name", "First name")
    }
}

impl Draft for CustomerDraft {
    fn set_id(&mut self, id: i64) {
        self.customer_id = Some(id);
    }
}
