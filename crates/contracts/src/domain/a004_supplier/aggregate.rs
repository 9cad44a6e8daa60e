use serde::{Deserialize, Serialize};

use crate::domain::common::{full_name, Draft, Entity};
use crate::shared::lenient;
use crate::shared::validation::{require, Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(deserialize_with = "lenient::id")]
    pub supplier_id: i64,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub f_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub l_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub product_supplied: Option<String>,
}

impl Supplier {
    pub fn full_name(&self) -> String {
        full_name(self.f_name.as_deref(), self.l_name.as_deref())
    }
}

impl Entity for Supplier {
    type Draft = SupplierDraft;

    const PLURAL: &'static str = "suppliers";
    const SINGULAR: &'static str = "supplier";
    const LABEL: &'static str = "Supplier";

    fn id(&self) -> i64 {
        self.supplier_id
    }

    fn search_fields(&self) -> Vec<&str> {
        [
            &self.f_name,
            &self.l_name,
            &self.contact,
            &self.email,
            &self.address,
            &self.product_supplied,
        ]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .collect()
    }

    fn display_name(&self) -> String {
        self.full_name()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierDraft {
    pub f_name: String,
    pub l_name: String,
    pub contact: String,
    pub email: String,
    pub address: String,
    pub product_supplied: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
}

impl Validate for SupplierDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.f_name, "f_name", "First name")
    }
}

impl Draft for SupplierDraft {
    fn set_id(&mut self, id: i64) {
        self.supplier_id = Some(id);
    }
}
