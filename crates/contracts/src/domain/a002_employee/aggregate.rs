use serde::{Deserialize, Serialize};

use crate::domain::common::{full_name, Draft, Entity};
use crate::shared::lenient;
use crate::shared::validation::{require, Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(deserialize_with = "lenient::id")]
    pub employee_id: i64,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub f_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub l_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub salary: Option<f64>,
    /// ISO date or datetime string
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub hire_date: Option<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        full_name(self.f_name.as_deref(), self.l_name.as_deref())
    }
}

impl Entity for Employee {
    type Draft = EmployeeDraft;

    const PLURAL: &'static str = "employees";
    const SINGULAR: &'static str = "employee";
    const LABEL: &'static str = "Employee";

    fn id(&self) -> i64 {
        self.employee_id
    }

    fn search_fields(&self) -> Vec<&str> {
        [&self.f_name, &self.l_name, &self.position, &self.contact]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .collect()
    }

    fn display_name(&self) -> String {
        self.full_name()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub f_name: String,
    pub l_name: String,
    pub contact: String,
    pub position: String,
    pub salary: f64,
    /// `null` when the form leaves the date empty
    pub hire_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
}

impl Validate for EmployeeDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.f_name, "f_name", "First name")?;
        require(&self.l_name, "l_name", "Last name")
    }
}

impl Draft for EmployeeDraft {
    fn set_id(&mut self, id: i64) {
        self.employee_id = Some(id);
    }
}
