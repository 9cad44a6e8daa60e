//! Form descriptors and `FormValues -> Draft` conversion.
//!
//! Every entity page renders the same modal; what differs is the list of
//! fields and how raw input strings become a typed draft.

use async_trait::async_trait;
use contracts::domain::common::Entity;
use contracts::shared::validation::ValidationError;
use std::collections::BTreeMap;

use super::api_client::ApiClient;
use super::error::ApiError;

/// Raw input strings keyed by field key.
pub type FormValues = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Options whose label is the value itself.
    pub fn plain(values: &[&str]) -> Vec<Self> {
        values.iter().map(|v| Self::new(*v, *v)).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Date,
    Password,
    Select(Vec<SelectOption>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Computed by the form, not typed by the user
    pub readonly: bool,
}

impl FormField {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            readonly: false,
        }
    }

    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }
}

/// Trimmed text, empty when the key is missing.
pub fn text(values: &FormValues, key: &str) -> String {
    values.get(key).map(|v| v.trim().to_string()).unwrap_or_default()
}

/// `None` for missing or blank input.
pub fn optional_text(values: &FormValues, key: &str) -> Option<String> {
    Some(text(values, key)).filter(|v| !v.is_empty())
}

/// Invalid or missing numbers read as 0.
pub fn number(values: &FormValues, key: &str) -> f64 {
    text(values, key)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Whole number; fractional input is truncated, invalid input reads as 0.
pub fn integer(values: &FormValues, key: &str) -> i64 {
    let raw = text(values, key);
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
        .unwrap_or(0)
}

/// Positive identifier chosen in a select, if any.
pub fn reference(values: &FormValues, key: &str) -> Option<i64> {
    Some(integer(values, key)).filter(|id| *id > 0)
}

/// Render a number the way it is typed back into an input.
pub fn number_input(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

/// Binds an entity to the shared add/edit modal.
#[async_trait(?Send)]
pub trait EntityForm: Entity {
    /// Lookup data the form and table need besides the collection itself
    type Context: Default + Clone + 'static;

    async fn load_context(_api: &ApiClient) -> Result<Self::Context, ApiError> {
        Ok(Self::Context::default())
    }

    fn form_fields(ctx: &Self::Context, editing: bool) -> Vec<FormField>;

    /// Values of an empty "Add" form, defaults included.
    fn blank_form(ctx: &Self::Context) -> FormValues;

    /// Values of the "Edit" form for this record.
    fn form_values(&self) -> FormValues;

    fn draft_from_form(
        values: &FormValues,
        ctx: &Self::Context,
    ) -> Result<Self::Draft, ValidationError>;

    /// Hook for dependent fields; `key` is the field that just changed.
    fn form_changed(_values: &mut FormValues, _key: &str, _ctx: &Self::Context) {}
}

/// Shorthand for building [`FormValues`] in `blank_form`/`form_values`.
pub fn values<const N: usize>(pairs: [(&'static str, String); N]) -> FormValues {
    pairs.into_iter().collect()
}
