//! Common traits for all managed entities

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use crate::shared::validation::Validate;

/// Body of a create (POST) or update (PUT) request.
pub trait Draft: Serialize + Validate + Clone + Debug {
    /// Attach the record identifier; update bodies carry it alongside the fields.
    fn set_id(&mut self, id: i64);
}

/// One managed resource type and its REST endpoints.
///
/// Endpoints follow the backend naming scheme:
/// `GET /customers/getcustomers`, `POST /customers/addcustomer`,
/// `PUT /customers/editcustomer/{id}`, `DELETE /customers/deletecustomer/{id}`.
pub trait Entity: Clone + Debug + DeserializeOwned + 'static {
    type Draft: Draft;

    /// Plural path segment, e.g. `customers`
    const PLURAL: &'static str;
    /// Singular name used in mutation endpoints, e.g. `customer`
    const SINGULAR: &'static str;
    /// Human label, e.g. `Customer`
    const LABEL: &'static str;
    /// Requests carry `Authorization: Bearer <token>`
    const REQUIRES_AUTH: bool = false;

    fn id(&self) -> i64;

    /// Values matched by the free-text search.
    fn search_fields(&self) -> Vec<&str>;

    /// Value compared by the category/status selector.
    fn category(&self) -> Option<&str> {
        None
    }

    /// Short description used in confirmation prompts.
    fn display_name(&self) -> String;

    fn list_path() -> String {
        format!("/{0}/get{0}", Self::PLURAL)
    }

    fn create_path() -> String {
        format!("/{}/add{}", Self::PLURAL, Self::SINGULAR)
    }

    fn update_path(id: i64) -> String {
        format!("/{}/edit{}/{}", Self::PLURAL, Self::SINGULAR, id)
    }

    fn delete_path(id: i64) -> String {
        format!("/{}/delete{}/{}", Self::PLURAL, Self::SINGULAR, id)
    }

    /// Endpoint toggling the active flag, for entities that have one.
    fn status_path(_id: i64) -> Option<String> {
        None
    }
}

/// Joins first and last name, skipping missing or blank parts.
pub fn full_name(first: Option<&str>, last: Option<&str>) -> String {
    [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trimmed value, or `fallback` when it is missing or blank.
pub fn text_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        assert_eq!(full_name(Some("Ann"), Some("Lee")), "Ann Lee");
        assert_eq!(full_name(Some("Ann"), None), "Ann");
        assert_eq!(full_name(None, Some(" Lee ")), "Lee");
        assert_eq!(full_name(Some(""), None), "");
    }

    #[test]
    fn test_text_or() {
        assert_eq!(text_or(Some(" Pending "), "Completed"), "Pending");
        assert_eq!(text_or(Some("  "), "Completed"), "Completed");
        assert_eq!(text_or(None, "Completed"), "Completed");
    }
}
