//! URL helpers for frontend-backend communication

/// Join the configured base URL and an endpoint path.
///
/// # Example
/// ```
/// use frontend::shared::api_utils::api_url;
/// assert_eq!(
///     api_url("https://api.example.com/", "/customers/getcustomers"),
///     "https://api.example.com/customers/getcustomers"
/// );
/// ```
pub fn api_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// `true` when a `Content-Type` header announces JSON.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}
