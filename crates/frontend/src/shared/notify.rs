//! Blocking user notifications

use super::error::ApiError;

/// Text shown to the user for a failed operation. Validation problems are
/// shown as-is; everything else is prefixed with what was being attempted.
pub fn user_message(context: &str, err: &ApiError) -> String {
    match err {
        ApiError::Validation(v) => v.message.clone(),
        ApiError::Unauthorized => err.to_string(),
        _ => format!("{}: {}", context, err),
    }
}

/// `window.alert`; falls back to the log outside a browser.
pub fn alert(message: &str) {
    match web_sys::window() {
        Some(window) => {
            if let Err(e) = window.alert_with_message(message) {
                log::warn!("alert failed: {:?}", e);
            }
        }
        None => log::warn!("{}", message),
    }
}

/// Alert the user about `err` and return the text for the inline banner.
pub fn report(context: &str, err: &ApiError) -> String {
    let message = user_message(context, err);
    alert(&message);
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::validation::ValidationError;

    #[test]
    fn test_user_message() {
        let v = ApiError::Validation(ValidationError::new("F_name", "First name is required!"));
        assert_eq!(user_message("Error saving customer", &v), "First name is required!");

        let s = ApiError::Server("Duplicate email".into());
        assert_eq!(user_message("Error", &s), "Error: Duplicate email");

        assert_eq!(
            user_message("Error", &ApiError::Unauthorized),
            "Session expired. Please login again."
        );

        let n = ApiError::Network("Request timed out after 15s".into());
        assert_eq!(
            user_message("Error loading customers", &n),
            "Error loading customers: Network error: Request timed out after 15s"
        );
    }
}
