use serde::{Deserialize, Serialize};

/// Wrapper the backend puts around every JSON response:
/// `{ success, data, message, count }`. Every member is optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: Option<bool>,
    pub data: Option<T>,
    pub message: Option<String>,
    pub count: Option<u64>,
}

impl<T> ApiEnvelope<T> {
    /// Envelope synthesised for bodies that carry no JSON at all
    /// (the delete endpoints answer 204 on some deployments).
    pub fn empty(success: bool) -> Self {
        Self {
            success: Some(success),
            data: None,
            message: None,
            count: None,
        }
    }

    /// `success: false` was sent explicitly.
    pub fn is_rejected(&self) -> bool {
        self.success == Some(false)
    }

    /// Server-provided message, ignoring blank strings.
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}
