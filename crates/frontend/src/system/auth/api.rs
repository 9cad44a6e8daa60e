use contracts::system::auth::{LoginData, LoginRequest, UserProfile};
use serde_json::{json, Value};

use crate::shared::api_client::ApiClient;
use crate::shared::error::ApiError;

/// Login with username and password; the session is persisted on success.
pub async fn login(api: &ApiClient, username: &str, password: &str) -> Result<UserProfile, ApiError> {
    let request = LoginRequest {
        username: username.trim().to_string(),
        password: password.to_string(),
    };
    let envelope = api
        .post::<_, LoginData>("/auth/login", &request, "Login failed", false)
        .await?;
    let data = envelope
        .data
        .ok_or_else(|| ApiError::Server("Login failed".into()))?;

    api.session().save(&data.token, &data.user);
    log::info!("Logged in as {}", data.user.display_name());
    Ok(data.user)
}

/// Text for the login form error line.
pub fn login_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Server(message) => message.clone(),
        ApiError::Validation(v) => v.message.clone(),
        _ => "Network error. Please try again.".to_string(),
    }
}

/// Best-effort server logout; the local session is always cleared.
pub async fn logout(api: &ApiClient) {
    if let Err(e) = api
        .post::<_, Value>("/auth/logout", &json!({}), "Logout failed", false)
        .await
    {
        log::warn!("Logout request failed: {}", e);
    }
    api.session().clear();
}

/// Check the stored token with the backend.
pub async fn verify(api: &ApiClient) -> Result<(), ApiError> {
    api.get::<Value>("/auth/verify", "Session verification failed", true)
        .await?;
    Ok(())
}
