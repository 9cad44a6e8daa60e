//! Typed access to the REST backend.
//!
//! Every response goes through [`read_envelope`], which maps transport
//! status, content type and the `{success, data, message}` envelope onto
//! [`ApiError`].

use contracts::domain::common::Entity;
use contracts::shared::envelope::ApiEnvelope;
use contracts::system::users::UserStatusUpdate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

use super::api_utils::api_url;
use super::config::ClientConfig;
use super::error::ApiError;
use super::http::{BrowserTransport, HttpRequest, HttpResponse, Method, Transport};
use crate::system::auth::storage::Session;

/// One fetched collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<E> {
    pub records: Vec<E>,
    /// Total reported by the backend, if any
    pub count: Option<u64>,
}

struct Inner {
    transport: Rc<dyn Transport>,
    base_url: String,
    session: Session,
    on_unauthorized: RefCell<Option<Rc<dyn Fn()>>>,
}

/// Cheap to clone; all clones share the transport, session and 401 hook.
#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<Inner>,
}

impl ApiClient {
    pub fn new(transport: Rc<dyn Transport>, base_url: impl Into<String>, session: Session) -> Self {
        Self {
            inner: Rc::new(Inner {
                transport,
                base_url: base_url.into(),
                session,
                on_unauthorized: RefCell::new(None),
            }),
        }
    }

    pub fn browser(config: &ClientConfig) -> Self {
        Self::new(
            Rc::new(BrowserTransport::new(config.request_timeout())),
            config.api.base_url.clone(),
            Session::browser(),
        )
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Called after a 401 has cleared the session.
    pub fn on_unauthorized(&self, handler: impl Fn() + 'static) {
        *self.inner.on_unauthorized.borrow_mut() = Some(Rc::new(handler));
    }

    pub fn url(&self, path: &str) -> String {
        api_url(&self.inner.base_url, path)
    }

    fn handle_unauthorized(&self) {
        log::warn!("Backend rejected the session, clearing stored credentials");
        self.inner.session.clear();
        let handler = self.inner.on_unauthorized.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        authenticated: bool,
    ) -> Result<HttpResponse, ApiError> {
        let mut request =
            HttpRequest::new(method, self.url(path)).header("Accept", "application/json");
        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }
        if authenticated {
            let Some(token) = self.inner.session.access_token() else {
                self.handle_unauthorized();
                return Err(ApiError::Unauthorized);
            };
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        log::debug!("{} {}", method.as_str(), request.url);
        let response = self.inner.transport.send(request).await?;
        log::debug!("{} {} -> {}", method.as_str(), path, response.status);

        if authenticated && response.status == 401 {
            self.handle_unauthorized();
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        fallback: &str,
        authenticated: bool,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let response = self.send(Method::Get, path, None, authenticated).await?;
        read_envelope(&response, fallback, false)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
        authenticated: bool,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let response = self
            .send(Method::Post, path, Some(to_json(body)?), authenticated)
            .await?;
        read_envelope(&response, fallback, false)
    }

    pub async fn fetch_collection<E: Entity>(&self) -> Result<Listing<E>, ApiError> {
        let failure = format!("Failed to load {}", E::PLURAL);
        let response = self
            .send(Method::Get, &E::list_path(), None, E::REQUIRES_AUTH)
            .await?;
        let envelope: ApiEnvelope<Vec<E>> = read_envelope(&response, &failure, false)?;
        let count = envelope.count;
        match envelope.data {
            Some(records) => Ok(Listing { records, count }),
            None => Err(ApiError::Server(
                envelope.message().map(str::to_string).unwrap_or(failure),
            )),
        }
    }

    pub async fn create<E: Entity>(&self, draft: &E::Draft) -> Result<(), ApiError> {
        let response = self
            .send(Method::Post, &E::create_path(), Some(to_json(draft)?), E::REQUIRES_AUTH)
            .await?;
        read_envelope::<Value>(&response, &format!("Failed to save {}", E::SINGULAR), false)?;
        Ok(())
    }

    pub async fn update<E: Entity>(&self, id: i64, draft: &E::Draft) -> Result<(), ApiError> {
        let response = self
            .send(Method::Put, &E::update_path(id), Some(to_json(draft)?), E::REQUIRES_AUTH)
            .await?;
        read_envelope::<Value>(&response, &format!("Failed to save {}", E::SINGULAR), false)?;
        Ok(())
    }

    pub async fn delete<E: Entity>(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .send(Method::Delete, &E::delete_path(id), None, E::REQUIRES_AUTH)
            .await?;
        read_envelope::<Value>(&response, &format!("Failed to delete {}", E::SINGULAR), true)?;
        Ok(())
    }

    pub async fn set_active<E: Entity>(&self, id: i64, active: bool) -> Result<(), ApiError> {
        let Some(path) = E::status_path(id) else {
            return Err(ApiError::Server(format!(
                "{} records have no status to change",
                E::LABEL
            )));
        };
        let body = to_json(&UserStatusUpdate { is_active: active })?;
        let response = self
            .send(Method::Patch, &path, Some(body), E::REQUIRES_AUTH)
            .await?;
        read_envelope::<Value>(&response, &format!("Failed to update {} status", E::SINGULAR), false)?;
        Ok(())
    }
}

fn to_json<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::Format(format!("Failed to serialize request: {}", e)))
}

/// Interpret a response as an envelope.
///
/// - non-JSON: `Network` when non-2xx, `Format` when 2xx (unless the body is
///   empty and `allow_empty` is set, as for deletes)
/// - JSON that does not parse: `Network` when non-2xx, `Format` otherwise
/// - non-2xx JSON or `success: false`: `Server` with the backend message or
///   `fallback`
pub fn read_envelope<T: DeserializeOwned>(
    response: &HttpResponse,
    fallback: &str,
    allow_empty: bool,
) -> Result<ApiEnvelope<T>, ApiError> {
    if allow_empty && response.ok() && response.body.trim().is_empty() {
        return Ok(ApiEnvelope::empty(true));
    }

    if !response.is_json() {
        if !response.ok() {
            return Err(ApiError::Network(format!(
                "Server returned {}: {}",
                response.status, response.status_text
            )));
        }
        if allow_empty {
            log::debug!("Non-JSON response treated as success: {}", preview(&response.body));
            return Ok(ApiEnvelope::empty(true));
        }
        log::error!("Non-JSON response: {}", preview(&response.body));
        return Err(ApiError::Format(format!(
            "Server returned {}: {}. Check if endpoint exists.",
            response.status, response.status_text
        )));
    }

    let envelope: ApiEnvelope<T> = match serde_json::from_str(&response.body) {
        Ok(envelope) => envelope,
        Err(e) if !response.ok() => {
            log::warn!("Unreadable error body ({}): {}", e, preview(&response.body));
            return Err(ApiError::Network(format!(
                "HTTP error! Status: {}",
                response.status
            )));
        }
        Err(e) => return Err(ApiError::Format(format!("Invalid JSON response: {}", e))),
    };

    if !response.ok() || envelope.is_rejected() {
        return Err(ApiError::Server(
            envelope
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        ));
    }
    Ok(envelope)
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
