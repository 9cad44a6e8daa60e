//! HTTP transport seam.
//!
//! The API client talks to a [`Transport`] so the list-view logic can run
//! against an in-memory backend in tests; the browser build uses
//! [`BrowserTransport`] on top of `gloo-net`.

use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use std::time::Duration;

use super::api_utils::is_json_content_type;
use super::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        is_json_content_type(self.content_type.as_deref())
    }
}

#[async_trait(?Send)]
pub trait Transport {
    /// Perform one request. Only transport-level failures are errors here;
    /// any HTTP status is returned as a response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `fetch`-based transport with a hard request timeout.
pub struct BrowserTransport {
    timeout: Duration,
}

impl BrowserTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = request.url.as_str();
        let mut builder = match request.method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Patch => Request::patch(url),
            Method::Delete => Request::delete(url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(format!("Failed to build request: {}", e)))?;

        let timeout_ms = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
        let sending = Box::pin(prepared.send());
        let deadline = Box::pin(TimeoutFuture::new(timeout_ms));
        let response = match select(sending, deadline).await {
            Either::Left((result, _)) => {
                result.map_err(|e| ApiError::Network(format!("Failed to send request: {}", e)))?
            }
            Either::Right(_) => {
                log::warn!(
                    "{} {} timed out after {}s",
                    request.method.as_str(),
                    request.url,
                    self.timeout.as_secs()
                );
                return Err(ApiError::Network(format!(
                    "Request timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
        };

        let status = response.status();
        let status_text = response.status_text();
        let content_type = response.headers().get("content-type");
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;

        Ok(HttpResponse {
            status,
            status_text,
            content_type,
            body,
        })
    }
}
