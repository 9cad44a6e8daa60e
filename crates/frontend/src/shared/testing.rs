//! In-memory transports for controller and client tests.

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use super::error::ApiError;
use super::http::{HttpRequest, HttpResponse, Method, Transport};

pub const BASE_URL: &str = "http://backend.test";

pub fn json_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        status_text: status_text(status).to_string(),
        content_type: Some("application/json; charset=utf-8".to_string()),
        body: body.to_string(),
    }
}

pub fn text_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        status_text: status_text(status).to_string(),
        content_type: Some("text/html".to_string()),
        body: body.to_string(),
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        _ => "Internal Server Error",
    }
}

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct QueueTransport {
    responses: RefCell<VecDeque<HttpResponse>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl QueueTransport {
    pub fn push(&self, response: HttpResponse) {
        self.responses.borrow_mut().push_back(response);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for QueueTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| ApiError::Network("no response queued".into()))
    }
}

/// Tiny REST backend following the `/P/getP`, `/P/addS`, `/P/editS/{id}`,
/// `/P/deleteS/{id}` scheme over JSON rows keyed by `{S}_id`.
#[derive(Default)]
pub struct FakeBackend {
    tables: RefCell<BTreeMap<String, Vec<Value>>>,
    next_id: Cell<i64>,
    requests: RefCell<Vec<HttpRequest>>,
    /// Served instead of the routed response for the next request
    fail_next: RefCell<Option<HttpResponse>>,
    /// Moved into `fail_next` once the next request has been routed
    fail_after_next: RefCell<Option<HttpResponse>>,
}

impl FakeBackend {
    pub fn new() -> Rc<Self> {
        let backend = Self::default();
        backend.next_id.set(100);
        Rc::new(backend)
    }

    pub fn seed(&self, plural: &str, rows: Vec<Value>) {
        self.tables.borrow_mut().insert(plural.to_string(), rows);
    }

    pub fn rows(&self, plural: &str) -> Vec<Value> {
        self.tables.borrow().get(plural).cloned().unwrap_or_default()
    }

    pub fn fail_next(&self, response: HttpResponse) {
        *self.fail_next.borrow_mut() = Some(response);
    }

    /// Routes the next request normally and serves `response` for the one after.
    pub fn fail_after_next(&self, response: HttpResponse) {
        *self.fail_after_next.borrow_mut() = Some(response);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    fn route(&self, request: &HttpRequest) -> HttpResponse {
        let path = request.url.strip_prefix(BASE_URL).unwrap_or(&request.url);
        let parts: Vec<&str> = path.trim_matches('/').split('/').collect();
        let (plural, action, id) = match parts.as_slice() {
            [plural, action] => (*plural, *action, None),
            [plural, action, id] => (*plural, *action, id.parse::<i64>().ok()),
            _ => return json_response(404, r#"{"success":false,"message":"Route not found"}"#),
        };
        let singular = plural.trim_end_matches('s');
        let id_field = format!("{}_id", singular);
        let body: Value = request
            .body
            .as_deref()
            .and_then(|b| serde_json::from_str(b).ok())
            .unwrap_or(Value::Null);

        let mut tables = self.tables.borrow_mut();
        let rows = tables.entry(plural.to_string()).or_default();
        let position = |rows: &Vec<Value>, id: i64| {
            rows.iter().position(|r| r[id_field.as_str()].as_i64() == Some(id))
        };

        match (request.method, id) {
            (Method::Get, None) if action == format!("get{}", plural) => {
                let body = json!({ "success": true, "data": rows, "count": rows.len() });
                json_response(200, &body.to_string())
            }
            (Method::Post, None) if action == format!("add{}", singular) => {
                let id = self.next_id.get();
                self.next_id.set(id + 1);
                let mut row = body;
                row[id_field.as_str()] = json!(id);
                rows.push(row.clone());
                json_response(201, &json!({ "success": true, "data": row }).to_string())
            }
            (Method::Put, Some(id)) if action == format!("edit{}", singular) => {
                match position(rows, id) {
                    Some(idx) => {
                        let mut row = body;
                        row[id_field.as_str()] = json!(id);
                        rows[idx] = row.clone();
                        json_response(200, &json!({ "success": true, "data": row }).to_string())
                    }
                    None => json_response(404, r#"{"success":false,"message":"Record not found"}"#),
                }
            }
            (Method::Delete, Some(id)) if action == format!("delete{}", singular) => {
                match position(rows, id) {
                    Some(idx) => {
                        rows.remove(idx);
                        text_response(204, "")
                    }
                    None => json_response(404, r#"{"success":false,"message":"Record not found"}"#),
                }
            }
            _ => json_response(404, r#"{"success":false,"message":"Route not found"}"#),
        }
    }
}

#[async_trait(?Send)]
impl Transport for FakeBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let forced = self.fail_next.borrow_mut().take();
        if let Some(deferred) = self.fail_after_next.borrow_mut().take() {
            *self.fail_next.borrow_mut() = Some(deferred);
        }
        let response = forced.unwrap_or_else(|| self.route(&request));
        self.requests.borrow_mut().push(request);
        Ok(response)
    }
}

/// Computes each response immediately but holds it until the test opens the
/// matching gate, so responses can be delivered out of order.
pub struct GatedTransport {
    inner: Rc<dyn Transport>,
    gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
}

impl GatedTransport {
    pub fn new(inner: Rc<dyn Transport>) -> Rc<Self> {
        Rc::new(Self {
            inner,
            gates: RefCell::new(VecDeque::new()),
        })
    }

    /// Gate for the next request sent through this transport.
    pub fn gate(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().push_back(rx);
        tx
    }
}

#[async_trait(?Send)]
impl Transport for GatedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let response = self.inner.send(request).await;
        let gate = self.gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        response
    }
}
