//! Stub budget service for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

/// A POST the stub received
#[derive(Debug, Clone)]
pub struct ReceivedPost {
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Default)]
pub struct ServiceState {
    pub records: Mutex<Vec<Value>>,
    pub list_failure: Mutex<Option<u16>>,
    pub create_failure: Mutex<Option<u16>>,
    pub raw_list_body: Mutex<Option<String>>,
    pub gets: Mutex<usize>,
    pub posts: Mutex<Vec<ReceivedPost>>,
    pub patches: Mutex<Vec<ReceivedPost>>,
}

impl ServiceState {
    pub fn with_records(records: Vec<Value>) -> Arc<Self> {
        let state = Self::default();
        *state.records.lock().unwrap() = records;
        Arc::new(state)
    }

    pub fn posts(&self) -> Vec<ReceivedPost> {
        self.posts.lock().unwrap().clone()
    }

    pub fn patches(&self) -> Vec<ReceivedPost> {
        self.patches.lock().unwrap().clone()
    }

    pub fn gets(&self) -> usize {
        *self.gets.lock().unwrap()
    }
}

pub fn record(id: &str, budget: f64, created_at: &str) -> Value {
    json!({
        "id": id,
        "budget": budget,
        "created_at": created_at,
        "updated_at": null,
    })
}

fn error_response(status: u16) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({"detail": "stub failure"}))).into_response()
}

async fn list(State(state): State<Arc<ServiceState>>) -> Response {
    *state.gets.lock().unwrap() += 1;

    if let Some(status) = *state.list_failure.lock().unwrap() {
        return error_response(status);
    }
    if let Some(raw) = state.raw_list_body.lock().unwrap().clone() {
        return ([(CONTENT_TYPE, "application/json")], raw).into_response();
    }
    Json(Value::Array(state.records.lock().unwrap().clone())).into_response()
}

fn received(headers: &HeaderMap, body: &str) -> ReceivedPost {
    ReceivedPost {
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_string(),
    }
}

fn amount(body: &str) -> Option<f64> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    match value.get("budget")? {
        Value::String(s) => s.parse().ok(),
        other => other.as_f64(),
    }
}

async fn create(
    State(state): State<Arc<ServiceState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.posts.lock().unwrap().push(received(&headers, &body));

    if let Some(status) = *state.create_failure.lock().unwrap() {
        return error_response(status);
    }

    let id = format!("created-{}", state.posts.lock().unwrap().len());
    let budget = amount(&body).unwrap_or(0.0);
    state
        .records
        .lock()
        .unwrap()
        .push(record(&id, budget, "2024-11-07T10:00:00"));

    Json(json!({ "id": id })).into_response()
}

async fn show(State(state): State<Arc<ServiceState>>, Path(id): Path<String>) -> Response {
    let records = state.records.lock().unwrap();
    match records.iter().find(|r| r["id"] == id.as_str()) {
        Some(record) => Json(record.clone()).into_response(),
        None => error_response(404),
    }
}

async fn update(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    state.patches.lock().unwrap().push(received(&headers, &body));

    let Some(budget) = amount(&body) else {
        return error_response(422);
    };
    let mut records = state.records.lock().unwrap();
    match records.iter_mut().find(|r| r["id"] == id.as_str()) {
        Some(record) => {
            record["budget"] = json!(budget);
            record["updated_at"] = json!("2024-11-08T09:30:00");
            Json(json!({ "success": true })).into_response()
        }
        None => error_response(404),
    }
}

async fn delete(State(state): State<Arc<ServiceState>>, Path(id): Path<String>) -> Response {
    let mut records = state.records.lock().unwrap();
    let before = records.len();
    records.retain(|r| r["id"] != id.as_str());
    if records.len() == before {
        error_response(404)
    } else {
        Json(json!({ "success": true })).into_response()
    }
}

fn router(state: Arc<ServiceState>) -> Router {
    Router::new()
        .route("/v1/budgets", get(list).post(create))
        .route("/v1/budgets/:id", get(show).patch(update).delete(delete))
        .with_state(state)
}

/// Serve the stub on the current runtime, returning its base URL
pub async fn serve(state: Arc<ServiceState>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Serve the stub on a background thread with its own runtime
pub fn serve_in_background(state: Arc<ServiceState>) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, router(state)).await.unwrap();
        });
    });

    format!("http://{}", addr)
}

/// A base URL nothing is listening on
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
