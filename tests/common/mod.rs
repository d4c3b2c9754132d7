#![allow(dead_code)]

//! Shared test fixture: a mock editor listener.
//!
//! Serves the same surface the Unreal-side Python listener does — a
//! status document on `GET /` and command dispatch on `POST /` — with a
//! programmable responder, and records every command it receives so tests
//! can assert on order and payload.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

use uebridge::bridge::Bridge;

/// Responds to a command: gets the command type and params, returns the
/// body the listener would send back.
pub type Responder = Arc<dyn Fn(&str, &Value) -> Value + Send + Sync>;

#[derive(Clone)]
struct ListenerState {
    requests: Arc<Mutex<Vec<Value>>>,
    responder: Responder,
}

pub struct MockListener {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockListener {
    /// A bridge pointed at this listener.
    pub fn bridge(&self) -> Bridge {
        Bridge::new("127.0.0.1", self.addr.port()).unwrap()
    }

    /// All command bodies received so far, in arrival order.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().clone()
    }

    /// The `type` field of each received command, in arrival order.
    pub fn command_types(&self) -> Vec<String> {
        self.requests
            .lock()
            .iter()
            .filter_map(|req| req.get("type").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }
}

/// Start a mock listener on an ephemeral port.
pub async fn start_mock_listener(responder: Responder) -> MockListener {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = ListenerState {
        requests: requests.clone(),
        responder,
    };

    let app = Router::new()
        .route("/", get(status_handler).post(command_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start
    tokio::time::sleep(Duration::from_millis(10)).await;

    MockListener { addr, requests }
}

/// A listener that answers `success: true` to everything, echoing the
/// command type back in the body.
pub async fn start_ok_listener() -> MockListener {
    start_mock_listener(Arc::new(|command, _params| {
        json!({ "success": true, "command": command })
    }))
    .await
}

async fn status_handler() -> Json<Value> {
    Json(json!({
        "status": "online",
        "service": "Unreal Editor listener",
        "version": "test",
    }))
}

async fn command_handler(
    State(state): State<ListenerState>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.requests.lock().push(body.clone());
    let command = body.get("type").and_then(Value::as_str).unwrap_or("");
    let params = body.get("params").cloned().unwrap_or_else(|| json!({}));
    Json((state.responder)(command, &params))
}

/// A port nothing is listening on. Binds and immediately drops a listener
/// so the port is free (and very unlikely to be reused before the test
/// connects).
pub async fn unused_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}
