//! HTTP transport to the Unreal Editor Python listener.
//!
//! The listener accepts `POST /` with a `{"type": "<namespace>.<verb>",
//! "params": {...}}` envelope and replies with a JSON object that always
//! carries a `success` boolean. `GET /` returns a status document while the
//! listener is up, which is what [`Bridge::probe`] checks.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Shared connect timeout for all listener requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Request timeout for ordinary commands.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Longer timeout for slow commands (screenshots, batch spawns).
const SLOW_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
/// Probe timeout. A live listener answers its status endpoint immediately.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Failure modes of a listener round trip.
///
/// `Offline` means the command may never have reached the editor; `Remote`
/// means the editor received it and reported failure. Callers surface these
/// differently ("service offline" vs the remote error verbatim), so the
/// distinction must survive all the way up.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The listener is unreachable, timed out, or answered with garbage.
    #[error("Unreal Editor listener offline: {0}")]
    Offline(String),

    /// The listener executed the command and reported `success: false`.
    /// Carries the remote `error` string verbatim.
    #[error("{0}")]
    Remote(String),
}

/// HTTP client for the editor listener. Stateless between calls; cheap to
/// clone (reqwest clients share their connection pool).
#[derive(Clone)]
pub struct Bridge {
    base_url: String,
    client: reqwest::Client,
    slow_client: reqwest::Client,
}

impl Bridge {
    /// Build a bridge targeting `http://{host}:{port}/`.
    pub fn new(host: &str, port: u16) -> Result<Self, BridgeError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BridgeError::Offline(format!("failed to build HTTP client: {e}")))?;
        let slow_client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(SLOW_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BridgeError::Offline(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: format!("http://{host}:{port}/"),
            client,
            slow_client,
        })
    }

    /// The listener URL this bridge targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a command and return the response body on `success: true`.
    ///
    /// A `success: false` reply becomes [`BridgeError::Remote`] with the
    /// remote error string unmodified.
    pub async fn send(&self, command_type: &str, params: Value) -> Result<Value, BridgeError> {
        let body = self.send_raw(command_type, params).await?;
        if body.get("success").and_then(Value::as_bool).unwrap_or(false) {
            Ok(body)
        } else {
            let msg = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("command failed with no error message")
                .to_string();
            Err(BridgeError::Remote(msg))
        }
    }

    /// Send a command and return the parsed body regardless of its
    /// `success` flag. The batch executor uses this to record per-item
    /// outcomes without converting them into errors.
    pub async fn send_raw(
        &self,
        command_type: &str,
        mut params: Value,
    ) -> Result<Value, BridgeError> {
        // The listener forwards every present key to its handler, so a
        // null would clobber the handler's default. Absent means default.
        if let Value::Object(map) = &mut params {
            map.retain(|_, v| !v.is_null());
        }

        let client = if is_slow_command(command_type) {
            &self.slow_client
        } else {
            &self.client
        };

        tracing::debug!(command = command_type, "sending command to listener");

        let resp = client
            .post(&self.base_url)
            .json(&serde_json::json!({ "type": command_type, "params": params }))
            .send()
            .await
            .map_err(|e| BridgeError::Offline(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| BridgeError::Offline(e.to_string()))?;

        if !status.is_success() {
            return Err(BridgeError::Offline(format!(
                "listener returned HTTP {status}: {text}"
            )));
        }

        serde_json::from_str(&text)
            .map_err(|e| BridgeError::Offline(format!("unparsable listener response: {e}")))
    }

    /// Check whether the listener is up by hitting its status endpoint.
    /// Returns the status document, or `Offline` if nothing answered.
    pub async fn probe(&self) -> Result<Value, BridgeError> {
        let client = reqwest::Client::builder()
            .connect_timeout(PROBE_TIMEOUT)
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| BridgeError::Offline(e.to_string()))?;

        let resp = client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| BridgeError::Offline(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(BridgeError::Offline(format!(
                "status endpoint returned HTTP {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| BridgeError::Offline(format!("unparsable status response: {e}")))
    }
}

/// Commands that routinely exceed the default request timeout inside the
/// editor (viewport captures, bulk spawns).
fn is_slow_command(command_type: &str) -> bool {
    matches!(command_type, "viewport.screenshot" | "actor.batch_spawn")
}
