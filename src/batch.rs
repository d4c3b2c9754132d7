//! Best-effort sequential batch execution.
//!
//! A batch runs its items strictly in input order, one listener round trip
//! at a time. Item N+1 never starts before item N's response arrives: the
//! editor serializes work on its own main thread, and later items may
//! depend on actors created by earlier ones. A failed item is recorded and
//! the batch keeps going — this is deliberately not a transaction.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bridge::{Bridge, BridgeError};

/// Closed set of operations a batch item may carry. Anything else is
/// rejected when the request deserializes, before any listener call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BatchOperation {
    ActorSpawn,
    ActorModify,
    ActorDelete,
    ActorDuplicate,
    ViewportCamera,
    ViewportScreenshot,
}

impl BatchOperation {
    /// The listener command type this operation translates to.
    pub fn command_type(self) -> &'static str {
        match self {
            Self::ActorSpawn => "actor.spawn",
            Self::ActorModify => "actor.modify",
            Self::ActorDelete => "actor.delete",
            Self::ActorDuplicate => "actor.duplicate",
            Self::ViewportCamera => "viewport.camera",
            Self::ViewportScreenshot => "viewport.screenshot",
        }
    }
}

/// One entry in a batch request.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct BatchItem {
    /// The operation to perform.
    pub operation: BatchOperation,
    /// Parameters for the operation, in the operation's own schema.
    #[serde(default = "empty_params")]
    pub params: Value,
    /// Optional caller-chosen id for correlating results. Defaults to
    /// `op_<index>`.
    pub id: Option<String>,
}

/// Outcome of one batch item, in the item's input position.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub id: String,
    pub operation: BatchOperation,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate outcome of a batch call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// False if any item failed.
    pub success: bool,
    pub operations: Vec<BatchItemResult>,
    pub success_count: usize,
    pub failure_count: usize,
    /// Wall-clock seconds for the whole batch.
    pub execution_time: f64,
}

fn empty_params() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Execute the items in order, collecting per-item outcomes.
pub async fn execute_batch(bridge: &Bridge, items: Vec<BatchItem>) -> BatchSummary {
    let started = Instant::now();
    let mut summary = BatchSummary {
        success: true,
        operations: Vec::with_capacity(items.len()),
        success_count: 0,
        failure_count: 0,
        execution_time: 0.0,
    };

    for (index, item) in items.into_iter().enumerate() {
        let id = item.id.unwrap_or_else(|| format!("op_{index}"));
        tracing::debug!(id = %id, operation = ?item.operation, "executing batch item");

        let outcome = bridge
            .send_raw(item.operation.command_type(), item.params)
            .await;

        let result = match outcome {
            Ok(body) => {
                let success = body
                    .get("success")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                let error = if success {
                    None
                } else {
                    Some(
                        body.get("error")
                            .and_then(Value::as_str)
                            .unwrap_or("command failed with no error message")
                            .to_string(),
                    )
                };
                BatchItemResult {
                    id,
                    operation: item.operation,
                    success,
                    result: Some(body),
                    error,
                }
            }
            // Connectivity failures are isolated to the item too; later
            // items still get their attempt.
            Err(e @ BridgeError::Offline(_)) | Err(e @ BridgeError::Remote(_)) => BatchItemResult {
                id,
                operation: item.operation,
                success: false,
                result: None,
                error: Some(e.to_string()),
            },
        };

        if result.success {
            summary.success_count += 1;
        } else {
            summary.failure_count += 1;
            summary.success = false;
        }
        summary.operations.push(result);
    }

    summary.execution_time = started.elapsed().as_secs_f64();
    summary
}
