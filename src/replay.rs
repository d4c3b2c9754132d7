//! Undo, redo, and checkpoint restore.
//!
//! Undo and redo are deliberately asymmetric: redo replays the recorded
//! tool's original forward args through the command registry, while undo
//! builds inverse commands from the operation's captured `undo_data` — the
//! inverse of "spawn at L" is "delete", not "spawn at L again". Do not
//! collapse one into the other.
//!
//! Every multi-step request halts at the first failing step and reports
//! partial progress; the cursor stays wherever the last successful step
//! left it. Skipping ahead would leave the level in a state the history no
//! longer describes.

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::bridge::Bridge;
use crate::commands;
use crate::history::OperationHistory;

/// Tool name recorded by checkpoint markers. Markers hold a label, not an
/// editor-side effect, so replay passes over them without a listener call.
pub const CHECKPOINT_TOOL: &str = "checkpoint_create";

/// Expected, non-fatal replay failures.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The operation has no captured undo data, or its shape is unusable.
    #[error("Undo not available for {0}")]
    UndoUnavailable(String),

    /// The tool has no entry in the command registry.
    #[error("Redo not available for {0}")]
    RedoUnavailable(String),

    /// No checkpoint with that name was ever created (or it was truncated).
    #[error("Unknown checkpoint: {0}")]
    UnknownCheckpoint(String),
}

/// A fully translated listener command, ready for the bridge.
#[derive(Debug, PartialEq)]
pub struct CommandRequest {
    pub command_type: &'static str,
    pub params: Value,
}

/// Report for an undo or redo tool call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    /// Descriptions of the operations processed, in execution order.
    pub completed: Vec<String>,
    /// Errors encountered; non-empty means the request halted early.
    pub errors: Vec<String>,
    pub current_index: i64,
}

/// Report for a checkpoint restore.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreReport {
    pub checkpoint: String,
    pub target_index: i64,
    pub undone_ops: Vec<String>,
    pub redone_ops: Vec<String>,
    pub errors: Vec<String>,
    pub current_index: i64,
}

/// Undo up to `count` operations, stopping at the first failure.
pub async fn undo(bridge: &Bridge, history: &Mutex<OperationHistory>, count: usize) -> ReplayReport {
    let mut completed = Vec::new();
    let mut errors = Vec::new();

    for _ in 0..count {
        // Clone out of the lock -- it must not be held across the await.
        let op = match history.lock().undoable().cloned() {
            Some(op) => op,
            None => {
                if completed.is_empty() {
                    errors.push("Nothing to undo".to_string());
                }
                break;
            }
        };

        let requests = match inverse_commands(&op.tool_name, op.undo_data.as_ref()) {
            Ok(requests) => requests,
            Err(e) => {
                errors.push(e.to_string());
                break;
            }
        };

        let mut step_failed = false;
        for request in requests {
            if let Err(e) = bridge.send(request.command_type, request.params).await {
                errors.push(format!("Failed to undo '{}': {e}", op.description));
                step_failed = true;
                break;
            }
        }
        if step_failed {
            break;
        }

        history.lock().mark_undone();
        completed.push(op.description);
    }

    ReplayReport {
        completed,
        errors,
        current_index: history.lock().current_index(),
    }
}

/// Redo up to `count` operations, stopping at the first failure.
pub async fn redo(bridge: &Bridge, history: &Mutex<OperationHistory>, count: usize) -> ReplayReport {
    let mut completed = Vec::new();
    let mut errors = Vec::new();

    for _ in 0..count {
        let op = match history.lock().redoable().cloned() {
            Some(op) => op,
            None => {
                if completed.is_empty() {
                    errors.push("Nothing to redo".to_string());
                }
                break;
            }
        };

        // Checkpoint markers carry no editor-side effect.
        if op.tool_name != CHECKPOINT_TOOL {
            let command_type = match commands::command_type(&op.tool_name) {
                Some(command_type) => command_type,
                None => {
                    errors.push(ReplayError::RedoUnavailable(op.tool_name.clone()).to_string());
                    break;
                }
            };
            // Redo recreates the original effect: resend the forward args.
            if let Err(e) = bridge.send(command_type, op.args.clone()).await {
                errors.push(format!("Failed to redo '{}': {e}", op.description));
                break;
            }
        }

        history.lock().mark_redone();
        completed.push(op.description);
    }

    ReplayReport {
        completed,
        errors,
        current_index: history.lock().current_index(),
    }
}

/// Rewind or replay to a named checkpoint.
///
/// Behind the cursor means undos, ahead means redos, equal is a no-op. A
/// failing step halts the walk; the report says how far it got.
pub async fn restore_checkpoint(
    bridge: &Bridge,
    history: &Mutex<OperationHistory>,
    name: &str,
) -> Result<RestoreReport, ReplayError> {
    let (target, current) = {
        let history = history.lock();
        let target = history
            .checkpoint_index(name)
            .ok_or_else(|| ReplayError::UnknownCheckpoint(name.to_string()))?;
        (target, history.current_index())
    };

    let mut report = RestoreReport {
        checkpoint: name.to_string(),
        target_index: target,
        undone_ops: Vec::new(),
        redone_ops: Vec::new(),
        errors: Vec::new(),
        current_index: current,
    };

    if target < current {
        let steps = (current - target) as usize;
        let outcome = undo(bridge, history, steps).await;
        report.undone_ops = outcome.completed;
        report.errors = outcome.errors;
        report.current_index = outcome.current_index;
    } else if target > current {
        let steps = (target - current) as usize;
        let outcome = redo(bridge, history, steps).await;
        report.redone_ops = outcome.completed;
        report.errors = outcome.errors;
        report.current_index = outcome.current_index;
    }

    Ok(report)
}

/// Build the listener command(s) that reverse a recorded operation.
///
/// Keyed off the tool name; the params come from the captured undo data,
/// never from the forward args. Returns `UndoUnavailable` when the tool is
/// not reversible or the capture is missing/malformed.
fn inverse_commands(
    tool_name: &str,
    undo_data: Option<&Value>,
) -> Result<Vec<CommandRequest>, ReplayError> {
    if tool_name == CHECKPOINT_TOOL {
        return Ok(Vec::new());
    }

    let unavailable = || ReplayError::UndoUnavailable(tool_name.to_string());
    let data = undo_data.ok_or_else(unavailable)?;

    match tool_name {
        // The inverse of creating an actor is deleting it.
        "actor_spawn" | "actor_duplicate" => {
            let actor_name = data
                .get("actorName")
                .and_then(Value::as_str)
                .ok_or_else(unavailable)?;
            Ok(vec![CommandRequest {
                command_type: "actor.delete",
                params: json!({ "actorName": actor_name, "validate": false }),
            }])
        }

        // One delete per actor the batch created.
        "batch_spawn" => {
            let names = data
                .get("spawnedActors")
                .and_then(Value::as_array)
                .ok_or_else(unavailable)?;
            names
                .iter()
                .map(|name| {
                    let name = name.as_str().ok_or_else(unavailable)?;
                    Ok(CommandRequest {
                        command_type: "actor.delete",
                        params: json!({ "actorName": name, "validate": false }),
                    })
                })
                .collect()
        }

        // Recreate the deleted actor from its captured prior state.
        "actor_delete" => {
            let asset_path = data
                .get("assetPath")
                .and_then(Value::as_str)
                .ok_or_else(unavailable)?;
            let actor_name = data
                .get("actorName")
                .and_then(Value::as_str)
                .ok_or_else(unavailable)?;
            let mut params = json!({
                "assetPath": asset_path,
                "name": actor_name,
                "validate": false,
            });
            for key in ["location", "rotation", "scale"] {
                if let Some(value) = data.get(key) {
                    params[key] = value.clone();
                }
            }
            Ok(vec![CommandRequest {
                command_type: "actor.spawn",
                params,
            }])
        }

        // Push the captured prior transform back. A socket snap is undone
        // the same way: restore the saved transform. Folder and mesh are
        // not captured (the listener does not report them), so they are
        // never restored here.
        "actor_modify" | "actor_snap_to_socket" => {
            let actor_name = data
                .get("actorName")
                .and_then(Value::as_str)
                .ok_or_else(unavailable)?;
            let mut params = json!({ "actorName": actor_name, "validate": false });
            let mut restored = false;
            for key in ["location", "rotation", "scale"] {
                if let Some(value) = data.get(key) {
                    params[key] = value.clone();
                    restored = true;
                }
            }
            if !restored {
                return Err(unavailable());
            }
            Ok(vec![CommandRequest {
                command_type: "actor.modify",
                params,
            }])
        }

        // Re-apply the material that was on the slot before.
        "material_apply" => {
            let actor_name = data
                .get("actorName")
                .and_then(Value::as_str)
                .ok_or_else(unavailable)?;
            let previous = data
                .get("previousMaterial")
                .and_then(Value::as_str)
                .ok_or_else(unavailable)?;
            let slot = data.get("slotIndex").cloned().unwrap_or(json!(0));
            Ok(vec![CommandRequest {
                command_type: "material.apply",
                params: json!({
                    "actorName": actor_name,
                    "materialPath": previous,
                    "slotIndex": slot,
                }),
            }])
        }

        _ => Err(unavailable()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_inverts_to_delete() {
        let requests =
            inverse_commands("actor_spawn", Some(&json!({"actorName": "Wall_1"}))).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].command_type, "actor.delete");
        assert_eq!(requests[0].params["actorName"], "Wall_1");
    }

    #[test]
    fn duplicate_inverts_to_delete() {
        let requests =
            inverse_commands("actor_duplicate", Some(&json!({"actorName": "Wall_copy"}))).unwrap();
        assert_eq!(requests[0].command_type, "actor.delete");
        assert_eq!(requests[0].params["actorName"], "Wall_copy");
    }

    #[test]
    fn batch_spawn_inverts_to_one_delete_per_actor() {
        let data = json!({"spawnedActors": ["A", "B", "C"]});
        let requests = inverse_commands("batch_spawn", Some(&data)).unwrap();
        assert_eq!(requests.len(), 3);
        assert!(requests
            .iter()
            .all(|r| r.command_type == "actor.delete"));
        assert_eq!(requests[1].params["actorName"], "B");
    }

    #[test]
    fn delete_inverts_to_spawn_with_prior_state() {
        let data = json!({
            "actorName": "Wall_1",
            "assetPath": "/Game/Wall",
            "location": [100.0, 0.0, 0.0],
            "rotation": [0.0, 0.0, 90.0],
        });
        let requests = inverse_commands("actor_delete", Some(&data)).unwrap();
        assert_eq!(requests[0].command_type, "actor.spawn");
        assert_eq!(requests[0].params["assetPath"], "/Game/Wall");
        assert_eq!(requests[0].params["name"], "Wall_1");
        assert_eq!(requests[0].params["location"][0], 100.0);
    }

    #[test]
    fn modify_inverts_to_modify_with_prior_values() {
        let data = json!({
            "actorName": "Wall_1",
            "location": [0.0, 0.0, 0.0],
        });
        let requests = inverse_commands("actor_modify", Some(&data)).unwrap();
        assert_eq!(requests[0].command_type, "actor.modify");
        assert_eq!(requests[0].params["location"], json!([0.0, 0.0, 0.0]));
        assert!(requests[0].params.get("rotation").is_none());
    }

    #[test]
    fn modify_without_any_prior_values_is_unavailable() {
        let err = inverse_commands("actor_modify", Some(&json!({"actorName": "W"})));
        assert!(matches!(err, Err(ReplayError::UndoUnavailable(_))));
    }

    #[test]
    fn organize_is_not_undoable() {
        let err = inverse_commands("actor_organize", Some(&json!({"folder": "House"})));
        assert!(matches!(err, Err(ReplayError::UndoUnavailable(_))));
    }

    #[test]
    fn material_apply_inverts_to_previous_material() {
        let data = json!({
            "actorName": "Wall_1",
            "previousMaterial": "/Game/Materials/M_Brick",
            "slotIndex": 2,
        });
        let requests = inverse_commands("material_apply", Some(&data)).unwrap();
        assert_eq!(requests[0].command_type, "material.apply");
        assert_eq!(requests[0].params["materialPath"], "/Game/Materials/M_Brick");
        assert_eq!(requests[0].params["slotIndex"], 2);
    }

    #[test]
    fn checkpoint_marker_is_a_replay_noop() {
        assert!(inverse_commands(CHECKPOINT_TOOL, None).unwrap().is_empty());
    }

    #[test]
    fn missing_undo_data_is_reported_by_tool_name() {
        let err = inverse_commands("actor_spawn", None).unwrap_err();
        assert_eq!(err.to_string(), "Undo not available for actor_spawn");
    }

    #[test]
    fn unsupported_tool_is_unavailable() {
        let err = inverse_commands("material_create", Some(&json!({}))).unwrap_err();
        assert!(matches!(err, ReplayError::UndoUnavailable(_)));
    }
}
