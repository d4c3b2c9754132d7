//! Batch execution against a mock listener: ordering, per-item isolation,
//! and aggregate counts.

mod common;

use std::sync::Arc;

use serde_json::json;
use uebridge::batch::{execute_batch, BatchItem, BatchOperation};

fn item(operation: BatchOperation, params: serde_json::Value) -> BatchItem {
    BatchItem {
        operation,
        params,
        id: None,
    }
}

/// A responder that fails any spawn of `/Game/DoesNotExist` and accepts
/// everything else.
fn missing_asset_responder() -> common::Responder {
    Arc::new(|command, params| {
        if command == "actor.spawn"
            && params.get("assetPath").and_then(|v| v.as_str()) == Some("/Game/DoesNotExist")
        {
            json!({ "success": false, "error": "Asset not found: /Game/DoesNotExist" })
        } else {
            json!({ "success": true, "command": command })
        }
    })
}

#[tokio::test]
async fn failed_item_does_not_stop_later_items() {
    let listener = common::start_mock_listener(missing_asset_responder()).await;
    let bridge = listener.bridge();

    let summary = execute_batch(
        &bridge,
        vec![
            item(
                BatchOperation::ActorSpawn,
                json!({ "assetPath": "/Game/Wall" }),
            ),
            item(
                BatchOperation::ActorSpawn,
                json!({ "assetPath": "/Game/DoesNotExist" }),
            ),
            item(
                BatchOperation::ViewportCamera,
                json!({ "location": [0.0, 0.0, 500.0] }),
            ),
        ],
    )
    .await;

    assert!(!summary.success);
    assert_eq!(summary.success_count, 2);
    assert_eq!(summary.failure_count, 1);
    assert_eq!(summary.operations.len(), 3);

    // Results stay in input order, and the middle failure carries the
    // listener's error message.
    assert!(summary.operations[0].success);
    assert!(!summary.operations[1].success);
    assert!(summary.operations[2].success);
    assert_eq!(
        summary.operations[1].error.as_deref(),
        Some("Asset not found: /Game/DoesNotExist")
    );

    // All three commands reached the listener, sequentially.
    assert_eq!(
        listener.command_types(),
        vec!["actor.spawn", "actor.spawn", "viewport.camera"]
    );
}

#[tokio::test]
async fn items_without_ids_get_positional_ids() {
    let listener = common::start_ok_listener().await;
    let bridge = listener.bridge();

    let mut named = item(BatchOperation::ActorDelete, json!({ "actorName": "Wall_1" }));
    named.id = Some("teardown".to_string());

    let summary = execute_batch(
        &bridge,
        vec![
            item(BatchOperation::ActorSpawn, json!({ "assetPath": "/Game/Wall" })),
            named,
            item(BatchOperation::ViewportScreenshot, json!({})),
        ],
    )
    .await;

    let ids: Vec<&str> = summary.operations.iter().map(|op| op.id.as_str()).collect();
    assert_eq!(ids, vec!["op_0", "teardown", "op_2"]);
}

#[tokio::test]
async fn offline_listener_fails_every_item_without_panicking() {
    let port = common::unused_port().await;
    let bridge = uebridge::bridge::Bridge::new("127.0.0.1", port).unwrap();

    let summary = execute_batch(
        &bridge,
        vec![
            item(BatchOperation::ActorSpawn, json!({ "assetPath": "/Game/Wall" })),
            item(BatchOperation::ActorModify, json!({ "actorName": "Wall_1" })),
        ],
    )
    .await;

    assert!(!summary.success);
    assert_eq!(summary.success_count, 0);
    assert_eq!(summary.failure_count, 2);
    for op in &summary.operations {
        let error = op.error.as_deref().unwrap_or_default();
        assert!(
            error.starts_with("Unreal Editor listener offline"),
            "unexpected error: {error}"
        );
    }
}

#[tokio::test]
async fn empty_batch_reports_clean_zero_counts() {
    let listener = common::start_ok_listener().await;
    let bridge = listener.bridge();

    let summary = execute_batch(&bridge, Vec::new()).await;

    assert!(summary.success);
    assert_eq!(summary.success_count, 0);
    assert_eq!(summary.failure_count, 0);
    assert!(summary.operations.is_empty());
    assert!(listener.requests().is_empty());
}

#[tokio::test]
async fn execution_time_is_wall_clock_seconds() {
    let listener = common::start_ok_listener().await;
    let bridge = listener.bridge();

    let summary = execute_batch(
        &bridge,
        vec![item(BatchOperation::ViewportScreenshot, json!({}))],
    )
    .await;

    assert!(summary.execution_time >= 0.0);
    assert!(summary.execution_time < 30.0);
}
