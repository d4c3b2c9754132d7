// MCP tool parameter types. Field names mirror the listener's camelCase
// parameter names; coordinates and rotations are fixed 3-element arrays
// ([X, Y, Z] and [Roll, Pitch, Yaw] degrees), enforced at deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::batch::BatchItem;

fn default_true() -> bool {
    true
}

fn default_spawn_location() -> [f64; 3] {
    [0.0, 0.0, 100.0]
}

fn default_rotation() -> [f64; 3] {
    [0.0, 0.0, 0.0]
}

fn default_scale() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

/// Parameters for the `actor_spawn` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpawnParams {
    /// Content-browser path of the asset to spawn.
    #[schemars(description = "Asset path to spawn, e.g. /Game/ModularOldTown/Meshes/SM_Wall_01.")]
    pub asset_path: String,

    /// World location. Defaults to [0, 0, 100].
    #[serde(default = "default_spawn_location")]
    #[schemars(description = "[X, Y, Z] world location. Defaults to [0, 0, 100].")]
    pub location: [f64; 3],

    /// Rotation in degrees. Defaults to [0, 0, 0].
    #[serde(default = "default_rotation")]
    #[schemars(description = "[Roll, Pitch, Yaw] rotation in degrees. Defaults to [0, 0, 0].")]
    pub rotation: [f64; 3],

    /// Scale. Defaults to [1, 1, 1].
    #[serde(default = "default_scale")]
    #[schemars(description = "[X, Y, Z] scale. Defaults to [1, 1, 1].")]
    pub scale: [f64; 3],

    /// Actor label. Auto-generated when omitted.
    #[schemars(description = "Optional actor label. Auto-generated when omitted.")]
    pub name: Option<String>,

    /// World Outliner folder for the new actor.
    #[schemars(description = "Optional World Outliner folder, e.g. House/GroundFloor.")]
    pub folder: Option<String>,

    /// Run a post-spawn validation pass. Defaults to true.
    #[serde(default = "default_true")]
    #[schemars(description = "Validate the spawn after it completes. Defaults to true.")]
    pub validate: bool,
}

/// Parameters for the `actor_delete` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams {
    /// Label of the actor to delete.
    #[schemars(description = "Label of the actor to delete.")]
    pub actor_name: String,

    /// Run a post-delete validation pass. Defaults to true.
    #[serde(default = "default_true")]
    #[schemars(description = "Validate the deletion after it completes. Defaults to true.")]
    pub validate: bool,
}

/// Parameters for the `actor_modify` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModifyParams {
    /// Label of the actor to modify.
    #[schemars(description = "Label of the actor to modify.")]
    pub actor_name: String,

    /// New world location, if changing.
    #[schemars(description = "New [X, Y, Z] world location.")]
    pub location: Option<[f64; 3]>,

    /// New rotation in degrees, if changing.
    #[schemars(description = "New [Roll, Pitch, Yaw] rotation in degrees.")]
    pub rotation: Option<[f64; 3]>,

    /// New scale, if changing.
    #[schemars(description = "New [X, Y, Z] scale.")]
    pub scale: Option<[f64; 3]>,

    /// New World Outliner folder, if changing.
    #[schemars(description = "New World Outliner folder.")]
    pub folder: Option<String>,

    /// New static mesh asset path, if changing.
    #[schemars(description = "New static mesh asset path.")]
    pub mesh: Option<String>,

    /// Run a post-modify validation pass. Defaults to true.
    #[serde(default = "default_true")]
    #[schemars(description = "Validate the modifications after they complete. Defaults to true.")]
    pub validate: bool,
}

fn default_duplicate_offset() -> [f64; 3] {
    [0.0, 0.0, 100.0]
}

/// Parameters for the `actor_duplicate` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateParams {
    /// Label of the actor to duplicate.
    #[schemars(description = "Label of the actor to duplicate.")]
    pub source_name: String,

    /// Label for the duplicate. Auto-generated when omitted.
    #[schemars(description = "Optional label for the duplicate.")]
    pub name: Option<String>,

    /// Offset from the source actor. Defaults to [0, 0, 100].
    #[serde(default = "default_duplicate_offset")]
    #[schemars(description = "[X, Y, Z] offset from the source actor. Defaults to [0, 0, 100].")]
    pub offset: [f64; 3],

    /// Run a post-duplicate validation pass. Defaults to true.
    #[serde(default = "default_true")]
    #[schemars(description = "Validate the duplicate after it completes. Defaults to true.")]
    pub validate: bool,
}

/// Parameters for the `actor_organize` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizeParams {
    /// Explicit actor labels to move. Alternative to `pattern`.
    #[schemars(description = "Explicit actor labels to move into the folder.")]
    pub actors: Option<Vec<String>>,

    /// Label prefix/pattern selecting actors to move.
    #[schemars(description = "Label pattern selecting actors to move, e.g. Wall_.")]
    pub pattern: Option<String>,

    /// Destination World Outliner folder.
    #[schemars(description = "Destination World Outliner folder.")]
    pub folder: String,
}

/// Parameters for the `actor_snap_to_socket` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnapToSocketParams {
    /// Label of the actor to move.
    #[schemars(description = "Label of the actor to snap.")]
    pub actor_name: String,

    /// Label of the actor owning the socket.
    #[schemars(description = "Label of the actor owning the target socket.")]
    pub target_actor: String,

    /// Socket name on the target actor's mesh.
    #[schemars(description = "Socket name on the target actor's static mesh.")]
    pub target_socket: String,

    /// Additional offset applied after snapping.
    #[schemars(description = "Optional [X, Y, Z] offset applied after snapping.")]
    pub offset: Option<[f64; 3]>,

    /// Run a post-snap validation pass. Defaults to true.
    #[serde(default = "default_true")]
    #[schemars(description = "Validate the snap after it completes. Defaults to true.")]
    pub validate: bool,
}

fn default_tolerance() -> f64 {
    10.0
}

/// Parameters for the `placement_validate` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacementValidateParams {
    /// Labels of the modular actors to check.
    #[schemars(description = "Labels of the modular actors to check for gaps/overlaps.")]
    pub actors: Vec<String>,

    /// Gap/overlap tolerance in unreal units. Defaults to 10.
    #[serde(default = "default_tolerance")]
    #[schemars(description = "Gap/overlap tolerance in unreal units. Defaults to 10.")]
    pub tolerance: f64,

    /// Also check modular-grid alignment. Defaults to true.
    #[serde(default = "default_true")]
    #[schemars(description = "Also check modular-grid alignment. Defaults to true.")]
    pub check_alignment: bool,
}

/// One spawn spec inside a `batch_spawn` request.
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpawnSpec {
    /// Content-browser path of the asset to spawn.
    #[schemars(description = "Asset path to spawn.")]
    pub asset_path: String,

    /// World location.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "[X, Y, Z] world location.")]
    pub location: Option<[f64; 3]>,

    /// Rotation in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "[Roll, Pitch, Yaw] rotation in degrees.")]
    pub rotation: Option<[f64; 3]>,

    /// Scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "[X, Y, Z] scale.")]
    pub scale: Option<[f64; 3]>,

    /// Actor label.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Optional actor label.")]
    pub name: Option<String>,

    /// World Outliner folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Optional World Outliner folder.")]
    pub folder: Option<String>,
}

/// Parameters for the `batch_spawn` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchSpawnParams {
    /// Spawn specs, executed by the editor in one request.
    #[schemars(description = "Spawn specs, executed by the editor in a single request.")]
    pub actors: Vec<SpawnSpec>,

    /// Folder override applied to every spawn.
    #[schemars(description = "Optional World Outliner folder applied to every spawn.")]
    pub common_folder: Option<String>,

    /// Validate each spawn afterwards. Defaults to true; disabling trades
    /// the post-condition check for speed.
    #[serde(default = "default_true")]
    #[schemars(description = "Validate each spawn after completion. Defaults to true.")]
    pub validate: bool,
}

/// Parameters for the `batch_operations` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BatchOperationsParams {
    /// Ordered operations, executed sequentially. A failed item does not
    /// stop the items after it.
    #[schemars(description = "Ordered list of operations. Each has 'operation' (actor_spawn, actor_modify, actor_delete, actor_duplicate, viewport_camera, viewport_screenshot), 'params', and an optional 'id'.")]
    pub operations: Vec<BatchItem>,
}

/// Parameters for the `material_apply` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialApplyParams {
    /// Label of the target actor.
    #[schemars(description = "Label of the actor to apply the material to.")]
    pub actor_name: String,

    /// Content-browser path of the material.
    #[schemars(description = "Material asset path, e.g. /Game/Materials/M_Brick.")]
    pub material_path: String,

    /// Material slot index. Defaults to 0.
    #[serde(default)]
    #[schemars(description = "Material slot index. Defaults to 0.")]
    pub slot_index: i64,

    /// Run a post-apply validation pass. Defaults to true.
    #[serde(default = "default_true")]
    #[schemars(description = "Validate the application after it completes. Defaults to true.")]
    pub validate: bool,
}

/// Parameters for the `material_create` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCreateParams {
    /// Name for the new material asset.
    #[schemars(description = "Name for the new material asset.")]
    pub material_name: String,

    /// Base color as [R, G, B], each 0..1.
    #[schemars(description = "Base color as [R, G, B], each 0..1.")]
    pub base_color: Option<[f64; 3]>,

    /// Metallic value, 0..1.
    #[schemars(description = "Metallic value, 0..1.")]
    pub metallic: Option<f64>,

    /// Roughness value, 0..1.
    #[schemars(description = "Roughness value, 0..1.")]
    pub roughness: Option<f64>,

    /// Content-browser folder for the asset.
    #[schemars(description = "Content-browser folder for the new asset.")]
    pub folder: Option<String>,
}

fn default_material_path() -> String {
    "/Game".to_string()
}

fn default_material_limit() -> usize {
    50
}

/// Parameters for the `material_list` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MaterialListParams {
    /// Content-browser path to search. Defaults to /Game.
    #[serde(default = "default_material_path")]
    #[schemars(description = "Content-browser path to search. Defaults to /Game.")]
    pub path: String,

    /// Name filter pattern.
    #[schemars(description = "Optional name filter pattern.")]
    pub pattern: Option<String>,

    /// Maximum results. Defaults to 50.
    #[serde(default = "default_material_limit")]
    #[schemars(description = "Maximum number of results. Defaults to 50.")]
    pub limit: usize,
}

/// Parameters for the `material_info` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialInfoParams {
    /// Content-browser path of the material.
    #[schemars(description = "Material asset path to inspect.")]
    pub material_path: String,
}

fn default_parent_class() -> String {
    "Actor".to_string()
}

/// Parameters for the `blueprint_create` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintCreateParams {
    /// Name for the new blueprint class.
    #[schemars(description = "Name for the new blueprint class.")]
    pub class_name: String,

    /// Parent class. Defaults to Actor.
    #[serde(default = "default_parent_class")]
    #[schemars(description = "Parent class name. Defaults to Actor.")]
    pub parent_class: String,

    /// Component definitions to add.
    #[schemars(description = "Optional component definitions, each {name, type, properties?}.")]
    pub components: Option<Vec<Value>>,

    /// Variable definitions to add.
    #[schemars(description = "Optional variable definitions, each {name, type, defaultValue?}.")]
    pub variables: Option<Vec<Value>>,

    /// Content-browser folder for the asset.
    #[schemars(description = "Content-browser folder for the new asset.")]
    pub folder: Option<String>,
}

/// Parameters for the `blueprint_get_info` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintGetInfoParams {
    /// Content-browser path of the blueprint.
    #[schemars(description = "Blueprint asset path to inspect.")]
    pub blueprint_path: String,
}

fn default_asset_path() -> String {
    "/Game".to_string()
}

fn default_asset_limit() -> usize {
    20
}

/// Parameters for the `asset_list` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetListParams {
    /// Content-browser path to search. Defaults to /Game.
    #[serde(default = "default_asset_path")]
    #[schemars(description = "Content-browser path to search. Defaults to /Game.")]
    pub path: String,

    /// Asset type filter, e.g. StaticMesh or Blueprint.
    #[schemars(description = "Optional asset type filter, e.g. StaticMesh or Blueprint.")]
    pub asset_type: Option<String>,

    /// Maximum results. Defaults to 20.
    #[serde(default = "default_asset_limit")]
    #[schemars(description = "Maximum number of results. Defaults to 20.")]
    pub limit: usize,
}

/// Parameters for the `asset_info` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetInfoParams {
    /// Content-browser path of the asset.
    #[schemars(description = "Asset path to inspect.")]
    pub asset_path: String,
}

/// Parameters for the `viewport_focus` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewportFocusParams {
    /// Label of the actor to frame.
    #[schemars(description = "Label of the actor to frame.")]
    pub actor_name: String,

    /// Keep the current camera angles. Defaults to false.
    #[serde(default)]
    #[schemars(description = "Keep the current camera angles. Defaults to false.")]
    pub preserve_rotation: bool,
}

fn default_view_mode() -> String {
    "perspective".to_string()
}

fn default_render_mode() -> String {
    "lit".to_string()
}

/// Parameters for the `viewport_mode` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ViewportModeParams {
    /// Standard view to position for. Defaults to perspective.
    #[serde(default = "default_view_mode")]
    #[schemars(
        description = "Standard view: top, bottom, left, right, front, back, or perspective. Defaults to perspective."
    )]
    pub mode: String,
}

/// Parameters for the `viewport_render_mode` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ViewportRenderModeParams {
    /// Rendering mode. Defaults to lit.
    #[serde(default = "default_render_mode")]
    #[schemars(description = "Rendering mode: lit, unlit, or wireframe. Defaults to lit.")]
    pub mode: String,
}

/// Parameters for the `viewport_camera` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewportCameraParams {
    /// Camera location.
    #[schemars(description = "[X, Y, Z] camera location.")]
    pub location: Option<[f64; 3]>,

    /// Camera rotation in degrees.
    #[schemars(description = "[Roll, Pitch, Yaw] camera rotation in degrees.")]
    pub rotation: Option<[f64; 3]>,

    /// Distance from the focused actor.
    #[schemars(description = "Distance from the focused actor, when focusActor is set.")]
    pub distance: Option<f64>,

    /// Actor to frame instead of positioning manually.
    #[schemars(description = "Label of an actor to frame instead of positioning manually.")]
    pub focus_actor: Option<String>,
}

fn default_screenshot_width() -> u32 {
    640
}

fn default_screenshot_height() -> u32 {
    360
}

/// Parameters for the `viewport_screenshot` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewportScreenshotParams {
    /// Image width in pixels. Defaults to 640.
    #[serde(default = "default_screenshot_width")]
    #[schemars(description = "Image width in pixels. Defaults to 640.")]
    pub width: u32,

    /// Image height in pixels. Defaults to 360.
    #[serde(default = "default_screenshot_height")]
    #[schemars(description = "Image height in pixels. Defaults to 360.")]
    pub height: u32,

    /// Screen percentage for supersampling.
    #[schemars(description = "Optional screen percentage for supersampling.")]
    pub screen_percentage: Option<f64>,
}

fn default_actor_limit() -> usize {
    30
}

/// Parameters for the `level_actors` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LevelActorsParams {
    /// Label filter substring.
    #[schemars(description = "Optional label filter substring.")]
    pub filter: Option<String>,

    /// Maximum results. Defaults to 30.
    #[serde(default = "default_actor_limit")]
    #[schemars(description = "Maximum number of actors to return. Defaults to 30.")]
    pub limit: usize,
}

fn default_count() -> usize {
    1
}

/// Parameters for the `undo` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UndoParams {
    /// Number of operations to undo. Defaults to 1.
    #[serde(default = "default_count")]
    #[schemars(description = "Number of operations to undo. Defaults to 1.")]
    pub count: usize,
}

/// Parameters for the `redo` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RedoParams {
    /// Number of operations to redo. Defaults to 1.
    #[serde(default = "default_count")]
    #[schemars(description = "Number of operations to redo. Defaults to 1.")]
    pub count: usize,
}

/// Parameters for the `checkpoint_create` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CheckpointCreateParams {
    /// Checkpoint name. Must be non-empty.
    #[schemars(description = "Checkpoint name, e.g. before_second_floor.")]
    pub name: String,

    /// Optional description shown in the history listing.
    #[schemars(description = "Optional description shown in the history listing.")]
    pub description: Option<String>,
}

/// Parameters for the `checkpoint_restore` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CheckpointRestoreParams {
    /// Name of the checkpoint to restore to.
    #[schemars(description = "Name of the checkpoint to restore to.")]
    pub name: String,
}

fn default_history_limit() -> usize {
    10
}

/// Parameters for the `history_list` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct HistoryListParams {
    /// Maximum entries per direction. Defaults to 10.
    #[serde(default = "default_history_limit")]
    #[schemars(description = "Maximum entries to list per direction. Defaults to 10.")]
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── SpawnParams ──────────────────────────────────────────────

    #[test]
    fn spawn_params_defaults() {
        let params: SpawnParams =
            serde_json::from_value(json!({"assetPath": "/Game/Wall"})).unwrap();
        assert_eq!(params.asset_path, "/Game/Wall");
        assert_eq!(params.location, [0.0, 0.0, 100.0]);
        assert_eq!(params.rotation, [0.0, 0.0, 0.0]);
        assert_eq!(params.scale, [1.0, 1.0, 1.0]);
        assert!(params.name.is_none());
        assert!(params.folder.is_none());
        assert!(params.validate);
    }

    #[test]
    fn spawn_params_missing_asset_path() {
        let result = serde_json::from_value::<SpawnParams>(json!({"location": [0, 0, 0]}));
        assert!(result.is_err());
    }

    #[test]
    fn spawn_params_rejects_short_location() {
        let result = serde_json::from_value::<SpawnParams>(json!({
            "assetPath": "/Game/Wall",
            "location": [0, 0],
        }));
        assert!(result.is_err());
    }

    #[test]
    fn spawn_params_rejects_long_rotation() {
        let result = serde_json::from_value::<SpawnParams>(json!({
            "assetPath": "/Game/Wall",
            "rotation": [0, 0, 0, 0],
        }));
        assert!(result.is_err());
    }

    #[test]
    fn spawn_params_all_fields() {
        let params: SpawnParams = serde_json::from_value(json!({
            "assetPath": "/Game/Wall",
            "location": [100.0, 200.0, 0.0],
            "rotation": [0.0, 0.0, 90.0],
            "scale": [2.0, 2.0, 2.0],
            "name": "Wall_North",
            "folder": "House/Walls",
            "validate": false,
        }))
        .unwrap();
        assert_eq!(params.location, [100.0, 200.0, 0.0]);
        assert_eq!(params.name.as_deref(), Some("Wall_North"));
        assert!(!params.validate);
    }

    // ── ModifyParams ─────────────────────────────────────────────

    #[test]
    fn modify_params_optional_fields_default_to_none() {
        let params: ModifyParams =
            serde_json::from_value(json!({"actorName": "Wall_1"})).unwrap();
        assert_eq!(params.actor_name, "Wall_1");
        assert!(params.location.is_none());
        assert!(params.mesh.is_none());
        assert!(params.validate);
    }

    #[test]
    fn modify_params_missing_actor_name() {
        let result = serde_json::from_value::<ModifyParams>(json!({"location": [0, 0, 0]}));
        assert!(result.is_err());
    }

    // ── DuplicateParams ──────────────────────────────────────────

    #[test]
    fn duplicate_params_default_offset_lifts_z() {
        let params: DuplicateParams =
            serde_json::from_value(json!({"sourceName": "Wall_1"})).unwrap();
        assert_eq!(params.offset, [0.0, 0.0, 100.0]);
    }

    // ── BatchSpawnParams ─────────────────────────────────────────

    #[test]
    fn batch_spawn_params_defaults() {
        let params: BatchSpawnParams = serde_json::from_value(json!({
            "actors": [
                {"assetPath": "/Game/Wall", "location": [0, 0, 0]},
                {"assetPath": "/Game/Wall", "location": [300, 0, 0]},
            ]
        }))
        .unwrap();
        assert_eq!(params.actors.len(), 2);
        assert!(params.common_folder.is_none());
        assert!(params.validate);
    }

    #[test]
    fn spawn_spec_skips_absent_fields_when_serialized() {
        let spec = SpawnSpec {
            asset_path: "/Game/Wall".into(),
            location: Some([0.0, 0.0, 0.0]),
            rotation: None,
            scale: None,
            name: None,
            folder: None,
        };
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["assetPath"], "/Game/Wall");
        assert!(value.get("rotation").is_none());
        assert!(value.get("name").is_none());
    }

    // ── BatchOperationsParams ────────────────────────────────────

    #[test]
    fn batch_operations_params_parse_items() {
        let params: BatchOperationsParams = serde_json::from_value(json!({
            "operations": [
                {"operation": "actor_spawn", "params": {"assetPath": "/Game/Wall"}},
                {"operation": "actor_delete", "params": {"actorName": "Wall_1"}, "id": "del"},
            ]
        }))
        .unwrap();
        assert_eq!(params.operations.len(), 2);
        assert_eq!(params.operations[1].id.as_deref(), Some("del"));
    }

    #[test]
    fn batch_operations_rejects_unknown_kind() {
        let result = serde_json::from_value::<BatchOperationsParams>(json!({
            "operations": [{"operation": "material_apply", "params": {}}]
        }));
        assert!(result.is_err());
    }

    // ── Material params ──────────────────────────────────────────

    #[test]
    fn material_apply_params_defaults() {
        let params: MaterialApplyParams = serde_json::from_value(json!({
            "actorName": "Wall_1",
            "materialPath": "/Game/Materials/M_Brick",
        }))
        .unwrap();
        assert_eq!(params.slot_index, 0);
        assert!(params.validate);
    }

    #[test]
    fn material_list_params_defaults() {
        let params: MaterialListParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.path, "/Game");
        assert_eq!(params.limit, 50);
        assert!(params.pattern.is_none());
    }

    // ── Blueprint params ─────────────────────────────────────────

    #[test]
    fn blueprint_create_params_default_parent() {
        let params: BlueprintCreateParams =
            serde_json::from_value(json!({"className": "BP_Door"})).unwrap();
        assert_eq!(params.parent_class, "Actor");
        assert!(params.components.is_none());
    }

    // ── Viewport params ──────────────────────────────────────────

    #[test]
    fn screenshot_params_defaults() {
        let params: ViewportScreenshotParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.width, 640);
        assert_eq!(params.height, 360);
    }

    // ── History tool params ──────────────────────────────────────

    #[test]
    fn undo_redo_params_default_to_one() {
        let undo: UndoParams = serde_json::from_value(json!({})).unwrap();
        let redo: RedoParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(undo.count, 1);
        assert_eq!(redo.count, 1);
    }

    #[test]
    fn checkpoint_create_requires_name() {
        let result = serde_json::from_value::<CheckpointCreateParams>(json!({}));
        assert!(result.is_err());
        let params: CheckpointCreateParams =
            serde_json::from_value(json!({"name": "before_roof"})).unwrap();
        assert_eq!(params.name, "before_roof");
        assert!(params.description.is_none());
    }

    #[test]
    fn history_list_params_default_limit() {
        let params: HistoryListParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.limit, 10);
    }
}
