pub mod format;
pub mod tools;

use std::sync::Arc;

use parking_lot::Mutex;
use rmcp::{
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router, ServerHandler,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::batch;
use crate::bridge::{Bridge, BridgeError};
use crate::history::OperationHistory;
use crate::replay;

use tools::{
    AssetInfoParams, AssetListParams,
    BatchOperationsParams, BatchSpawnParams, BlueprintCreateParams, BlueprintGetInfoParams,
    CheckpointCreateParams, CheckpointRestoreParams, DeleteParams, DuplicateParams,
    HistoryListParams, LevelActorsParams, MaterialApplyParams, MaterialCreateParams,
    MaterialInfoParams, MaterialListParams, ModifyParams, OrganizeParams,
    PlacementValidateParams, RedoParams, SnapToSocketParams, SpawnParams, UndoParams,
    ViewportCameraParams, ViewportFocusParams, ViewportModeParams, ViewportRenderModeParams,
    ViewportScreenshotParams,
};

/// Convert a bridge failure into an MCP error. `Offline` and `Remote`
/// produce different message shapes (the `Display` impls differ), so a
/// caller can tell "nothing happened" from "something happened and failed".
fn bridge_error(e: BridgeError) -> ErrorData {
    ErrorData::internal_error(e.to_string(), None)
}

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

/// The listener reports transforms as `{x, y, z}` / `{roll, pitch, yaw}`
/// objects, but its spawn/modify commands only accept 3-element arrays.
/// Captured state must be normalized here or the inverse command is
/// rejected by the editor.
fn transform_array(value: &Value, keys: [&str; 3]) -> Option<Value> {
    let object = value.as_object()?;
    let mut components = Vec::with_capacity(3);
    for key in keys {
        components.push(object.get(key)?.as_f64()?);
    }
    Some(json!(components))
}

/// A transform component from a `level.actors` entry, as a `[X, Y, Z]`
/// (or `[Roll, Pitch, Yaw]`) array regardless of the reported shape.
fn captured_transform(prior: &Value, key: &str) -> Option<Value> {
    let value = prior.get(key)?;
    if value.is_array() {
        return Some(value.clone());
    }
    match key {
        "rotation" => transform_array(value, ["roll", "pitch", "yaw"]),
        _ => transform_array(value, ["x", "y", "z"]),
    }
}

// ── MCP server ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct BridgeMcpServer {
    bridge: Arc<Bridge>,
    history: Arc<Mutex<OperationHistory>>,
    tool_router: ToolRouter<BridgeMcpServer>,
}

impl BridgeMcpServer {
    pub fn new(bridge: Bridge) -> Self {
        Self::with_history(bridge, Arc::new(Mutex::new(OperationHistory::new())))
    }

    /// Build a server around an existing history instance. The history is
    /// injected rather than ambient so tests can use a fresh one per case.
    pub fn with_history(bridge: Bridge, history: Arc<Mutex<OperationHistory>>) -> Self {
        Self {
            bridge: Arc::new(bridge),
            history,
            tool_router: Self::tool_router(),
        }
    }

    pub fn history(&self) -> &Arc<Mutex<OperationHistory>> {
        &self.history
    }

    /// Send a command whose history slot was already recorded: attach the
    /// result on success, tag the slot failed on error. The failed entry
    /// keeps its slot (soft failure, no removal).
    async fn run_recorded(
        &self,
        id: Uuid,
        command_type: &str,
        params: Value,
    ) -> Result<Value, ErrorData> {
        match self.bridge.send(command_type, params).await {
            Ok(body) => {
                self.history.lock().attach_result(id, body.clone());
                Ok(body)
            }
            Err(e) => {
                self.history.lock().mark_failed(id);
                Err(bridge_error(e))
            }
        }
    }

    /// Best-effort lookup of an actor's current state, used to capture
    /// undo data before a destructive change. `None` when the listener is
    /// unreachable or the actor is not found; the operation then simply
    /// records no undo data.
    async fn prior_actor_state(&self, actor_name: &str) -> Option<Value> {
        let body = self
            .bridge
            .send("level.actors", json!({ "filter": actor_name, "limit": 50 }))
            .await
            .ok()?;
        body.get("actors")?
            .as_array()?
            .iter()
            .find(|actor| actor.get("name").and_then(Value::as_str) == Some(actor_name))
            .cloned()
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for BridgeMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "uebridge".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "Bridge to a running Unreal Editor. Spawn, modify, and organize level \
                     actors, apply materials, create blueprints, and control the viewport."
                        .to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "uebridge forwards commands to the Unreal Editor Python listener. Use \
                 actor_spawn / actor_modify / actor_delete / actor_duplicate for level \
                 editing, batch_spawn or batch_operations for bulk work, and material_* / \
                 blueprint_* for assets. Mutating operations are tracked: undo, redo, \
                 checkpoint_create, and checkpoint_restore navigate the session history. \
                 Use system_status to check the editor listener is up."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl BridgeMcpServer {
    // ── Actor tools ─────────────────────────────────────────────

    /// Spawn an actor from an asset path.
    #[tool(description = "Spawn an actor in the level from an asset path, with optional location, rotation, scale, name, and World Outliner folder. The spawn is recorded in the undo history.")]
    async fn actor_spawn(
        &self,
        Parameters(params): Parameters<SpawnParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = json!({
            "assetPath": params.asset_path,
            "location": params.location,
            "rotation": params.rotation,
            "scale": params.scale,
            "name": params.name,
            "folder": params.folder,
            "validate": params.validate,
        });
        let description = format!(
            "Spawn {} at {:?}",
            params.asset_path, params.location
        );
        let id = self
            .history
            .lock()
            .record("actor_spawn", args.clone(), description, None);

        let body = self.run_recorded(id, "actor.spawn", args).await?;

        if let Some(actor_name) = body.get("actorName").and_then(Value::as_str) {
            self.history
                .lock()
                .update_undo_data(id, json!({ "actorName": actor_name }));
        }

        Ok(text_result(format::with_validation(
            format::spawn_summary(&body),
            &body,
        )))
    }

    /// Delete an actor by label.
    #[tool(description = "Delete an actor from the level by label. The actor's transform and asset are captured first so the deletion can be undone.")]
    async fn actor_delete(
        &self,
        Parameters(params): Parameters<DeleteParams>,
    ) -> Result<CallToolResult, ErrorData> {
        // Capture state before the actor disappears; undo recreates it.
        let prior = self.prior_actor_state(&params.actor_name).await;

        let args = json!({ "actorName": params.actor_name, "validate": params.validate });
        let description = format!("Delete {}", params.actor_name);
        let id = self
            .history
            .lock()
            .record("actor_delete", args.clone(), description, None);

        let body = self.run_recorded(id, "actor.delete", args).await?;

        if let Some(prior) = prior {
            if let Some(asset_path) = prior.get("assetPath").and_then(Value::as_str) {
                let mut undo_data = json!({
                    "actorName": params.actor_name,
                    "assetPath": asset_path,
                });
                for key in ["location", "rotation", "scale"] {
                    if let Some(value) = captured_transform(&prior, key) {
                        undo_data[key] = value;
                    }
                }
                self.history.lock().update_undo_data(id, undo_data);
            }
        }

        Ok(text_result(format::with_validation(
            format!("Deleted actor: {}", params.actor_name),
            &body,
        )))
    }

    /// Modify an actor's transform, folder, or mesh.
    #[tool(description = "Modify an existing actor: location, rotation, scale, World Outliner folder, or static mesh. Prior transform values are captured so those changes can be undone; folder and mesh changes are forward-only.")]
    async fn actor_modify(
        &self,
        Parameters(params): Parameters<ModifyParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let prior = self.prior_actor_state(&params.actor_name).await;

        let mut args = json!({ "actorName": params.actor_name, "validate": params.validate });
        if let Some(location) = params.location {
            args["location"] = json!(location);
        }
        if let Some(rotation) = params.rotation {
            args["rotation"] = json!(rotation);
        }
        if let Some(scale) = params.scale {
            args["scale"] = json!(scale);
        }
        if let Some(folder) = &params.folder {
            args["folder"] = json!(folder);
        }
        if let Some(mesh) = &params.mesh {
            args["mesh"] = json!(mesh);
        }

        let description = format!("Modify {}", params.actor_name);
        let id = self
            .history
            .lock()
            .record("actor_modify", args.clone(), description, None);

        let body = self.run_recorded(id, "actor.modify", args).await?;

        // Undo restores only the transform fields this call changed.
        // The listener reports no folder or mesh state, so a change to
        // those alone is not reversible.
        if let Some(prior) = prior {
            let mut undo_data = json!({ "actorName": params.actor_name });
            let mut captured = false;
            let changed = [
                ("location", params.location.is_some()),
                ("rotation", params.rotation.is_some()),
                ("scale", params.scale.is_some()),
            ];
            for (key, was_changed) in changed {
                if was_changed {
                    if let Some(value) = captured_transform(&prior, key) {
                        undo_data[key] = value;
                        captured = true;
                    }
                }
            }
            if captured {
                self.history.lock().update_undo_data(id, undo_data);
            }
        }

        Ok(text_result(format::with_validation(
            format::modify_summary(&body),
            &body,
        )))
    }

    /// Duplicate an actor with an offset.
    #[tool(description = "Duplicate an existing actor with an [X, Y, Z] offset. The duplicate is recorded in the undo history.")]
    async fn actor_duplicate(
        &self,
        Parameters(params): Parameters<DuplicateParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = json!({
            "sourceName": params.source_name,
            "name": params.name,
            "offset": { "x": params.offset[0], "y": params.offset[1], "z": params.offset[2] },
            "validate": params.validate,
        });
        let description = format!("Duplicate {}", params.source_name);
        let id = self
            .history
            .lock()
            .record("actor_duplicate", args.clone(), description, None);

        let body = self.run_recorded(id, "actor.duplicate", args).await?;

        if let Some(actor_name) = body.get("actorName").and_then(Value::as_str) {
            self.history
                .lock()
                .update_undo_data(id, json!({ "actorName": actor_name }));
        }

        Ok(text_result(format::with_validation(
            format::spawn_summary(&body).replace("Spawned", "Duplicated"),
            &body,
        )))
    }

    /// Move actors into a World Outliner folder.
    #[tool(description = "Move actors into a World Outliner folder, selected either by explicit labels or by a label pattern. Recorded in history but not undoable (the editor does not report prior folders).")]
    async fn actor_organize(
        &self,
        Parameters(params): Parameters<OrganizeParams>,
    ) -> Result<CallToolResult, ErrorData> {
        if params.actors.is_none() && params.pattern.is_none() {
            return Err(ErrorData::invalid_params(
                "either 'actors' or 'pattern' is required",
                None,
            ));
        }

        let args = json!({
            "actors": params.actors,
            "pattern": params.pattern,
            "folder": params.folder,
        });
        let description = format!("Organize actors into {}", params.folder);
        let id = self
            .history
            .lock()
            .record("actor_organize", args.clone(), description, None);

        // No undo data: the listener reports no folder state to restore.
        let body = self.run_recorded(id, "actor.organize", args).await?;

        Ok(text_result(
            match body.get("count").and_then(Value::as_u64) {
                Some(count) => format!("Organized {count} actor(s) into {}", params.folder),
                None => format!("Organized actors into {}", params.folder),
            },
        ))
    }

    /// Snap an actor to a socket on another actor's mesh.
    #[tool(description = "Snap an actor onto a named socket of another actor's static mesh, with an optional extra offset. The prior transform is captured so the snap can be undone.")]
    async fn actor_snap_to_socket(
        &self,
        Parameters(params): Parameters<SnapToSocketParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let prior = self.prior_actor_state(&params.actor_name).await;

        let args = json!({
            "actorName": params.actor_name,
            "targetActor": params.target_actor,
            "targetSocket": params.target_socket,
            "offset": params.offset,
            "validate": params.validate,
        });
        let description = format!(
            "Snap {} to {}:{}",
            params.actor_name, params.target_actor, params.target_socket
        );
        let id = self
            .history
            .lock()
            .record("actor_snap_to_socket", args.clone(), description, None);

        let body = self.run_recorded(id, "actor.snap_to_socket", args).await?;

        if let Some(prior) = prior {
            let mut undo_data = json!({ "actorName": params.actor_name });
            let mut captured = false;
            for key in ["location", "rotation"] {
                if let Some(value) = captured_transform(&prior, key) {
                    undo_data[key] = value;
                    captured = true;
                }
            }
            if captured {
                self.history.lock().update_undo_data(id, undo_data);
            }
        }

        Ok(text_result(format::with_validation(
            format!(
                "Snapped {} to socket {} on {}",
                params.actor_name, params.target_socket, params.target_actor
            ),
            &body,
        )))
    }

    /// Check modular placement for gaps, overlaps, and misalignment.
    #[tool(description = "Validate modular building placement: reports gaps, overlaps, and grid misalignment for the given actors. Read-only.")]
    async fn placement_validate(
        &self,
        Parameters(params): Parameters<PlacementValidateParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let body = self
            .bridge
            .send(
                "actor.placement_validate",
                json!({
                    "actors": params.actors,
                    "tolerance": params.tolerance,
                    "checkAlignment": params.check_alignment,
                }),
            )
            .await
            .map_err(bridge_error)?;
        Ok(text_result(format::json_block(&body)))
    }

    // ── Batch tools ─────────────────────────────────────────────

    /// Spawn several actors in one editor request.
    #[tool(description = "Spawn multiple actors in a single editor request. Optionally apply a common World Outliner folder; set validate=false to skip post-spawn checks for speed. Undoable as one unit.")]
    async fn batch_spawn(
        &self,
        Parameters(params): Parameters<BatchSpawnParams>,
    ) -> Result<CallToolResult, ErrorData> {
        if params.actors.is_empty() {
            return Err(ErrorData::invalid_params("'actors' must not be empty", None));
        }

        let args = json!({
            "actors": params.actors,
            "commonFolder": params.common_folder,
            "validate": params.validate,
        });
        let description = format!("Batch spawn of {} actors", params.actors.len());
        let id = self
            .history
            .lock()
            .record("batch_spawn", args.clone(), description, None);

        let body = self.run_recorded(id, "actor.batch_spawn", args).await?;

        let spawned_names: Vec<String> = body
            .get("actors")
            .and_then(Value::as_array)
            .map(|actors| {
                actors
                    .iter()
                    .filter_map(|a| a.get("actorName").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if !spawned_names.is_empty() {
            self.history
                .lock()
                .update_undo_data(id, json!({ "spawnedActors": spawned_names }));
        }

        let spawned = body.get("spawned").and_then(Value::as_u64).unwrap_or(0);
        let failed = body.get("failed").and_then(Value::as_u64).unwrap_or(0);
        let mut summary = format!("Batch spawn complete: {spawned} spawned, {failed} failed");
        if let Some(folder) = &params.common_folder {
            summary.push_str(&format!(" (folder: {folder})"));
        }
        Ok(text_result(format::with_validation(summary, &body)))
    }

    /// Run a mixed list of operations sequentially.
    #[tool(description = "Execute an ordered list of heterogeneous operations (spawn, modify, delete, duplicate, camera, screenshot) sequentially in one call. A failed item does not stop later items; per-item results are returned in order.")]
    async fn batch_operations(
        &self,
        Parameters(params): Parameters<BatchOperationsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        if params.operations.is_empty() {
            return Err(ErrorData::invalid_params(
                "'operations' must not be empty",
                None,
            ));
        }

        let args = serde_json::to_value(&params.operations)
            .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
        let description = format!("Batch of {} operations", params.operations.len());
        let id = self
            .history
            .lock()
            .record("batch_operations", args, description, None);

        let summary = batch::execute_batch(&self.bridge, params.operations).await;

        {
            let mut history = self.history.lock();
            let summary_json = serde_json::to_value(&summary)
                .unwrap_or_else(|_| json!({ "success": summary.success }));
            history.attach_result(id, summary_json);
            // All-items-failed is the closest thing a best-effort batch
            // has to a failed forward call.
            if summary.success_count == 0 {
                history.mark_failed(id);
            }
        }

        let mut text = format!(
            "Batch complete: {} succeeded, {} failed in {:.2}s",
            summary.success_count, summary.failure_count, summary.execution_time
        );
        for item in summary.operations.iter().filter(|item| !item.success) {
            text.push_str(&format!(
                "\n  - {} ({:?}) failed: {}",
                item.id,
                item.operation,
                item.error.as_deref().unwrap_or("unknown error")
            ));
        }
        Ok(text_result(text))
    }

    // ── Material tools ──────────────────────────────────────────

    /// Apply a material to an actor's slot.
    #[tool(description = "Apply a material asset to a slot on an actor's static mesh. The previous material, if reported by the editor, is captured so the change can be undone.")]
    async fn material_apply(
        &self,
        Parameters(params): Parameters<MaterialApplyParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = json!({
            "actorName": params.actor_name,
            "materialPath": params.material_path,
            "slotIndex": params.slot_index,
            "validate": params.validate,
        });
        let description = format!(
            "Apply {} to {}",
            params.material_path, params.actor_name
        );
        let id = self
            .history
            .lock()
            .record("material_apply", args.clone(), description, None);

        let body = self.run_recorded(id, "material.apply", args).await?;

        if let Some(previous) = body.get("previousMaterial").and_then(Value::as_str) {
            self.history.lock().update_undo_data(
                id,
                json!({
                    "actorName": params.actor_name,
                    "previousMaterial": previous,
                    "slotIndex": params.slot_index,
                }),
            );
        }

        Ok(text_result(format::with_validation(
            format!(
                "Applied {} to {} (slot {})",
                params.material_path, params.actor_name, params.slot_index
            ),
            &body,
        )))
    }

    /// Create a simple material asset.
    #[tool(description = "Create a simple material asset with base color, metallic, and roughness values. Recorded in history but not undoable.")]
    async fn material_create(
        &self,
        Parameters(params): Parameters<MaterialCreateParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = json!({
            "materialName": params.material_name,
            "baseColor": params.base_color,
            "metallic": params.metallic,
            "roughness": params.roughness,
            "folder": params.folder,
        });
        let description = format!("Create material {}", params.material_name);
        let id = self
            .history
            .lock()
            .record("material_create", args.clone(), description, None);

        let body = self.run_recorded(id, "material.create", args).await?;

        let path = body
            .get("materialPath")
            .and_then(Value::as_str)
            .unwrap_or(&params.material_name);
        Ok(text_result(format!("Created material {path}")))
    }

    /// List material assets under a path.
    #[tool(description = "List material assets under a content-browser path, optionally filtered by a name pattern. Read-only.")]
    async fn material_list(
        &self,
        Parameters(params): Parameters<MaterialListParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let body = self
            .bridge
            .send(
                "material.list",
                json!({
                    "path": params.path,
                    "pattern": params.pattern,
                    "limit": params.limit,
                }),
            )
            .await
            .map_err(bridge_error)?;
        Ok(text_result(format::json_block(&body)))
    }

    /// Inspect a material asset.
    #[tool(description = "Get detailed information about a material asset: type, parent, parameters. Read-only.")]
    async fn material_info(
        &self,
        Parameters(params): Parameters<MaterialInfoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let body = self
            .bridge
            .send(
                "material.info",
                json!({ "materialPath": params.material_path }),
            )
            .await
            .map_err(bridge_error)?;
        Ok(text_result(format::json_block(&body)))
    }

    // ── Blueprint tools ─────────────────────────────────────────

    /// Create a blueprint class.
    #[tool(description = "Create a new blueprint class with optional components and variables. Recorded in history but not undoable.")]
    async fn blueprint_create(
        &self,
        Parameters(params): Parameters<BlueprintCreateParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = json!({
            "className": params.class_name,
            "parentClass": params.parent_class,
            "components": params.components,
            "variables": params.variables,
            "folder": params.folder,
        });
        let description = format!("Create blueprint {}", params.class_name);
        let id = self
            .history
            .lock()
            .record("blueprint_create", args.clone(), description, None);

        let body = self.run_recorded(id, "blueprint.create", args).await?;

        let path = body
            .get("blueprintPath")
            .and_then(Value::as_str)
            .unwrap_or(&params.class_name);
        Ok(text_result(format!("Created blueprint {path}")))
    }

    /// Inspect a blueprint asset.
    #[tool(description = "Get information about a blueprint asset: parent class, components, variables. Read-only.")]
    async fn blueprint_get_info(
        &self,
        Parameters(params): Parameters<BlueprintGetInfoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let body = self
            .bridge
            .send(
                "blueprint.get_info",
                json!({ "blueprintPath": params.blueprint_path }),
            )
            .await
            .map_err(bridge_error)?;
        Ok(text_result(format::json_block(&body)))
    }

    // ── Asset tools ─────────────────────────────────────────────

    /// List assets under a content-browser path.
    #[tool(description = "List assets under a content-browser path, optionally filtered by asset type. Use this to find valid assetPath values for actor_spawn. Read-only.")]
    async fn asset_list(
        &self,
        Parameters(params): Parameters<AssetListParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let body = self
            .bridge
            .send(
                "asset.list",
                json!({
                    "path": params.path,
                    "assetType": params.asset_type,
                    "limit": params.limit,
                }),
            )
            .await
            .map_err(bridge_error)?;
        Ok(text_result(format::json_block(&body)))
    }

    /// Inspect an asset's geometry and slots.
    #[tool(description = "Get detailed information about an asset: bounds, pivot, sockets, collision, and material slots. Read-only.")]
    async fn asset_info(
        &self,
        Parameters(params): Parameters<AssetInfoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let body = self
            .bridge
            .send("asset.info", json!({ "assetPath": params.asset_path }))
            .await
            .map_err(bridge_error)?;
        Ok(text_result(format::json_block(&body)))
    }

    // ── Level & viewport tools ──────────────────────────────────

    /// List actors in the current level.
    #[tool(description = "List actors in the current level, optionally filtered by a label substring. Read-only.")]
    async fn level_actors(
        &self,
        Parameters(params): Parameters<LevelActorsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let body = self
            .bridge
            .send(
                "level.actors",
                json!({ "filter": params.filter, "limit": params.limit }),
            )
            .await
            .map_err(bridge_error)?;
        Ok(text_result(format::json_block(&body)))
    }

    /// Save the current level.
    #[tool(description = "Save the current level to disk.")]
    async fn level_save(&self) -> Result<CallToolResult, ErrorData> {
        self.bridge
            .send("level.save", json!({}))
            .await
            .map_err(bridge_error)?;
        Ok(text_result("Level saved".to_string()))
    }

    /// Position the viewport camera.
    #[tool(description = "Position the viewport camera, either explicitly by location/rotation or by focusing an actor at a distance.")]
    async fn viewport_camera(
        &self,
        Parameters(params): Parameters<ViewportCameraParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let body = self
            .bridge
            .send(
                "viewport.camera",
                json!({
                    "location": params.location,
                    "rotation": params.rotation,
                    "distance": params.distance,
                    "focusActor": params.focus_actor,
                }),
            )
            .await
            .map_err(bridge_error)?;
        Ok(text_result(format::json_block(&body)))
    }

    /// Frame an actor in the viewport.
    #[tool(description = "Focus the viewport camera on an actor, optionally keeping the current camera angles.")]
    async fn viewport_focus(
        &self,
        Parameters(params): Parameters<ViewportFocusParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.bridge
            .send(
                "viewport.focus",
                json!({
                    "actorName": params.actor_name,
                    "preserveRotation": params.preserve_rotation,
                }),
            )
            .await
            .map_err(bridge_error)?;
        Ok(text_result(format!(
            "Viewport focused on {}",
            params.actor_name
        )))
    }

    /// Position the camera for a standard view.
    #[tool(description = "Position the viewport camera for a standard view: top, bottom, left, right, front, back, or perspective.")]
    async fn viewport_mode(
        &self,
        Parameters(params): Parameters<ViewportModeParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.bridge
            .send("viewport.mode", json!({ "mode": params.mode }))
            .await
            .map_err(bridge_error)?;
        Ok(text_result(format!("Viewport set to {} view", params.mode)))
    }

    /// Change the viewport rendering mode.
    #[tool(description = "Change the viewport rendering mode: lit, unlit, or wireframe.")]
    async fn viewport_render_mode(
        &self,
        Parameters(params): Parameters<ViewportRenderModeParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.bridge
            .send("viewport.render_mode", json!({ "mode": params.mode }))
            .await
            .map_err(bridge_error)?;
        Ok(text_result(format!(
            "Viewport render mode set to {}",
            params.mode
        )))
    }

    /// Capture a viewport screenshot.
    #[tool(description = "Capture a screenshot of the editor viewport and return the file path.")]
    async fn viewport_screenshot(
        &self,
        Parameters(params): Parameters<ViewportScreenshotParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let body = self
            .bridge
            .send(
                "viewport.screenshot",
                json!({
                    "width": params.width,
                    "height": params.height,
                    "screenPercentage": params.screen_percentage,
                }),
            )
            .await
            .map_err(bridge_error)?;
        let path = body
            .get("filepath")
            .and_then(Value::as_str)
            .unwrap_or("<unknown path>");
        Ok(text_result(format!("Screenshot saved to {path}")))
    }

    /// Check whether the editor listener is reachable.
    #[tool(description = "Probe the Unreal Editor listener's status endpoint. Distinguishes 'editor offline' from command failures.")]
    async fn system_status(&self) -> Result<CallToolResult, ErrorData> {
        let status = self.bridge.probe().await.map_err(bridge_error)?;
        Ok(text_result(format::json_block(&status)))
    }

    // ── History tools ───────────────────────────────────────────

    /// Undo recent operations.
    #[tool(description = "Undo the most recent operation(s) by replaying their captured inverse state. Stops at the first operation that cannot be undone.")]
    async fn undo(
        &self,
        Parameters(params): Parameters<UndoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let report = replay::undo(&self.bridge, &self.history, params.count.max(1)).await;
        Ok(text_result(replay_text("Undid", &report)))
    }

    /// Redo previously undone operations.
    #[tool(description = "Redo previously undone operation(s) by resending their original commands. Stops at the first operation that cannot be redone.")]
    async fn redo(
        &self,
        Parameters(params): Parameters<RedoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let report = replay::redo(&self.bridge, &self.history, params.count.max(1)).await;
        Ok(text_result(replay_text("Redid", &report)))
    }

    /// Create a named checkpoint at the current history position.
    #[tool(description = "Create a named checkpoint at the current history position, for later restore with checkpoint_restore.")]
    async fn checkpoint_create(
        &self,
        Parameters(params): Parameters<CheckpointCreateParams>,
    ) -> Result<CallToolResult, ErrorData> {
        if params.name.trim().is_empty() {
            return Err(ErrorData::invalid_params(
                "checkpoint name must not be empty",
                None,
            ));
        }

        let description = params
            .description
            .clone()
            .unwrap_or_else(|| format!("Checkpoint: {}", params.name));
        let index = {
            let mut history = self.history.lock();
            // A marker entry makes the checkpoint visible in the listing;
            // replay passes over it without a listener call.
            history.record(
                replay::CHECKPOINT_TOOL,
                json!({ "name": params.name, "description": params.description }),
                description,
                Some(params.name.clone()),
            );
            history.current_index()
        };

        Ok(text_result(format!(
            "Created checkpoint '{}' at history index {index}",
            params.name
        )))
    }

    /// Restore the level to a named checkpoint.
    #[tool(description = "Restore the session to a named checkpoint by undoing or redoing the operations between here and there. Reports partial progress if a step fails.")]
    async fn checkpoint_restore(
        &self,
        Parameters(params): Parameters<CheckpointRestoreParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let report = replay::restore_checkpoint(&self.bridge, &self.history, &params.name)
            .await
            .map_err(|e| ErrorData::invalid_params(e.to_string(), None))?;

        let mut text = format!(
            "Restore to '{}': {} undone, {} redone",
            report.checkpoint,
            report.undone_ops.len(),
            report.redone_ops.len()
        );
        for op in report.undone_ops.iter().chain(report.redone_ops.iter()) {
            text.push_str(&format!("\n  - {op}"));
        }
        if !report.errors.is_empty() {
            text.push_str("\nErrors:");
            for error in &report.errors {
                text.push_str(&format!("\n  - {error}"));
            }
            text.push_str(&format!(
                "\nRestore halted early; history position is now index {}",
                report.current_index
            ));
        } else {
            text.push_str(&format!(
                "\nHistory position: index {}",
                report.current_index
            ));
        }
        Ok(text_result(text))
    }

    /// Show the operation history around the cursor.
    #[tool(description = "Show operation history status: current position, checkpoints, and the operations available for undo and redo.")]
    async fn history_list(
        &self,
        Parameters(params): Parameters<HistoryListParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let (status, undoable, redoable) = {
            let history = self.history.lock();
            (
                history.status(),
                history.undo_history(params.limit),
                history.redo_history(params.limit),
            )
        };

        let mut text = format!(
            "History: {} operation(s), position {} (undo {}, redo {})",
            status.total_operations,
            status.current_index,
            if status.can_undo { "available" } else { "empty" },
            if status.can_redo { "available" } else { "empty" },
        );
        if !status.checkpoints.is_empty() {
            text.push_str(&format!(
                "\nCheckpoints: {}",
                status.checkpoints.join(", ")
            ));
        }
        if !undoable.is_empty() {
            text.push_str("\nUndoable (most recent first):");
            for op in &undoable {
                text.push_str(&format!(
                    "\n  - {}{}",
                    op.description,
                    if op.failed { " [failed]" } else { "" }
                ));
            }
        }
        if !redoable.is_empty() {
            text.push_str("\nRedoable:");
            for op in &redoable {
                text.push_str(&format!("\n  - {}", op.description));
            }
        }
        Ok(text_result(text))
    }
}

/// Render an undo/redo report as response text.
fn replay_text(verb: &str, report: &replay::ReplayReport) -> String {
    let mut text = format!("{verb} {} operation(s)", report.completed.len());
    for op in &report.completed {
        text.push_str(&format!("\n  - {op}"));
    }
    if !report.errors.is_empty() {
        text.push_str("\nErrors:");
        for error in &report.errors {
            text.push_str(&format!("\n  - {error}"));
        }
    }
    text.push_str(&format!(
        "\nHistory position: index {}",
        report.current_index
    ));
    text
}
