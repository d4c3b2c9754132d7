//! uebridge - MCP bridge for the Unreal Editor Python listener.
//!
//! Exposes scene-editing operations (actor spawn/modify/delete, materials,
//! blueprints, viewport control) as MCP tools. Each tool call is validated,
//! translated to a `{type, params}` command, and POSTed to the editor's
//! local HTTP listener. Mutating operations are tracked in an in-process
//! operation history that supports undo, redo, and named checkpoints.

pub mod batch;
pub mod bridge;
pub mod commands;
pub mod config;
pub mod history;
pub mod mcp;
pub mod replay;
