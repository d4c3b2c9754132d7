//! In-process operation history with undo/redo cursor and checkpoints.
//!
//! One instance lives for the whole process (constructor-injected into the
//! MCP server, wrapped in `parking_lot::Mutex`). Nothing is persisted; a
//! restart loses all history.
//!
//! The log is partitioned by `applied`: operations at indices below it have
//! been applied, operations at or above it are the redo tail left behind by
//! undos. Recording while a redo tail exists discards the tail — standard
//! undo-stack semantics. Failed operations are never physically removed;
//! they stay in the log tagged `failed` so cursor arithmetic stays simple
//! and the listing shows what was attempted.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// A single recorded mutating operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique for the process lifetime.
    pub id: Uuid,
    /// The logical tool invoked, not the listener command type.
    pub tool_name: String,
    /// The exact argument object supplied by the caller. Redo resends this.
    pub args: Value,
    /// One-line human-readable summary.
    pub description: String,
    /// Milliseconds since the Unix epoch at record time.
    pub timestamp_ms: u64,
    /// Present only if this entry doubles as a named checkpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoint_name: Option<String>,
    /// Captured prior state needed to reverse the operation. Absent when
    /// the tool does not support undo. Undo replays this, never `args`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub undo_data: Option<Value>,
    /// The listener's response, attached after the forward call completes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// The forward call failed. The entry keeps its history slot.
    pub failed: bool,
}

/// Derived cursor state, reported by the history tools.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStatus {
    /// Index of the most recently applied operation, -1 when none.
    pub current_index: i64,
    pub total_operations: usize,
    pub can_undo: bool,
    pub can_redo: bool,
    /// Checkpoint names currently resolvable, ordered by position.
    pub checkpoints: Vec<String>,
}

/// Ordered operation log plus undo cursor and checkpoint labels.
#[derive(Debug, Default)]
pub struct OperationHistory {
    operations: Vec<Operation>,
    /// Count of applied operations; the cursor sits at `applied - 1`.
    applied: usize,
    /// Latest position each checkpoint name was set at. A name may point
    /// at -1 (checkpoint taken before any operation was recorded).
    checkpoints: HashMap<String, i64>,
}

impl OperationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the most recently applied operation, -1 when none.
    pub fn current_index(&self) -> i64 {
        self.applied as i64 - 1
    }

    /// Append a new operation at the cursor, discarding any redo tail, and
    /// advance the cursor onto it. Returns the new operation's id.
    ///
    /// Callers record BEFORE the forward listener call so even unconfirmed
    /// attempts hold a history slot; [`mark_failed`](Self::mark_failed)
    /// tags the entry if the call then fails.
    pub fn record(
        &mut self,
        tool_name: &str,
        args: Value,
        description: String,
        checkpoint_name: Option<String>,
    ) -> Uuid {
        // Truncating forgets any checkpoint that pointed into the tail.
        self.operations.truncate(self.applied);
        let last_kept = self.current_index();
        self.checkpoints.retain(|_, index| *index <= last_kept);

        let id = Uuid::new_v4();
        if let Some(name) = &checkpoint_name {
            self.checkpoints
                .insert(name.clone(), self.operations.len() as i64);
        }
        self.operations.push(Operation {
            id,
            tool_name: tool_name.to_string(),
            args,
            description,
            timestamp_ms: now_ms(),
            checkpoint_name,
            undo_data: None,
            result: None,
            failed: false,
        });
        self.applied = self.operations.len();
        id
    }

    /// Attach undo data to the operation with the given id.
    pub fn update_undo_data(&mut self, id: Uuid, undo_data: Value) -> bool {
        match self.find_mut(id) {
            Some(op) => {
                op.undo_data = Some(undo_data);
                true
            }
            None => false,
        }
    }

    /// Attach the listener's result to the operation with the given id.
    pub fn attach_result(&mut self, id: Uuid, result: Value) -> bool {
        match self.find_mut(id) {
            Some(op) => {
                op.result = Some(result);
                true
            }
            None => false,
        }
    }

    /// Tag the operation as failed. The entry is kept, not removed.
    pub fn mark_failed(&mut self, id: Uuid) -> bool {
        match self.find_mut(id) {
            Some(op) => {
                op.failed = true;
                true
            }
            None => false,
        }
    }

    /// The operation the next undo would reverse, if any.
    pub fn undoable(&self) -> Option<&Operation> {
        self.applied.checked_sub(1).map(|i| &self.operations[i])
    }

    /// Move the cursor back one step. Call only after the inverse command
    /// succeeded.
    pub fn mark_undone(&mut self) {
        debug_assert!(self.applied > 0, "mark_undone with nothing applied");
        self.applied = self.applied.saturating_sub(1);
    }

    /// The operation the next redo would replay, if any.
    pub fn redoable(&self) -> Option<&Operation> {
        self.operations.get(self.applied)
    }

    /// Move the cursor forward one step. Call only after the replayed
    /// command succeeded.
    pub fn mark_redone(&mut self) {
        debug_assert!(
            self.applied < self.operations.len(),
            "mark_redone with no redo tail"
        );
        self.applied = (self.applied + 1).min(self.operations.len());
    }

    /// Label the current cursor position with `name`. Does not create an
    /// operation entry; callers that want the checkpoint visible in the
    /// listing record an entry carrying the same `checkpoint_name`.
    ///
    /// Re-using a name moves what the name resolves to; the historical
    /// entry keeps its label.
    pub fn create_checkpoint(&mut self, name: &str) {
        self.checkpoints.insert(name.to_string(), self.current_index());
        if let Some(i) = self.applied.checked_sub(1) {
            self.operations[i].checkpoint_name = Some(name.to_string());
        }
    }

    /// Latest position at which `name` was set, or None.
    pub fn checkpoint_index(&self, name: &str) -> Option<i64> {
        self.checkpoints.get(name).copied()
    }

    pub fn status(&self) -> HistoryStatus {
        let mut checkpoints: Vec<(&String, i64)> =
            self.checkpoints.iter().map(|(n, i)| (n, *i)).collect();
        checkpoints.sort_by_key(|(_, index)| *index);
        HistoryStatus {
            current_index: self.current_index(),
            total_operations: self.operations.len(),
            can_undo: self.applied > 0,
            can_redo: self.applied < self.operations.len(),
            checkpoints: checkpoints.into_iter().map(|(n, _)| n.clone()).collect(),
        }
    }

    /// Applied operations, most recent first, at most `limit`.
    pub fn undo_history(&self, limit: usize) -> Vec<Operation> {
        self.operations[..self.applied]
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Redo tail in replay order, at most `limit`.
    pub fn redo_history(&self, limit: usize) -> Vec<Operation> {
        self.operations[self.applied..]
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Every recorded operation in record order, including the redo tail.
    pub fn full_history(&self) -> &[Operation] {
        &self.operations
    }

    fn find_mut(&mut self, id: Uuid) -> Option<&mut Operation> {
        self.operations.iter_mut().find(|op| op.id == id)
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
