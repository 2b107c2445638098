use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable record of one field's before/after value at one update.
///
/// History is like `git log` for a task: `update_task` appends one entry per
/// top-level field whose value actually changed, comparing serialized forms
/// so composite fields (labels, subtasks) diff structurally. Entries are
/// never modified and are deleted only when their owning task is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskHistory {
    pub id: Uuid,
    pub task_id: Uuid,
    /// The task field that changed (e.g., `name`, `priority`, `labels`).
    pub field: String,
    /// Serialized value before the update. `None` when the field was unset.
    pub old_value: Option<serde_json::Value>,
    /// Serialized value after the update. `None` when the field was cleared.
    pub new_value: Option<serde_json::Value>,
    pub changed_at: DateTime<Utc>,
}
