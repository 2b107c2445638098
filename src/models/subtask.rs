use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A checklist item owned by exactly one task.
///
/// Subtasks have no independent lifetime: they are created and destroyed as
/// part of their owning task, and replacing a task's subtask set regenerates
/// their ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtask {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input shape for a subtask supplied at task creation or update.
///
/// Ids and timestamps are always assigned by the store, so the input carries
/// only the user-visible fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtaskInput {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}
