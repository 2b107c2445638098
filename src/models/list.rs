use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named bucket that groups tasks (e.g., "Inbox", "Work").
///
/// Exactly one list carries `is_default = true` after store initialization:
/// the "Inbox", created automatically on first startup. Tasks created without
/// an explicit `list_id` resolve to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List {
    pub id: Uuid,
    pub name: String,
    /// Display color as a hex string (e.g., `#3b82f6`).
    pub color: String,
    /// Display icon, typically an emoji.
    pub icon: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new list.
///
/// The store does not reject a second default-flagged list; when more than
/// one exists, default resolution picks one arbitrarily.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListInput {
    pub name: String,
    pub color: String,
    pub icon: String,
    #[serde(default)]
    pub is_default: bool,
}
