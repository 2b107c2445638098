use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reusable tag applicable to any number of tasks.
///
/// Labels are independent entities; tasks reference them through a join
/// relation. Deleting a label detaches it from every task without touching
/// the tasks themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLabelInput {
    pub name: String,
    pub color: String,
    pub icon: String,
}
