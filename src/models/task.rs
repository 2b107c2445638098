use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Label, Subtask, SubtaskInput, TaskHistory};

/// A task assembled from its normalized rows.
///
/// The scalar fields live in the `tasks` table; `labels`, `subtasks`,
/// `reminders`, `attachments`, and `history` are attached from child tables
/// on every read. `completed_at` is stamped and cleared only by the
/// completion transition in `update_task` — no other path mutates it, and
/// task creation never sets it even when `completed: true` is supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// The day this task is scheduled for. Views compare this at
    /// calendar-day granularity.
    pub date: Option<DateTime<Utc>>,
    pub deadline: Option<DateTime<Utc>>,
    /// Reminder times, ascending.
    pub reminders: Vec<DateTime<Utc>>,
    /// Estimated effort in minutes.
    pub estimate: Option<i64>,
    /// Actual time spent in minutes.
    pub actual_time: Option<i64>,
    pub labels: Vec<Label>,
    pub priority: Priority,
    pub subtasks: Vec<Subtask>,
    pub recurring: Option<RecurringType>,
    pub recurring_config: Option<RecurringConfig>,
    pub list_id: Uuid,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Change log, most recent first.
    pub history: Vec<TaskHistory>,
    /// Attachment file paths, creation order.
    pub attachments: Vec<String>,
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    None,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Recurrence pattern for a repeating task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurringType {
    Daily,
    Weekly,
    Weekdays,
    Monthly,
    Yearly,
    Custom,
}

impl RecurringType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Weekdays => "weekdays",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Custom => "custom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "weekdays" => Some(Self::Weekdays),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Parameters refining a `custom` (or any) recurrence. Stored as a JSON
/// column; all knobs are optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurringConfig {
    pub interval: Option<u32>,
    /// 0 = Sunday .. 6 = Saturday.
    pub days_of_week: Option<Vec<u8>>,
    pub day_of_month: Option<u8>,
    pub month_of_year: Option<u8>,
}

/// Input for creating a new task.
///
/// Labels must already exist — only the link rows are written. Subtasks,
/// reminders, and attachments are created as owned child rows. A missing
/// `list_id` resolves to the default list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskInput {
    pub name: String,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reminders: Vec<DateTime<Utc>>,
    pub estimate: Option<i64>,
    pub actual_time: Option<i64>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub subtasks: Vec<SubtaskInput>,
    pub recurring: Option<RecurringType>,
    pub recurring_config: Option<RecurringConfig>,
    pub list_id: Option<Uuid>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// Input for a partial task update. Absent fields are left untouched —
/// a partial update is never a full replace.
///
/// `labels` and `subtasks`, when present, replace the entire existing set.
/// Reminders and attachments are create-only and have no update path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub deadline: Option<DateTime<Utc>>,
    pub estimate: Option<i64>,
    pub actual_time: Option<i64>,
    pub labels: Option<Vec<Label>>,
    pub priority: Option<Priority>,
    pub subtasks: Option<Vec<SubtaskInput>>,
    pub recurring: Option<RecurringType>,
    pub recurring_config: Option<RecurringConfig>,
    pub list_id: Option<Uuid>,
    pub completed: Option<bool>,
}
