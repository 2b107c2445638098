mod error;
mod schema;

pub use error::StoreError;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, ToSql};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::models::*;

pub const INBOX_NAME: &str = "Inbox";
const INBOX_COLOR: &str = "#3b82f6";
const INBOX_ICON: &str = "\u{1F4E5}";

const TASK_COLUMNS: &str = "id, name, description, date, deadline, estimate, actual_time, \
     priority, recurring, recurring_config, list_id, completed, completed_at, \
     created_at, updated_at";

/// The task store: a single-writer relational persistence service over an
/// embedded SQLite database.
///
/// Every public operation takes the connection lock once; composite reads
/// assemble a [`Task`] from its scalar row plus five child-table queries.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "daylist")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("daylist.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    /// Check-then-create the default "Inbox" list. Safe to call on every
    /// startup; a second call finds the existing default and returns it.
    pub fn ensure_default_list(&self) -> Result<List> {
        let conn = self.conn.lock().expect("database lock poisoned");
        if let Some(list) = default_list(&conn)? {
            return Ok(list);
        }

        let id = Uuid::new_v4();
        let now = Utc::now();
        conn.execute(
            "INSERT INTO lists (id, name, color, icon, is_default, created_at, updated_at)
             VALUES (?, ?, ?, ?, 1, ?, ?)",
            (
                id.to_string(),
                INBOX_NAME,
                INBOX_COLOR,
                INBOX_ICON,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;
        tracing::info!("Created default list {}", INBOX_NAME);

        Ok(List {
            id,
            name: INBOX_NAME.to_string(),
            color: INBOX_COLOR.to_string(),
            icon: INBOX_ICON.to_string(),
            is_default: true,
            created_at: now,
            updated_at: now,
        })
    }

    // ============================================================
    // List operations
    // ============================================================

    pub fn get_lists(&self) -> Result<Vec<List>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, name, color, icon, is_default, created_at, updated_at
             FROM lists ORDER BY created_at",
        )?;

        let lists = stmt
            .query_map([], read_list)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(lists)
    }

    pub fn create_list(&self, input: CreateListInput) -> Result<List> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO lists (id, name, color, icon, is_default, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.name,
                &input.color,
                &input.icon,
                if input.is_default { 1 } else { 0 },
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(List {
            id,
            name: input.name,
            color: input.color,
            icon: input.icon,
            is_default: input.is_default,
            created_at: now,
            updated_at: now,
        })
    }

    // ============================================================
    // Label operations
    // ============================================================

    pub fn get_labels(&self) -> Result<Vec<Label>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, name, color, icon, created_at, updated_at
             FROM labels ORDER BY created_at",
        )?;

        let labels = stmt
            .query_map([], read_label)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(labels)
    }

    pub fn create_label(&self, input: CreateLabelInput) -> Result<Label> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO labels (id, name, color, icon, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.name,
                &input.color,
                &input.icon,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(Label {
            id,
            name: input.name,
            color: input.color,
            icon: input.icon,
            created_at: now,
            updated_at: now,
        })
    }

    // ============================================================
    // Task operations
    // ============================================================

    /// All tasks, newest first, each assembled with its child collections.
    pub fn get_tasks(&self) -> Result<Vec<Task>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt =
            conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC"))?;

        let rows = stmt
            .query_map([], read_task_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(|row| assemble_task(&conn, row)).collect()
    }

    pub fn get_task_by_id(&self, id: Uuid) -> Result<Option<Task>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        get_task(&conn, id)
    }

    /// Persist a new task and its owned children, then return it fully
    /// assembled.
    ///
    /// A missing `list_id` resolves to the default list; with no default
    /// list either, this fails with [`StoreError::MissingDefaultList`].
    /// `completed_at` is never stamped at creation, regardless of the
    /// `completed` input.
    pub fn create_task(&self, input: CreateTaskInput) -> Result<Task> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        let list_id = match input.list_id {
            Some(list_id) => list_id,
            None => default_list(&conn)?
                .map(|list| list.id)
                .ok_or(StoreError::MissingDefaultList)?,
        };

        conn.execute(
            &format!(
                "INSERT INTO tasks ({TASK_COLUMNS})
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NULL, ?, ?)"
            ),
            (
                id.to_string(),
                &input.name,
                &input.description,
                input.date.map(|d| d.to_rfc3339()),
                input.deadline.map(|d| d.to_rfc3339()),
                input.estimate,
                input.actual_time,
                input.priority.as_str(),
                input.recurring.map(|r| r.as_str()),
                input
                    .recurring_config
                    .as_ref()
                    .map(serde_json::to_string)
                    .transpose()?,
                list_id.to_string(),
                if input.completed { 1 } else { 0 },
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        for label in &input.labels {
            link_label(&conn, id, label.id)?;
        }
        for subtask in &input.subtasks {
            insert_subtask(&conn, id, subtask, now)?;
        }
        for reminder in &input.reminders {
            insert_reminder(&conn, id, *reminder, now)?;
        }
        for path in &input.attachments {
            insert_attachment(&conn, id, path, now)?;
        }

        get_task(&conn, id)?.ok_or_else(|| anyhow::anyhow!("task missing after insert"))
    }

    /// Apply a partial update, recording one history entry per field whose
    /// value actually changed (compared structurally against the pre-update
    /// task). Fields absent from the input are left untouched.
    ///
    /// Fails with [`StoreError::TaskNotFound`] when no task matches `id`.
    pub fn update_task(&self, id: Uuid, input: UpdateTaskInput) -> Result<Task> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let existing = get_task(&conn, id)?.ok_or(StoreError::TaskNotFound(id))?;
        let now = Utc::now();

        // Diff against the pre-update entity so history reflects actual
        // value transitions, not merely "field was present in the request".
        let mut changes: Vec<(&'static str, Value, Value)> = Vec::new();
        if let Some(name) = &input.name {
            diff_field(&mut changes, "name", &existing.name, name)?;
        }
        if let Some(description) = &input.description {
            diff_field(&mut changes, "description", &existing.description, description)?;
        }
        if let Some(date) = &input.date {
            diff_field(&mut changes, "date", &existing.date, date)?;
        }
        if let Some(deadline) = &input.deadline {
            diff_field(&mut changes, "deadline", &existing.deadline, deadline)?;
        }
        if let Some(estimate) = input.estimate {
            diff_field(&mut changes, "estimate", &existing.estimate, &estimate)?;
        }
        if let Some(actual_time) = input.actual_time {
            diff_field(&mut changes, "actual_time", &existing.actual_time, &actual_time)?;
        }
        if let Some(labels) = &input.labels {
            diff_field(&mut changes, "labels", &existing.labels, labels)?;
        }
        if let Some(priority) = input.priority {
            diff_field(&mut changes, "priority", &existing.priority, &priority)?;
        }
        if let Some(subtasks) = &input.subtasks {
            // Subtask inputs carry no ids or timestamps, so compare against
            // the same projection of the current rows.
            let current: Vec<SubtaskInput> = existing
                .subtasks
                .iter()
                .map(|s| SubtaskInput {
                    title: s.title.clone(),
                    completed: s.completed,
                })
                .collect();
            if serde_json::to_value(&current)? != serde_json::to_value(subtasks)? {
                changes.push((
                    "subtasks",
                    serde_json::to_value(&existing.subtasks)?,
                    serde_json::to_value(subtasks)?,
                ));
            }
        }
        if let Some(recurring) = input.recurring {
            diff_field(&mut changes, "recurring", &existing.recurring, &recurring)?;
        }
        if let Some(config) = &input.recurring_config {
            diff_field(&mut changes, "recurring_config", &existing.recurring_config, config)?;
        }
        if let Some(list_id) = input.list_id {
            diff_field(&mut changes, "list_id", &existing.list_id, &list_id)?;
        }
        if let Some(completed) = input.completed {
            diff_field(&mut changes, "completed", &existing.completed, &completed)?;
        }

        // Apply only explicitly supplied scalar columns.
        let mut sets: Vec<&str> = Vec::new();
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(name) = input.name {
            sets.push("name = ?");
            params.push(Box::new(name));
        }
        if let Some(description) = input.description {
            sets.push("description = ?");
            params.push(Box::new(description));
        }
        if let Some(date) = input.date {
            sets.push("date = ?");
            params.push(Box::new(date.to_rfc3339()));
        }
        if let Some(deadline) = input.deadline {
            sets.push("deadline = ?");
            params.push(Box::new(deadline.to_rfc3339()));
        }
        if let Some(estimate) = input.estimate {
            sets.push("estimate = ?");
            params.push(Box::new(estimate));
        }
        if let Some(actual_time) = input.actual_time {
            sets.push("actual_time = ?");
            params.push(Box::new(actual_time));
        }
        if let Some(priority) = input.priority {
            sets.push("priority = ?");
            params.push(Box::new(priority.as_str().to_string()));
        }
        if let Some(recurring) = input.recurring {
            sets.push("recurring = ?");
            params.push(Box::new(recurring.as_str().to_string()));
        }
        if let Some(config) = &input.recurring_config {
            sets.push("recurring_config = ?");
            params.push(Box::new(serde_json::to_string(config)?));
        }
        if let Some(list_id) = input.list_id {
            sets.push("list_id = ?");
            params.push(Box::new(list_id.to_string()));
        }
        if let Some(completed) = input.completed {
            sets.push("completed = ?");
            params.push(Box::new(if completed { 1 } else { 0 }));
            // The completion transition is the only path that touches
            // completed_at: completing stamps it, un-completing clears it.
            let completed_at: Option<String> = if completed {
                Some(now.to_rfc3339())
            } else {
                None
            };
            sets.push("completed_at = ?");
            params.push(Box::new(completed_at));
        }

        if !sets.is_empty() || input.labels.is_some() || input.subtasks.is_some() {
            sets.push("updated_at = ?");
            params.push(Box::new(now.to_rfc3339()));
            params.push(Box::new(id.to_string()));

            let sql = format!("UPDATE tasks SET {} WHERE id = ?", sets.join(", "));
            let params_ref: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
            conn.execute(&sql, params_ref.as_slice())?;
        }

        // Labels and subtasks are full-replace, not merge.
        if let Some(labels) = &input.labels {
            conn.execute("DELETE FROM task_labels WHERE task_id = ?", [id.to_string()])?;
            for label in labels {
                link_label(&conn, id, label.id)?;
            }
        }
        if let Some(subtasks) = &input.subtasks {
            conn.execute("DELETE FROM subtasks WHERE task_id = ?", [id.to_string()])?;
            for subtask in subtasks {
                insert_subtask(&conn, id, subtask, now)?;
            }
        }

        for (field, old_value, new_value) in &changes {
            insert_history(&conn, id, field, old_value, new_value, now)?;
        }

        get_task(&conn, id)?.ok_or_else(|| anyhow::anyhow!("task missing after update"))
    }

    /// Delete a task; subtasks, history, label links, reminders, and
    /// attachments go with it via cascade rules. Deleting a non-existent id
    /// is a no-op, not an error.
    pub fn delete_task(&self, id: Uuid) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute("DELETE FROM tasks WHERE id = ?", [id.to_string()])?;
        Ok(())
    }
}

// ============================================================
// Row mapping
// ============================================================

struct TaskRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    date: Option<DateTime<Utc>>,
    deadline: Option<DateTime<Utc>>,
    estimate: Option<i64>,
    actual_time: Option<i64>,
    priority: Priority,
    recurring: Option<RecurringType>,
    recurring_config: Option<RecurringConfig>,
    list_id: Uuid,
    completed: bool,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn read_task_row(row: &rusqlite::Row) -> rusqlite::Result<TaskRow> {
    Ok(TaskRow {
        id: parse_uuid(row.get::<_, String>(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        date: row.get::<_, Option<String>>(3)?.map(parse_datetime),
        deadline: row.get::<_, Option<String>>(4)?.map(parse_datetime),
        estimate: row.get(5)?,
        actual_time: row.get(6)?,
        priority: Priority::from_str(&row.get::<_, String>(7)?).unwrap_or(Priority::None),
        recurring: row
            .get::<_, Option<String>>(8)?
            .and_then(|s| RecurringType::from_str(&s)),
        recurring_config: row
            .get::<_, Option<String>>(9)?
            .and_then(|s| serde_json::from_str(&s).ok()),
        list_id: parse_uuid(row.get::<_, String>(10)?),
        completed: row.get::<_, i32>(11)? != 0,
        completed_at: row.get::<_, Option<String>>(12)?.map(parse_datetime),
        created_at: parse_datetime(row.get::<_, String>(13)?),
        updated_at: parse_datetime(row.get::<_, String>(14)?),
    })
}

fn read_list(row: &rusqlite::Row) -> rusqlite::Result<List> {
    Ok(List {
        id: parse_uuid(row.get::<_, String>(0)?),
        name: row.get(1)?,
        color: row.get(2)?,
        icon: row.get(3)?,
        is_default: row.get::<_, i32>(4)? != 0,
        created_at: parse_datetime(row.get::<_, String>(5)?),
        updated_at: parse_datetime(row.get::<_, String>(6)?),
    })
}

fn read_label(row: &rusqlite::Row) -> rusqlite::Result<Label> {
    Ok(Label {
        id: parse_uuid(row.get::<_, String>(0)?),
        name: row.get(1)?,
        color: row.get(2)?,
        icon: row.get(3)?,
        created_at: parse_datetime(row.get::<_, String>(4)?),
        updated_at: parse_datetime(row.get::<_, String>(5)?),
    })
}

// ============================================================
// Connection-level helpers
//
// Free functions over &Connection so composite operations can call them
// while already holding the store's lock.
// ============================================================

fn default_list(conn: &Connection) -> Result<Option<List>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, color, icon, is_default, created_at, updated_at
         FROM lists WHERE is_default = 1 LIMIT 1",
    )?;

    let mut rows = stmt.query([])?;
    if let Some(row) = rows.next()? {
        Ok(Some(read_list(row)?))
    } else {
        Ok(None)
    }
}

fn get_task(conn: &Connection, id: Uuid) -> Result<Option<Task>> {
    let mut stmt = conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))?;

    let mut rows = stmt.query([id.to_string()])?;
    match rows.next()? {
        Some(row) => {
            let task_row = read_task_row(row)?;
            Ok(Some(assemble_task(conn, task_row)?))
        }
        None => Ok(None),
    }
}

fn assemble_task(conn: &Connection, row: TaskRow) -> Result<Task> {
    Ok(Task {
        id: row.id,
        name: row.name,
        description: row.description,
        date: row.date,
        deadline: row.deadline,
        reminders: reminders_for_task(conn, row.id)?,
        estimate: row.estimate,
        actual_time: row.actual_time,
        labels: labels_for_task(conn, row.id)?,
        priority: row.priority,
        subtasks: subtasks_for_task(conn, row.id)?,
        recurring: row.recurring,
        recurring_config: row.recurring_config,
        list_id: row.list_id,
        completed: row.completed,
        completed_at: row.completed_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
        history: history_for_task(conn, row.id)?,
        attachments: attachments_for_task(conn, row.id)?,
    })
}

fn subtasks_for_task(conn: &Connection, task_id: Uuid) -> Result<Vec<Subtask>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, completed, created_at, updated_at
         FROM subtasks WHERE task_id = ? ORDER BY created_at",
    )?;

    let subtasks = stmt
        .query_map([task_id.to_string()], |row| {
            Ok(Subtask {
                id: parse_uuid(row.get::<_, String>(0)?),
                title: row.get(1)?,
                completed: row.get::<_, i32>(2)? != 0,
                created_at: parse_datetime(row.get::<_, String>(3)?),
                updated_at: parse_datetime(row.get::<_, String>(4)?),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(subtasks)
}

fn history_for_task(conn: &Connection, task_id: Uuid) -> Result<Vec<TaskHistory>> {
    let mut stmt = conn.prepare(
        "SELECT id, task_id, field, old_value, new_value, changed_at
         FROM task_history WHERE task_id = ? ORDER BY changed_at DESC",
    )?;

    let entries = stmt
        .query_map([task_id.to_string()], |row| {
            Ok(TaskHistory {
                id: parse_uuid(row.get::<_, String>(0)?),
                task_id: parse_uuid(row.get::<_, String>(1)?),
                field: row.get(2)?,
                old_value: row
                    .get::<_, Option<String>>(3)?
                    .and_then(|s| serde_json::from_str(&s).ok()),
                new_value: row
                    .get::<_, Option<String>>(4)?
                    .and_then(|s| serde_json::from_str(&s).ok()),
                changed_at: parse_datetime(row.get::<_, String>(5)?),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(entries)
}

fn labels_for_task(conn: &Connection, task_id: Uuid) -> Result<Vec<Label>> {
    let mut stmt = conn.prepare(
        "SELECT l.id, l.name, l.color, l.icon, l.created_at, l.updated_at
         FROM labels l
         JOIN task_labels tl ON l.id = tl.label_id
         WHERE tl.task_id = ?",
    )?;

    let labels = stmt
        .query_map([task_id.to_string()], read_label)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(labels)
}

fn reminders_for_task(conn: &Connection, task_id: Uuid) -> Result<Vec<DateTime<Utc>>> {
    let mut stmt = conn.prepare(
        "SELECT reminder_time FROM reminders WHERE task_id = ? ORDER BY reminder_time",
    )?;

    let reminders = stmt
        .query_map([task_id.to_string()], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(reminders.into_iter().map(parse_datetime).collect())
}

fn attachments_for_task(conn: &Connection, task_id: Uuid) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT file_path FROM attachments WHERE task_id = ? ORDER BY created_at",
    )?;

    let paths = stmt
        .query_map([task_id.to_string()], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(paths)
}

fn link_label(conn: &Connection, task_id: Uuid, label_id: Uuid) -> Result<()> {
    conn.execute(
        "INSERT INTO task_labels (task_id, label_id) VALUES (?, ?)",
        (task_id.to_string(), label_id.to_string()),
    )?;
    Ok(())
}

fn insert_subtask(
    conn: &Connection,
    task_id: Uuid,
    input: &SubtaskInput,
    now: DateTime<Utc>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO subtasks (id, task_id, title, completed, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
        (
            Uuid::new_v4().to_string(),
            task_id.to_string(),
            &input.title,
            if input.completed { 1 } else { 0 },
            now.to_rfc3339(),
            now.to_rfc3339(),
        ),
    )?;
    Ok(())
}

fn insert_reminder(
    conn: &Connection,
    task_id: Uuid,
    reminder_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO reminders (id, task_id, reminder_time, created_at) VALUES (?, ?, ?, ?)",
        (
            Uuid::new_v4().to_string(),
            task_id.to_string(),
            reminder_time.to_rfc3339(),
            now.to_rfc3339(),
        ),
    )?;
    Ok(())
}

fn insert_attachment(
    conn: &Connection,
    task_id: Uuid,
    file_path: &str,
    now: DateTime<Utc>,
) -> Result<()> {
    let file_name = file_path.rsplit('/').next().unwrap_or_default();
    conn.execute(
        "INSERT INTO attachments (id, task_id, file_path, file_name, created_at)
         VALUES (?, ?, ?, ?, ?)",
        (
            Uuid::new_v4().to_string(),
            task_id.to_string(),
            file_path,
            file_name,
            now.to_rfc3339(),
        ),
    )?;
    Ok(())
}

fn insert_history(
    conn: &Connection,
    task_id: Uuid,
    field: &str,
    old_value: &Value,
    new_value: &Value,
    changed_at: DateTime<Utc>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO task_history (id, task_id, field, old_value, new_value, changed_at)
         VALUES (?, ?, ?, ?, ?, ?)",
        (
            Uuid::new_v4().to_string(),
            task_id.to_string(),
            field,
            json_column(old_value),
            json_column(new_value),
            changed_at.to_rfc3339(),
        ),
    )?;
    Ok(())
}

/// Serialize one side of a history entry; JSON null maps to SQL NULL.
fn json_column(value: &Value) -> Option<String> {
    if value.is_null() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Record a change when the serialized forms differ.
fn diff_field<O, N>(
    changes: &mut Vec<(&'static str, Value, Value)>,
    field: &'static str,
    old: &O,
    new: &N,
) -> Result<()>
where
    O: Serialize + ?Sized,
    N: Serialize + ?Sized,
{
    let old = serde_json::to_value(old)?;
    let new = serde_json::to_value(new)?;
    if old != new {
        changes.push((field, old, new));
    }
    Ok(())
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Store {
        let store = Store::open_memory().unwrap();
        store.migrate().unwrap();
        store.ensure_default_list().unwrap();
        store
    }

    fn child_rows(store: &Store, table: &str, task_id: Uuid) -> i64 {
        let conn = store.conn.lock().unwrap();
        conn.query_row(
            &format!("SELECT COUNT(*) FROM {table} WHERE task_id = ?"),
            [task_id.to_string()],
            |row| row.get(0),
        )
        .unwrap()
    }

    fn basic_task(name: &str) -> CreateTaskInput {
        CreateTaskInput {
            name: name.to_string(),
            description: None,
            date: None,
            deadline: None,
            reminders: vec![],
            estimate: None,
            actual_time: None,
            labels: vec![],
            priority: Priority::None,
            subtasks: vec![],
            recurring: None,
            recurring_config: None,
            list_id: None,
            completed: false,
            attachments: vec![],
        }
    }

    #[test]
    fn test_delete_task_cascades_to_all_child_tables() {
        let store = setup();
        let label = store
            .create_label(CreateLabelInput {
                name: "Work".to_string(),
                color: "#3b82f6".to_string(),
                icon: "W".to_string(),
            })
            .unwrap();

        let task = store
            .create_task(CreateTaskInput {
                labels: vec![label],
                subtasks: vec![
                    SubtaskInput {
                        title: "one".to_string(),
                        completed: false,
                    },
                    SubtaskInput {
                        title: "two".to_string(),
                        completed: true,
                    },
                ],
                reminders: vec![Utc::now()],
                attachments: vec!["/tmp/notes.txt".to_string()],
                ..basic_task("Cascade me")
            })
            .unwrap();

        // One history row so the cascade has something to remove there too.
        store
            .update_task(
                task.id,
                UpdateTaskInput {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        store.delete_task(task.id).unwrap();

        for table in [
            "subtasks",
            "task_history",
            "task_labels",
            "reminders",
            "attachments",
        ] {
            assert_eq!(child_rows(&store, table, task.id), 0, "{table} not cascaded");
        }
    }

    #[test]
    fn test_deleting_label_detaches_it_without_deleting_tasks() {
        let store = setup();
        let label = store
            .create_label(CreateLabelInput {
                name: "Urgent".to_string(),
                color: "#ef4444".to_string(),
                icon: "!".to_string(),
            })
            .unwrap();
        let label_id = label.id;

        let task = store
            .create_task(CreateTaskInput {
                labels: vec![label],
                ..basic_task("Keep me")
            })
            .unwrap();
        assert_eq!(child_rows(&store, "task_labels", task.id), 1);

        {
            let conn = store.conn.lock().unwrap();
            conn.execute("DELETE FROM labels WHERE id = ?", [label_id.to_string()])
                .unwrap();
        }

        assert_eq!(child_rows(&store, "task_labels", task.id), 0);
        let task = store.get_task_by_id(task.id).unwrap().unwrap();
        assert!(task.labels.is_empty());
    }
}
