//! Domain models for daylist.
//!
//! # Core Concepts
//!
//! ## Top-level entities
//!
//! - [`Task`]: The central entity. Assembled from normalized rows into a
//!   composite object carrying its labels, subtasks, reminders, attachments,
//!   and change history.
//! - [`List`]: A named bucket grouping tasks. Exactly one list is flagged as
//!   the default ("Inbox"); tasks created without an explicit list fall into it.
//! - [`Label`]: A reusable tag, attached to any number of tasks through a
//!   join relation.
//!
//! ## Owned entities
//!
//! These live and die with their parent task:
//!
//! - [`Subtask`]: A checklist item owned by exactly one task.
//! - [`TaskHistory`]: Append-only record of one field's before/after value at
//!   one update. Written only as a side effect of `update_task`.

mod history;
mod label;
mod list;
mod subtask;
mod task;

pub use history::*;
pub use label::*;
pub use list::*;
pub use subtask::*;
pub use task::*;
