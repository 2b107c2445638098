use thiserror::Error;
use uuid::Uuid;

/// Failures the store distinguishes from plain storage-engine errors.
///
/// Raised through `anyhow` and downcast at the HTTP boundary; everything
/// else (constraint violations, I/O) propagates unclassified.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `update_task` targeted an id that matches no task.
    #[error("task not found: {0}")]
    TaskNotFound(Uuid),
    /// `create_task` was called without a `list_id` and no default list
    /// exists to fall back to.
    #[error("no default list exists and no list_id was provided")]
    MissingDefaultList,
}
