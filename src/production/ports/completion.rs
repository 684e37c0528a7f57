//! Completion sink port for the cosmetic task-completion signal.

use crate::production::domain::{ArtistId, ItemId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event emitted exactly once when a task's final stage transition lands.
///
/// Purely cosmetic (the UI celebrates); not a correctness requirement, and
/// sinks must not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCompletion {
    /// The completed task.
    pub task_id: TaskId,
    /// The item that was produced.
    pub item_ref: ItemId,
    /// The artist who finished the task.
    pub artist_ref: ArtistId,
    /// Units accepted as non-defective.
    pub accepted: u32,
    /// When the completion was observed client-side.
    pub completed_at: DateTime<Utc>,
}

/// Receiver for task-completion events.
#[cfg_attr(test, mockall::automock)]
pub trait CompletionSink: Send + Sync {
    /// Handles a completion event.
    fn task_completed(&self, completion: &TaskCompletion);
}
