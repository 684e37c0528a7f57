//! Gateway port for the task-mutation backend.
//!
//! The backend owns persistence and final business-rule enforcement; this
//! port captures the request/response contract the lifecycle service
//! depends on. Rejection-counter changes travel as increment/decrement
//! deltas rather than absolute values because the counter is relative to
//! current server state.

use crate::production::domain::{
    ArtistId, ProductionTask, RejectionId, RejectionRecord, ReworkDepartment, Stage, StageAdvance,
    TaskId, TaskStatus,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Direction of a rejection-counter change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionDelta {
    /// Add one outstanding rejection.
    Increment,
    /// Remove one outstanding rejection.
    Decrement,
}

/// Partial update to a production task.
///
/// Only the fields present are written; everything else is left untouched
/// by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskPatch {
    stage: Option<Stage>,
    status: Option<TaskStatus>,
    accepted: Option<u32>,
    rejection_delta: Option<RejectionDelta>,
}

impl TaskPatch {
    /// Builds the patch for a planned stage advancement.
    #[must_use]
    pub const fn from_advance(advance: &StageAdvance) -> Self {
        Self {
            stage: Some(advance.next_stage()),
            status: advance.new_status(),
            accepted: advance.accepted(),
            rejection_delta: None,
        }
    }

    /// Builds a patch adding one outstanding rejection.
    #[must_use]
    pub const fn increment_rejection() -> Self {
        Self {
            stage: None,
            status: None,
            accepted: None,
            rejection_delta: Some(RejectionDelta::Increment),
        }
    }

    /// Builds a patch removing one outstanding rejection.
    #[must_use]
    pub const fn decrement_rejection() -> Self {
        Self {
            stage: None,
            status: None,
            accepted: None,
            rejection_delta: Some(RejectionDelta::Decrement),
        }
    }

    /// Adds a status change to the patch.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the stage write carried by the patch, if any.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        self.stage
    }

    /// Returns the status write carried by the patch, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the accepted-count write carried by the patch, if any.
    #[must_use]
    pub const fn accepted(&self) -> Option<u32> {
        self.accepted
    }

    /// Returns the rejection-counter delta carried by the patch, if any.
    #[must_use]
    pub const fn rejection_delta(&self) -> Option<RejectionDelta> {
        self.rejection_delta
    }
}

/// Request payload for filing a rejection against a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRejectionRecord {
    /// The task being rejected.
    pub task_ref: TaskId,
    /// The stage at which the defect was found.
    pub stage: Stage,
    /// The department the rework is referred to.
    pub department: ReworkDepartment,
}

impl NewRejectionRecord {
    /// Creates a rejection request.
    #[must_use]
    pub const fn new(task_ref: TaskId, stage: Stage, department: ReworkDepartment) -> Self {
        Self {
            task_ref,
            stage,
            department,
        }
    }
}

/// Task-mutation backend contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Fetches the current snapshot of a task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::TaskNotFound`] when the task does not exist.
    async fn fetch_task(&self, id: TaskId) -> GatewayResult<ProductionTask>;

    /// Applies a partial update to a task and returns the updated snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::TaskNotFound`] when the task does not exist,
    /// or a transport-level error when the call fails.
    async fn patch_task(&self, id: TaskId, patch: &TaskPatch) -> GatewayResult<ProductionTask>;

    /// Files a rejection record against a task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::TaskNotFound`] when the referenced task does
    /// not exist, or a transport-level error when the call fails.
    async fn create_rejection_record(
        &self,
        request: &NewRejectionRecord,
    ) -> GatewayResult<RejectionRecord>;

    /// Marks a rejection record's defect fixed and returns the updated
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RecordNotFound`] when the record does not
    /// exist and [`GatewayError::Rejected`] when it is already fixed.
    async fn mark_rejection_fixed(&self, id: RejectionId) -> GatewayResult<RejectionRecord>;

    /// Reassigns a task to a different artist and returns the updated
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::TaskNotFound`] when the task does not exist
    /// and [`GatewayError::Rejected`] when the backend refuses the artist.
    async fn reassign_artist(&self, id: TaskId, new_artist: ArtistId)
    -> GatewayResult<ProductionTask>;

    /// Lists the unfixed rejection records for a task.
    ///
    /// # Errors
    ///
    /// Returns a transport-level error when the call fails.
    async fn list_open_rejections(&self, task: TaskId) -> GatewayResult<Vec<RejectionRecord>>;
}

/// Errors returned by task gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The task was not found.
    #[error("production task not found: {0}")]
    TaskNotFound(TaskId),

    /// The rejection record was not found.
    #[error("rejection record not found: {0}")]
    RecordNotFound(RejectionId),

    /// The backend refused the request.
    #[error("backend rejected the request (status {status}): {message}")]
    Rejected {
        /// HTTP status code, or the closest equivalent for non-HTTP
        /// backends.
        status: u16,
        /// Backend-supplied failure detail.
        message: String,
    },

    /// The call never completed (connectivity, timeout).
    #[error("transport failure: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The backend answered with a payload this client cannot interpret.
    #[error("malformed backend payload: {0}")]
    InvalidPayload(String),
}

impl GatewayError {
    /// Wraps a transport-level error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
