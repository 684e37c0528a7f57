//! Rejection records referring defective output to a rework department.

use super::{RejectionId, ReworkDepartment, Stage, TaskDomainError, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One referral of a task's current-stage output to a rework department.
///
/// Records are created by the backend when staff files a rejection and are
/// mutated exactly once, from pending to fixed; they are never deleted. The
/// number of unfixed records for a task must always equal that task's
/// rejection counter; the lifecycle service keeps the two in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionRecord {
    id: RejectionId,
    task_ref: TaskId,
    stage: Stage,
    department: ReworkDepartment,
    date: DateTime<Utc>,
    fixed: bool,
}

/// Parameter object for reconstructing a rejection record from backend data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionRecordData {
    /// Backend-assigned record identifier.
    pub id: RejectionId,
    /// The task this rejection concerns.
    pub task_ref: TaskId,
    /// The stage at which the rejection occurred.
    pub stage: Stage,
    /// The department the rework was referred to.
    pub department: ReworkDepartment,
    /// Backend-assigned creation timestamp.
    pub date: DateTime<Utc>,
    /// Whether the defect has been marked fixed.
    pub fixed: bool,
}

impl RejectionRecord {
    /// Reconstructs a rejection record from backend data.
    #[must_use]
    pub const fn from_parts(data: RejectionRecordData) -> Self {
        Self {
            id: data.id,
            task_ref: data.task_ref,
            stage: data.stage,
            department: data.department,
            date: data.date,
            fixed: data.fixed,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> RejectionId {
        self.id
    }

    /// Returns the task this rejection concerns.
    #[must_use]
    pub const fn task_ref(&self) -> TaskId {
        self.task_ref
    }

    /// Returns the stage at which the rejection occurred.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the department the rework was referred to.
    #[must_use]
    pub const fn department(&self) -> ReworkDepartment {
        self.department
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Returns whether the defect has been marked fixed.
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Checks that the defect has not already been marked fixed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::RecordAlreadyFixed`] when it has.
    pub const fn ensure_pending(&self) -> Result<(), TaskDomainError> {
        if self.fixed {
            return Err(TaskDomainError::RecordAlreadyFixed(self.id));
        }
        Ok(())
    }

    /// Checks that the record references the given task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::RecordTaskMismatch`] when it references a
    /// different task.
    pub const fn ensure_for_task(&self, task_id: TaskId) -> Result<(), TaskDomainError> {
        if self.task_ref.value() != task_id.value() {
            return Err(TaskDomainError::RecordTaskMismatch {
                record_id: self.id,
                expected: task_id,
                actual: self.task_ref,
            });
        }
        Ok(())
    }

    /// Marks the defect fixed. Backend bookkeeping only; callers go through
    /// the lifecycle service.
    pub(crate) const fn mark_fixed(&mut self) {
        self.fixed = true;
    }
}
