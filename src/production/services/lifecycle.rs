//! Lifecycle orchestration for production tasks.
//!
//! The service validates every precondition against the caller's task
//! snapshot before issuing any backend call, so a refused command never
//! touches the network. Two-step operations (rework referral and
//! resolution) sequence their calls strictly and surface a committed first
//! step with a failed second step as a [`PartialFailure`] rather than an
//! ordinary transport error.

use crate::production::{
    domain::{
        ArtistId, ProductionTask, RejectionId, RejectionRecord, ReworkDepartment, TaskDomainError,
        TaskId, TaskStatus,
    },
    ports::{
        ArtistDirectory, CompletionSink, GatewayError, NewRejectionRecord, TaskCompletion,
        TaskGateway, TaskPatch,
    },
};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The two-step operation a partial failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwoStepOperation {
    /// Filing a rejection and incrementing the task's counter.
    ReferToRework,
    /// Marking a defect fixed and decrementing the task's counter.
    MarkReworkFixed,
}

impl TwoStepOperation {
    /// Returns the operation name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReferToRework => "refer_to_rework",
            Self::MarkReworkFixed => "mark_rework_fixed",
        }
    }
}

impl fmt::Display for TwoStepOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A two-step operation committed its first step and failed its second.
///
/// The rejection record and the task's rejection counter now disagree; the
/// caller is expected to retry the counter update alone (see
/// [`ProductionLifecycleService::resume_refer_to_rework`] and
/// [`ProductionLifecycleService::resume_mark_rework_fixed`]) or correct the
/// state manually. This error must never be treated as retry-safe total
/// failure.
#[derive(Debug, Clone, Error)]
#[error(
    "{operation} updated record {record_id} but the counter update on task {task_id} failed: {source}"
)]
pub struct PartialFailure {
    /// The operation that was interrupted.
    pub operation: TwoStepOperation,
    /// The task whose counter was not updated.
    pub task_id: TaskId,
    /// The record the first step committed.
    pub record_id: RejectionId,
    /// The transport failure of the second step.
    pub source: GatewayError,
}

/// Service-level errors for lifecycle operations.
#[derive(Debug, Clone, Error)]
pub enum LifecycleError {
    /// A precondition failed; no backend call was issued.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// A backend call failed with zero committed steps; retrying is safe.
    #[error(transparent)]
    Transport(#[from] GatewayError),

    /// A two-step operation was interrupted between its steps.
    #[error(transparent)]
    PartialFailure(#[from] PartialFailure),
}

/// Result type for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Outcome of a fully committed rework referral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReworkReferral {
    /// The rejection record the backend created.
    pub record: RejectionRecord,
    /// The task snapshot after the counter increment.
    pub task: ProductionTask,
}

/// Outcome of a fully committed rework resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReworkResolution {
    /// The rejection record after being marked fixed.
    pub record: RejectionRecord,
    /// The task snapshot after the counter decrement.
    pub task: ProductionTask,
}

/// Production task lifecycle orchestration service.
///
/// Callers must serialize operations per task: no two lifecycle operations
/// for the same task id may be in flight simultaneously, because counter
/// mutations are deltas relative to current server state. The UI enforces
/// this by disabling the triggering control while a command is pending;
/// nothing here locks server-side.
#[derive(Clone)]
pub struct ProductionLifecycleService<G, D, S, C>
where
    G: TaskGateway,
    D: ArtistDirectory,
    S: CompletionSink,
    C: Clock + Send + Sync,
{
    gateway: Arc<G>,
    artists: Arc<D>,
    completions: Arc<S>,
    clock: Arc<C>,
}

impl<G, D, S, C> ProductionLifecycleService<G, D, S, C>
where
    G: TaskGateway,
    D: ArtistDirectory,
    S: CompletionSink,
    C: Clock + Send + Sync,
{
    /// Creates a new lifecycle service.
    #[must_use]
    pub const fn new(gateway: Arc<G>, artists: Arc<D>, completions: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            gateway,
            artists,
            completions,
            clock,
        }
    }

    /// Advances a task to its next production stage.
    ///
    /// `accepted` is consulted only for the final transition out of
    /// packaging, where it must be in `(0, quantity]`; a missing value
    /// counts as zero and is refused. Landing on the terminal stage marks
    /// the task completed and emits exactly one completion event.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Validation`] when a precondition fails
    /// (nothing was sent) and [`LifecycleError::Transport`] when the patch
    /// call fails (nothing was changed).
    pub async fn advance_stage(
        &self,
        task: &ProductionTask,
        accepted: Option<u32>,
    ) -> LifecycleResult<ProductionTask> {
        let advance = task.plan_advance(accepted)?;
        let patch = TaskPatch::from_advance(&advance);
        let updated = self.gateway.patch_task(task.id(), &patch).await?;

        if advance.completes() {
            let completion = TaskCompletion {
                task_id: updated.id(),
                item_ref: updated.item_ref(),
                artist_ref: updated.artist_ref(),
                accepted: updated.accepted(),
                completed_at: self.clock.utc(),
            };
            self.completions.task_completed(&completion);
            tracing::info!(
                task = %updated.id(),
                accepted = updated.accepted(),
                "production task completed"
            );
        } else {
            tracing::info!(
                task = %updated.id(),
                stage = %updated.current_stage(),
                "advanced production stage"
            );
        }
        Ok(updated)
    }

    /// Refers the task's current-stage output to a rework department.
    ///
    /// Two sequenced backend calls: the rejection record is created first,
    /// then the task's rejection counter is incremented. The record blocks
    /// stage advancement until resolved.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Validation`] when the task is already at
    /// its terminal stage, [`LifecycleError::Transport`] when record
    /// creation fails (nothing was changed), and
    /// [`LifecycleError::PartialFailure`] when the record was created but
    /// the counter increment failed.
    pub async fn refer_to_rework(
        &self,
        task: &ProductionTask,
        department: ReworkDepartment,
    ) -> LifecycleResult<ReworkReferral> {
        let stage = task.ensure_referable()?;
        let request = NewRejectionRecord::new(task.id(), stage, department);
        let record = self.gateway.create_rejection_record(&request).await?;
        let updated = self.increment_counter(task.id(), record.id()).await?;
        tracing::info!(
            task = %task.id(),
            record = %record.id(),
            department = %department,
            "referred task output to rework"
        );
        Ok(ReworkReferral {
            record,
            task: updated,
        })
    }

    /// Retries the counter increment of an interrupted referral.
    ///
    /// Use after [`LifecycleError::PartialFailure`] from
    /// [`Self::refer_to_rework`]: the record exists and is still pending,
    /// but the task's counter was never incremented.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Validation`] when the record does not
    /// belong to the task or is already fixed, and
    /// [`LifecycleError::PartialFailure`] when the increment fails again
    /// (the state is still inconsistent).
    pub async fn resume_refer_to_rework(
        &self,
        task: &ProductionTask,
        record: &RejectionRecord,
    ) -> LifecycleResult<ProductionTask> {
        record.ensure_for_task(task.id())?;
        record.ensure_pending()?;
        self.increment_counter(task.id(), record.id()).await
    }

    /// Marks a rework referral's defect fixed.
    ///
    /// Two sequenced backend calls: the record is marked fixed first, then
    /// the task's rejection counter is decremented. When this resolves the
    /// task's only outstanding rejection, the task status is restored to
    /// in-progress, re-enabling stage advancement.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Validation`] when the record is already
    /// fixed or belongs to another task, [`LifecycleError::Transport`] when
    /// marking the record fails (nothing was changed), and
    /// [`LifecycleError::PartialFailure`] when the record was marked fixed
    /// but the counter decrement failed.
    pub async fn mark_rework_fixed(
        &self,
        task: &ProductionTask,
        record: &RejectionRecord,
    ) -> LifecycleResult<ReworkResolution> {
        record.ensure_for_task(task.id())?;
        record.ensure_pending()?;
        let fixed = self.gateway.mark_rejection_fixed(record.id()).await?;
        let updated = self.decrement_counter(task, record.id()).await?;
        tracing::info!(
            task = %task.id(),
            record = %record.id(),
            "rework defect marked fixed"
        );
        Ok(ReworkResolution {
            record: fixed,
            task: updated,
        })
    }

    /// Retries the counter decrement of an interrupted resolution.
    ///
    /// Use after [`LifecycleError::PartialFailure`] from
    /// [`Self::mark_rework_fixed`]: the record is already fixed, but the
    /// task's counter was never decremented.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Validation`] when the record does not
    /// belong to the task or is still pending (there is nothing to resume),
    /// and [`LifecycleError::PartialFailure`] when the decrement fails
    /// again.
    pub async fn resume_mark_rework_fixed(
        &self,
        task: &ProductionTask,
        record: &RejectionRecord,
    ) -> LifecycleResult<ProductionTask> {
        record.ensure_for_task(task.id())?;
        if !record.is_fixed() {
            return Err(TaskDomainError::RecordStillPending(record.id()).into());
        }
        self.decrement_counter(task, record.id()).await
    }

    /// Reassigns the task to a different artist.
    ///
    /// Permitted at any stage, including after completion, since
    /// reassignment is a correction mechanism. Reassigning to the already
    /// assigned artist succeeds without issuing a backend call.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Validation`] when the artist does not
    /// resolve in the directory and [`LifecycleError::Transport`] when the
    /// lookup or the reassignment call fails.
    pub async fn reassign_artist(
        &self,
        task: &ProductionTask,
        new_artist: ArtistId,
    ) -> LifecycleResult<ProductionTask> {
        if self.artists.find_artist(new_artist).await?.is_none() {
            return Err(TaskDomainError::UnknownArtist(new_artist).into());
        }
        if task.artist_ref() == new_artist {
            return Ok(task.clone());
        }
        let updated = self.gateway.reassign_artist(task.id(), new_artist).await?;
        tracing::info!(
            task = %updated.id(),
            artist = %updated.artist_ref(),
            "reassigned task artist"
        );
        Ok(updated)
    }

    /// Fetches a fresh snapshot of a task from the backend.
    ///
    /// Used to re-establish ground truth before reconciling after a
    /// partial failure, and whenever the caller's snapshot may be stale.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Transport`] when the task does not exist
    /// or the fetch call fails.
    pub async fn reload_task(&self, id: TaskId) -> LifecycleResult<ProductionTask> {
        Ok(self.gateway.fetch_task(id).await?)
    }

    /// Lists the task's unfixed rejection records.
    ///
    /// The count always matches the task's rejection counter when the
    /// system is consistent; a mismatch indicates an unresolved partial
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Transport`] when the listing call fails.
    pub async fn outstanding_rejections(
        &self,
        task: &ProductionTask,
    ) -> LifecycleResult<Vec<RejectionRecord>> {
        Ok(self.gateway.list_open_rejections(task.id()).await?)
    }

    async fn increment_counter(
        &self,
        task_id: TaskId,
        record_id: RejectionId,
    ) -> LifecycleResult<ProductionTask> {
        self.gateway
            .patch_task(task_id, &TaskPatch::increment_rejection())
            .await
            .map_err(|source| {
                tracing::warn!(
                    task = %task_id,
                    record = %record_id,
                    error = %source,
                    "rejection record committed but counter increment failed"
                );
                LifecycleError::PartialFailure(PartialFailure {
                    operation: TwoStepOperation::ReferToRework,
                    task_id,
                    record_id,
                    source,
                })
            })
    }

    async fn decrement_counter(
        &self,
        task: &ProductionTask,
        record_id: RejectionId,
    ) -> LifecycleResult<ProductionTask> {
        let mut patch = TaskPatch::decrement_rejection();
        if task.rejection_count() == 1 {
            patch = patch.with_status(TaskStatus::InProgress);
        }
        self.gateway
            .patch_task(task.id(), &patch)
            .await
            .map_err(|source| {
                tracing::warn!(
                    task = %task.id(),
                    record = %record_id,
                    error = %source,
                    "record marked fixed but counter decrement failed"
                );
                LifecycleError::PartialFailure(PartialFailure {
                    operation: TwoStepOperation::MarkReworkFixed,
                    task_id: task.id(),
                    record_id,
                    source,
                })
            })
    }
}
