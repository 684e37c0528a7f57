//! Production task aggregate root and stage advancement planning.

use super::{ArtistId, ItemId, Quantity, Stage, TaskDomainError, TaskId, TaskStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A production task: one item, one artist, a quantity of units moving
/// through the ordered production stages.
///
/// The aggregate is a client-side snapshot of backend state. All stage,
/// status, and rejection-counter writes flow through the lifecycle service;
/// the aggregate itself only plans transitions and validates preconditions,
/// keeping the pure `(state, command) -> effect` logic testable without any
/// network collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionTask {
    id: TaskId,
    item_ref: ItemId,
    item_name: String,
    artist_ref: ArtistId,
    artist_name: String,
    quantity: Quantity,
    accepted: u32,
    current_stage: Stage,
    status: TaskStatus,
    rejection_count: u32,
    notes: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

/// Parameter object for reconstructing a task snapshot from backend data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionTaskData {
    /// Backend-assigned task identifier.
    pub id: TaskId,
    /// The inventory item being produced.
    pub item_ref: ItemId,
    /// Denormalized item display name from the backend serializer.
    pub item_name: String,
    /// The artist assigned to the task.
    pub artist_ref: ArtistId,
    /// Denormalized artist display name from the backend serializer.
    pub artist_name: String,
    /// Total units ordered.
    pub quantity: Quantity,
    /// Units accepted as non-defective; written only at completion.
    pub accepted: u32,
    /// The stage the task is currently in.
    pub current_stage: Stage,
    /// Overall task status.
    pub status: TaskStatus,
    /// Number of unresolved rework referrals.
    pub rejection_count: u32,
    /// Free-text staff notes.
    pub notes: String,
    /// Scheduled start date.
    pub start_date: NaiveDate,
    /// Scheduled end date; informational, never recalculated here.
    pub end_date: NaiveDate,
}

/// A planned stage advancement produced by [`ProductionTask::plan_advance`].
///
/// Carries exactly the fields the backend patch must write; the final
/// transition into [`Stage::Done`] additionally completes the task and
/// persists the accepted unit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageAdvance {
    next_stage: Stage,
    new_status: Option<TaskStatus>,
    accepted: Option<u32>,
}

impl StageAdvance {
    /// Returns the stage the task advances to.
    #[must_use]
    pub const fn next_stage(&self) -> Stage {
        self.next_stage
    }

    /// Returns the status change the advancement carries, if any.
    #[must_use]
    pub const fn new_status(&self) -> Option<TaskStatus> {
        self.new_status
    }

    /// Returns the accepted unit count persisted by the advancement, if any.
    #[must_use]
    pub const fn accepted(&self) -> Option<u32> {
        self.accepted
    }

    /// Returns whether this advancement completes the task.
    #[must_use]
    pub const fn completes(&self) -> bool {
        self.next_stage.is_terminal()
    }
}

impl ProductionTask {
    /// Reconstructs a task snapshot from backend data.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AcceptedExceedsQuantity`] when the accepted
    /// count carried by the data is larger than the ordered quantity.
    pub fn from_parts(data: ProductionTaskData) -> Result<Self, TaskDomainError> {
        if data.accepted > data.quantity.value() {
            return Err(TaskDomainError::AcceptedExceedsQuantity {
                accepted: data.accepted,
                quantity: data.quantity.value(),
            });
        }
        Ok(Self {
            id: data.id,
            item_ref: data.item_ref,
            item_name: data.item_name,
            artist_ref: data.artist_ref,
            artist_name: data.artist_name,
            quantity: data.quantity,
            accepted: data.accepted,
            current_stage: data.current_stage,
            status: data.status,
            rejection_count: data.rejection_count,
            notes: data.notes,
            start_date: data.start_date,
            end_date: data.end_date,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the inventory item reference.
    #[must_use]
    pub const fn item_ref(&self) -> ItemId {
        self.item_ref
    }

    /// Returns the item display name.
    #[must_use]
    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    /// Returns the assigned artist reference.
    #[must_use]
    pub const fn artist_ref(&self) -> ArtistId {
        self.artist_ref
    }

    /// Returns the artist display name.
    #[must_use]
    pub fn artist_name(&self) -> &str {
        &self.artist_name
    }

    /// Returns the ordered quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Returns the accepted unit count.
    #[must_use]
    pub const fn accepted(&self) -> u32 {
        self.accepted
    }

    /// Returns the current production stage.
    #[must_use]
    pub const fn current_stage(&self) -> Stage {
        self.current_stage
    }

    /// Returns the overall task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the number of unresolved rework referrals.
    #[must_use]
    pub const fn rejection_count(&self) -> u32 {
        self.rejection_count
    }

    /// Returns whether any rework referrals are unresolved.
    #[must_use]
    pub const fn has_open_rejections(&self) -> bool {
        self.rejection_count > 0
    }

    /// Returns the staff notes.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Returns the scheduled start date.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the scheduled end date.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Plans an advancement to the next production stage.
    ///
    /// `accepted` is the unit count supplied by the caller; it is consulted
    /// only for the final transition out of [`Stage::Packaging`], where a
    /// missing value counts as zero and is rejected rather than rounded up.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskCompleted`] when the task is already
    /// completed or at its terminal stage,
    /// [`TaskDomainError::RejectionsOutstanding`] when unresolved rejections
    /// block advancement, and [`TaskDomainError::AcceptedCountOutOfRange`]
    /// when completing with an accepted count outside `(0, quantity]`.
    pub const fn plan_advance(&self, accepted: Option<u32>) -> Result<StageAdvance, TaskDomainError> {
        if matches!(self.status, TaskStatus::Completed) || self.current_stage.is_terminal() {
            return Err(TaskDomainError::TaskCompleted(self.id));
        }
        if self.rejection_count > 0 {
            return Err(TaskDomainError::RejectionsOutstanding {
                task_id: self.id,
                count: self.rejection_count,
            });
        }
        let Some(next_stage) = self.current_stage.successor() else {
            return Err(TaskDomainError::TaskCompleted(self.id));
        };
        if !next_stage.is_terminal() {
            return Ok(StageAdvance {
                next_stage,
                new_status: None,
                accepted: None,
            });
        }
        let supplied = match accepted {
            Some(value) => value,
            None => 0,
        };
        if supplied == 0 || supplied > self.quantity.value() {
            return Err(TaskDomainError::AcceptedCountOutOfRange {
                supplied,
                quantity: self.quantity.value(),
            });
        }
        Ok(StageAdvance {
            next_stage,
            new_status: Some(TaskStatus::Completed),
            accepted: Some(supplied),
        })
    }

    /// Checks that the task can accept a rework referral and returns the
    /// stage the referral concerns.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskCompleted`] when the task is at its
    /// terminal stage.
    pub const fn ensure_referable(&self) -> Result<Stage, TaskDomainError> {
        if self.current_stage.is_terminal() {
            return Err(TaskDomainError::TaskCompleted(self.id));
        }
        Ok(self.current_stage)
    }

    /// Overwrites the current stage. Backend bookkeeping only.
    pub(crate) const fn set_stage(&mut self, stage: Stage) {
        self.current_stage = stage;
    }

    /// Overwrites the status. Backend bookkeeping only.
    pub(crate) const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Overwrites the accepted unit count. Backend bookkeeping only.
    pub(crate) const fn set_accepted(&mut self, accepted: u32) {
        self.accepted = accepted;
    }

    /// Increments the rejection counter. Backend bookkeeping only.
    pub(crate) const fn increment_rejections(&mut self) {
        self.rejection_count = self.rejection_count.saturating_add(1);
    }

    /// Decrements the rejection counter, saturating at zero. Backend
    /// bookkeeping only.
    pub(crate) const fn decrement_rejections(&mut self) {
        self.rejection_count = self.rejection_count.saturating_sub(1);
    }

    /// Replaces the assigned artist. Backend bookkeeping only.
    pub(crate) fn set_artist(&mut self, artist_ref: ArtistId, artist_name: String) {
        self.artist_ref = artist_ref;
        self.artist_name = artist_name;
    }
}
