//! In-memory production backend for lifecycle tests and local development.
//!
//! Mirrors the real backend's partial-update semantics: rejection-counter
//! deltas are applied server-side, decrements never go below zero, and
//! marking an already-fixed defect is refused.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::production::{
    domain::{
        ArtistId, ProductionTask, RejectionId, RejectionRecord, RejectionRecordData, TaskId,
    },
    ports::{
        ArtistDirectory, ArtistProfile, GatewayError, GatewayResult, NewRejectionRecord,
        RejectionDelta, TaskGateway, TaskPatch,
    },
};

/// Thread-safe in-memory task-mutation backend.
#[derive(Clone)]
pub struct InMemoryProductionBackend {
    state: Arc<RwLock<BackendState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

#[derive(Debug, Default)]
struct BackendState {
    tasks: HashMap<TaskId, ProductionTask>,
    rejections: HashMap<RejectionId, RejectionRecord>,
    artists: HashMap<ArtistId, ArtistProfile>,
    next_rejection_id: u64,
}

impl InMemoryProductionBackend {
    /// Creates an empty backend stamping record dates from the system
    /// clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty backend with the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(BackendState::default())),
            clock,
        }
    }

    /// Seeds a task snapshot.
    ///
    /// # Errors
    ///
    /// Returns a transport-level error when the state lock is poisoned.
    pub fn insert_task(&self, task: ProductionTask) -> GatewayResult<()> {
        let mut state = write_state(&self.state)?;
        state.tasks.insert(task.id(), task);
        Ok(())
    }

    /// Seeds an artist profile.
    ///
    /// # Errors
    ///
    /// Returns a transport-level error when the state lock is poisoned.
    pub fn insert_artist(&self, profile: ArtistProfile) -> GatewayResult<()> {
        let mut state = write_state(&self.state)?;
        state.artists.insert(profile.id(), profile);
        Ok(())
    }

    /// Returns the current snapshot of a task, if present.
    ///
    /// # Errors
    ///
    /// Returns a transport-level error when the state lock is poisoned.
    pub fn task(&self, id: TaskId) -> GatewayResult<Option<ProductionTask>> {
        let state = read_state(&self.state)?;
        Ok(state.tasks.get(&id).cloned())
    }

    /// Returns the current snapshot of a rejection record, if present.
    ///
    /// # Errors
    ///
    /// Returns a transport-level error when the state lock is poisoned.
    pub fn rejection(&self, id: RejectionId) -> GatewayResult<Option<RejectionRecord>> {
        let state = read_state(&self.state)?;
        Ok(state.rejections.get(&id).cloned())
    }

    /// Counts the unfixed rejection records stored for a task.
    ///
    /// # Errors
    ///
    /// Returns a transport-level error when the state lock is poisoned.
    pub fn open_rejection_count(&self, task: TaskId) -> GatewayResult<usize> {
        let state = read_state(&self.state)?;
        Ok(state
            .rejections
            .values()
            .filter(|record| record.task_ref() == task && !record.is_fixed())
            .count())
    }
}

impl Default for InMemoryProductionBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn read_state(
    state: &Arc<RwLock<BackendState>>,
) -> GatewayResult<std::sync::RwLockReadGuard<'_, BackendState>> {
    state
        .read()
        .map_err(|err| GatewayError::transport(std::io::Error::other(err.to_string())))
}

fn write_state(
    state: &Arc<RwLock<BackendState>>,
) -> GatewayResult<std::sync::RwLockWriteGuard<'_, BackendState>> {
    state
        .write()
        .map_err(|err| GatewayError::transport(std::io::Error::other(err.to_string())))
}

fn apply_patch(task: &mut ProductionTask, patch: &TaskPatch) {
    match patch.rejection_delta() {
        Some(RejectionDelta::Increment) => task.increment_rejections(),
        Some(RejectionDelta::Decrement) => task.decrement_rejections(),
        None => {}
    }
    if let Some(stage) = patch.stage() {
        task.set_stage(stage);
    }
    if let Some(status) = patch.status() {
        task.set_status(status);
    }
    if let Some(accepted) = patch.accepted() {
        task.set_accepted(accepted);
    }
}

#[async_trait]
impl TaskGateway for InMemoryProductionBackend {
    async fn fetch_task(&self, id: TaskId) -> GatewayResult<ProductionTask> {
        let state = read_state(&self.state)?;
        state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(GatewayError::TaskNotFound(id))
    }

    async fn patch_task(&self, id: TaskId, patch: &TaskPatch) -> GatewayResult<ProductionTask> {
        let mut state = write_state(&self.state)?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(GatewayError::TaskNotFound(id))?;
        apply_patch(task, patch);
        Ok(task.clone())
    }

    async fn create_rejection_record(
        &self,
        request: &NewRejectionRecord,
    ) -> GatewayResult<RejectionRecord> {
        let date = self.clock.utc();
        let mut state = write_state(&self.state)?;
        if !state.tasks.contains_key(&request.task_ref) {
            return Err(GatewayError::TaskNotFound(request.task_ref));
        }
        state.next_rejection_id += 1;
        let id = RejectionId::new(state.next_rejection_id)
            .map_err(|err| GatewayError::InvalidPayload(err.to_string()))?;
        let record = RejectionRecord::from_parts(RejectionRecordData {
            id,
            task_ref: request.task_ref,
            stage: request.stage,
            department: request.department,
            date,
            fixed: false,
        });
        state.rejections.insert(id, record.clone());
        Ok(record)
    }

    async fn mark_rejection_fixed(&self, id: RejectionId) -> GatewayResult<RejectionRecord> {
        let mut state = write_state(&self.state)?;
        let record = state
            .rejections
            .get_mut(&id)
            .ok_or(GatewayError::RecordNotFound(id))?;
        if record.is_fixed() {
            return Err(GatewayError::Rejected {
                status: 400,
                message: "this defect has already been fixed".to_owned(),
            });
        }
        record.mark_fixed();
        Ok(record.clone())
    }

    async fn reassign_artist(
        &self,
        id: TaskId,
        new_artist: ArtistId,
    ) -> GatewayResult<ProductionTask> {
        let mut state = write_state(&self.state)?;
        let Some(profile) = state.artists.get(&new_artist).cloned() else {
            return Err(GatewayError::Rejected {
                status: 400,
                message: format!("artist with id {new_artist} does not exist"),
            });
        };
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(GatewayError::TaskNotFound(id))?;
        task.set_artist(profile.id(), profile.name().to_owned());
        Ok(task.clone())
    }

    async fn list_open_rejections(&self, task: TaskId) -> GatewayResult<Vec<RejectionRecord>> {
        let state = read_state(&self.state)?;
        let mut records: Vec<RejectionRecord> = state
            .rejections
            .values()
            .filter(|record| record.task_ref() == task && !record.is_fixed())
            .cloned()
            .collect();
        records.sort_by_key(|record| record.id().value());
        Ok(records)
    }
}

#[async_trait]
impl ArtistDirectory for InMemoryProductionBackend {
    async fn find_artist(&self, id: ArtistId) -> GatewayResult<Option<ArtistProfile>> {
        let state = read_state(&self.state)?;
        Ok(state.artists.get(&id).cloned())
    }
}
