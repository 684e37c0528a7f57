//! Wire models mapping backend JSON to and from domain types.
//!
//! The backend encodes stages as single-character indices and statuses and
//! departments as single-character codes; everything crossing the HTTP
//! boundary is translated here so the rest of the crate only sees domain
//! types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::production::{
    domain::{
        ArtistId, ItemId, ParseDepartmentError, ParseStageError, ParseTaskStatusError,
        ProductionTask, ProductionTaskData, Quantity, RejectionId, RejectionRecord,
        RejectionRecordData, ReworkDepartment, Stage, TaskDomainError, TaskId, TaskStatus,
    },
    ports::{ArtistProfile, NewRejectionRecord, RejectionDelta, TaskPatch},
};

/// Errors produced while translating backend payloads into domain types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub(crate) enum DecodeError {
    #[error(transparent)]
    Stage(#[from] ParseStageError),
    #[error(transparent)]
    Status(#[from] ParseTaskStatusError),
    #[error(transparent)]
    Department(#[from] ParseDepartmentError),
    #[error("unknown rejection record status: {0}")]
    RejectionStatus(String),
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
}

/// Task payload as serialized by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct TaskWire {
    id: u64,
    item: u64,
    #[serde(default)]
    item_name: String,
    artist: u64,
    #[serde(default)]
    artist_name: String,
    quantity: u32,
    #[serde(default)]
    accepted: u32,
    current_stage: String,
    status: String,
    #[serde(default)]
    rejection_count: u32,
    #[serde(default)]
    notes: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TaskWire {
    pub(crate) fn into_domain(self) -> Result<ProductionTask, DecodeError> {
        let task = ProductionTask::from_parts(ProductionTaskData {
            id: TaskId::new(self.id)?,
            item_ref: ItemId::new(self.item)?,
            item_name: self.item_name,
            artist_ref: ArtistId::new(self.artist)?,
            artist_name: self.artist_name,
            quantity: Quantity::new(self.quantity)?,
            accepted: self.accepted,
            current_stage: Stage::try_from(self.current_stage.as_str())?,
            status: TaskStatus::try_from(self.status.as_str())?,
            rejection_count: self.rejection_count,
            notes: self.notes,
            start_date: self.start_date,
            end_date: self.end_date,
        })?;
        Ok(task)
    }
}

fn default_rejection_status() -> String {
    "P".to_owned()
}

/// Rejection record payload as serialized by the backend.
///
/// Older backend revisions omit the status field from the serializer; a
/// missing value means the record is still pending.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct RejectionWire {
    id: u64,
    production_task: u64,
    stage: String,
    department: String,
    #[serde(default = "default_rejection_status")]
    status: String,
    date: DateTime<Utc>,
}

impl RejectionWire {
    pub(crate) fn into_domain(self) -> Result<RejectionRecord, DecodeError> {
        let fixed = match self.status.trim() {
            "P" => false,
            "F" => true,
            other => return Err(DecodeError::RejectionStatus(other.to_owned())),
        };
        Ok(RejectionRecord::from_parts(RejectionRecordData {
            id: RejectionId::new(self.id)?,
            task_ref: TaskId::new(self.production_task)?,
            stage: Stage::try_from(self.stage.as_str())?,
            department: ReworkDepartment::try_from(self.department.as_str())?,
            date: self.date,
            fixed,
        }))
    }
}

/// Rejection listing payload: a DRF-style results page, or a plain array
/// when pagination is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum RejectionListWire {
    Paginated {
        #[serde(default)]
        results: Vec<RejectionWire>,
    },
    Plain(Vec<RejectionWire>),
}

impl RejectionListWire {
    pub(crate) fn into_domain(self) -> Result<Vec<RejectionRecord>, DecodeError> {
        let records = match self {
            Self::Paginated { results } | Self::Plain(results) => results,
        };
        records
            .into_iter()
            .map(RejectionWire::into_domain)
            .collect()
    }
}

/// Partial task update as the backend expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct TaskPatchWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    current_stage: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accepted: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    increment_rejection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decrement_rejection: Option<bool>,
}

impl From<&TaskPatch> for TaskPatchWire {
    fn from(patch: &TaskPatch) -> Self {
        let (increment, decrement) = match patch.rejection_delta() {
            Some(RejectionDelta::Increment) => (Some(true), None),
            Some(RejectionDelta::Decrement) => (None, Some(true)),
            None => (None, None),
        };
        Self {
            current_stage: patch.stage().map(Stage::code),
            status: patch.status().map(TaskStatus::code),
            accepted: patch.accepted(),
            increment_rejection: increment,
            decrement_rejection: decrement,
        }
    }
}

/// Rejection creation payload as the backend expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct NewRejectionWire {
    task_id: u64,
    stage: &'static str,
    department: &'static str,
}

impl From<&NewRejectionRecord> for NewRejectionWire {
    fn from(request: &NewRejectionRecord) -> Self {
        Self {
            task_id: request.task_ref.value(),
            stage: request.stage.code(),
            department: request.department.code(),
        }
    }
}

/// Artist reassignment payload as the backend expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct ReassignWire {
    new_artist_id: u64,
}

impl ReassignWire {
    pub(crate) const fn new(artist: ArtistId) -> Self {
        Self {
            new_artist_id: artist.value(),
        }
    }
}

/// Artist payload as serialized by the directory endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct ArtistWire {
    id: u64,
    name: String,
}

impl ArtistWire {
    pub(crate) fn into_domain(self) -> Result<ArtistProfile, DecodeError> {
        Ok(ArtistProfile::new(ArtistId::new(self.id)?, self.name))
    }
}
