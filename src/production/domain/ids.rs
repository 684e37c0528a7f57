//! Identifier and validated scalar types for the production domain.
//!
//! The backend allocates every identifier; the client never invents one.
//! Each newtype wraps the backend's positive integer primary key to prevent
//! accidental mixing of identifier kinds.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest identifier representable in the backend's integer key columns.
const MAX_PERSISTED_ID: u64 = i64::MAX as u64;

/// Unique identifier for a production task.
///
/// # Examples
///
/// ```
/// use atelier::production::domain::TaskId;
///
/// let id = TaskId::new(42)?;
/// assert_eq!(id.value(), 42);
/// # Ok::<(), atelier::production::domain::TaskDomainError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidIdentifier`] when the value is zero
    /// or exceeds the backend's key range (`i64::MAX`).
    pub const fn new(value: u64) -> Result<Self, TaskDomainError> {
        if value == 0 || value > MAX_PERSISTED_ID {
            return Err(TaskDomainError::InvalidIdentifier(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a rejection record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RejectionId(u64);

impl RejectionId {
    /// Creates a validated rejection record identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidIdentifier`] when the value is zero
    /// or exceeds the backend's key range.
    pub const fn new(value: u64) -> Result<Self, TaskDomainError> {
        if value == 0 || value > MAX_PERSISTED_ID {
            return Err(TaskDomainError::InvalidIdentifier(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RejectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an artist record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtistId(u64);

impl ArtistId {
    /// Creates a validated artist identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidIdentifier`] when the value is zero
    /// or exceeds the backend's key range.
    pub const fn new(value: u64) -> Result<Self, TaskDomainError> {
        if value == 0 || value > MAX_PERSISTED_ID {
            return Err(TaskDomainError::InvalidIdentifier(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ArtistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates a validated item identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidIdentifier`] when the value is zero
    /// or exceeds the backend's key range.
    pub const fn new(value: u64) -> Result<Self, TaskDomainError> {
        if value == 0 || value > MAX_PERSISTED_ID {
            return Err(TaskDomainError::InvalidIdentifier(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positive number of units ordered for a production task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Creates a validated quantity.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidQuantity`] when the value is zero.
    pub const fn new(value: u32) -> Result<Self, TaskDomainError> {
        if value == 0 {
            return Err(TaskDomainError::InvalidQuantity(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
