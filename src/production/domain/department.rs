//! Rework departments that defective output can be referred to.

use super::ParseDepartmentError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The workshop department a rejection is referred to for rework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReworkDepartment {
    /// Structural repairs and re-carving.
    Carpentry,
    /// Surface rework.
    Sanding,
    /// Repainting and touch-ups.
    Painting,
}

impl ReworkDepartment {
    /// All departments accepting rework referrals.
    pub const ALL: [Self; 3] = [Self::Carpentry, Self::Sanding, Self::Painting];

    /// Returns the single-character wire encoding of the department.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Carpentry => "C",
            Self::Sanding => "S",
            Self::Painting => "P",
        }
    }

    /// Returns the human-readable department name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Carpentry => "Carpentry",
            Self::Sanding => "Sanding",
            Self::Painting => "Painting",
        }
    }
}

impl TryFrom<&str> for ReworkDepartment {
    type Error = ParseDepartmentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "C" => Ok(Self::Carpentry),
            "S" => Ok(Self::Sanding),
            "P" => Ok(Self::Painting),
            _ => Err(ParseDepartmentError(value.to_owned())),
        }
    }
}

impl fmt::Display for ReworkDepartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
