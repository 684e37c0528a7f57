//! The ordered production stages a task passes through.

use super::ParseStageError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight ordered production stages.
///
/// Stages advance strictly forward; [`Stage::Done`] is terminal. The wire
/// encoding is the single-character stage index (`"0"` through `"7"`), which
/// the backend stores verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// The order has been taken but work has not started.
    Ordered,
    /// Raw material is split and the design drawn on.
    SplittingDrawing,
    /// The piece is carved or cut to shape.
    CarvingCutting,
    /// Surfaces are sanded smooth.
    Sanding,
    /// The piece is painted.
    Painting,
    /// Finish coats are applied.
    Finishing,
    /// Units are counted, inspected, and packed.
    Packaging,
    /// All work is complete.
    Done,
}

impl Stage {
    /// All stages in production order.
    pub const ALL: [Self; 8] = [
        Self::Ordered,
        Self::SplittingDrawing,
        Self::CarvingCutting,
        Self::Sanding,
        Self::Painting,
        Self::Finishing,
        Self::Packaging,
        Self::Done,
    ];

    /// Returns the zero-based stage index.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Ordered => 0,
            Self::SplittingDrawing => 1,
            Self::CarvingCutting => 2,
            Self::Sanding => 3,
            Self::Painting => 4,
            Self::Finishing => 5,
            Self::Packaging => 6,
            Self::Done => 7,
        }
    }

    /// Returns the single-character wire encoding of the stage.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ordered => "0",
            Self::SplittingDrawing => "1",
            Self::CarvingCutting => "2",
            Self::Sanding => "3",
            Self::Painting => "4",
            Self::Finishing => "5",
            Self::Packaging => "6",
            Self::Done => "7",
        }
    }

    /// Returns the human-readable stage name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ordered => "Ordered",
            Self::SplittingDrawing => "Splitting/drawing",
            Self::CarvingCutting => "Carving/cutting",
            Self::Sanding => "Sanding",
            Self::Painting => "Painting",
            Self::Finishing => "Finishing",
            Self::Packaging => "Packaging",
            Self::Done => "Done",
        }
    }

    /// Returns the next stage in production order, or `None` from
    /// [`Stage::Done`].
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self {
            Self::Ordered => Some(Self::SplittingDrawing),
            Self::SplittingDrawing => Some(Self::CarvingCutting),
            Self::CarvingCutting => Some(Self::Sanding),
            Self::Sanding => Some(Self::Painting),
            Self::Painting => Some(Self::Finishing),
            Self::Finishing => Some(Self::Packaging),
            Self::Packaging => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Returns whether the stage permits no further advancement.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl TryFrom<&str> for Stage {
    type Error = ParseStageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "0" => Ok(Self::Ordered),
            "1" => Ok(Self::SplittingDrawing),
            "2" => Ok(Self::CarvingCutting),
            "3" => Ok(Self::Sanding),
            "4" => Ok(Self::Painting),
            "5" => Ok(Self::Finishing),
            "6" => Ok(Self::Packaging),
            "7" => Ok(Self::Done),
            _ => Err(ParseStageError(value.to_owned())),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
