use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Axis of a 2-dimensional container: `Rows` (0) or `Columns` (1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Rows,
    Columns,
}

impl Axis {
    /// Validates a numeric axis argument
    ///
    /// # Errors
    /// Returns `Error::InvalidAxis` for any value other than 0 or 1
    pub fn from_usize(axis: usize) -> Result<Self> {
        match axis {
            0 => Ok(Axis::Rows),
            1 => Ok(Axis::Columns),
            other => Err(Error::InvalidAxis(other)),
        }
    }

    /// Returns the numeric form of the axis
    pub fn as_usize(&self) -> usize {
        match self {
            Axis::Rows => 0,
            Axis::Columns => 1,
        }
    }

    /// Returns the opposite axis
    pub fn flip(&self) -> Self {
        match self {
            Axis::Rows => Axis::Columns,
            Axis::Columns => Axis::Rows,
        }
    }
}
