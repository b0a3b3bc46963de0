//! Overlap resolution policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// What happens when a cell is placed over positions that are already occupied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryCondition {
    /// Shrink the new cell so that it stops short of the first occupied row
    /// and column. Fails if the anchor position itself is taken.
    #[default]
    Clip,
    /// Fail with an overlap error and leave the table untouched.
    Reject,
    /// Take over every requested position. Displaced cells that lose all of
    /// their positions are dropped; the rest stay reachable where they still
    /// own positions.
    Overwrite,
}

impl BoundaryCondition {
    /// Lowercase name, as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryCondition::Clip => "clip",
            BoundaryCondition::Reject => "reject",
            BoundaryCondition::Overwrite => "overwrite",
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryCondition {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clip" => Ok(BoundaryCondition::Clip),
            "reject" => Ok(BoundaryCondition::Reject),
            "overwrite" => Ok(BoundaryCondition::Overwrite),
            _ => Err(TableError::InvalidArgument(
                "boundary condition must be one of clip, reject, overwrite",
            )),
        }
    }
}
