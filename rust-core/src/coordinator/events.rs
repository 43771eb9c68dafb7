use serde::{Deserialize, Serialize};

use crate::coordinator::state::FacetRow;
use crate::lattice::LatticeParameters;

/// One input channel firing within a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    /// Material identifier for the external data provider; blank keys are ignored
    ExternalLookup(String),
    /// Lattice fields and facet table as currently shown in the form
    ManualEdit {
        lattice: LatticeParameters,
        table: Vec<FacetRow>,
    },
    /// Append one blank table row
    RowAdd,
}

impl InputEvent {
    pub fn lookup(key: impl Into<String>) -> Self {
        Self::ExternalLookup(key.into())
    }

    pub fn manual(lattice: LatticeParameters, table: Vec<FacetRow>) -> Self {
        Self::ManualEdit { lattice, table }
    }

    /// Trimmed lookup key, `None` for other events and blank keys
    pub fn lookup_key(&self) -> Option<&str> {
        match self {
            Self::ExternalLookup(key) if !key.trim().is_empty() => Some(key.trim()),
            _ => None,
        }
    }
}
