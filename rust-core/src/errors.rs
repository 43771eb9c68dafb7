//! # Errors
//!
//! The three locally recoverable failure kinds of the system. None of them is
//! fatal: the coordinator turns each into an [`Outcome`](crate::coordinator::Outcome)
//! and keeps the previous output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interfaces::Axis;

/// Malformed or non-physical lattice parameters.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum InvalidLattice {
    /// A lattice length is zero or negative
    #[error("lattice length {} must be positive, got {value}", .axis.length_symbol())]
    NonPositiveLength { axis: Axis, value: f64 },

    /// A lattice angle is outside the open interval (0°, 180°)
    #[error("lattice angle {} must lie strictly between 0° and 180°, got {value}°", .axis.angle_symbol())]
    AngleOutOfRange { axis: Axis, value: f64 },

    /// The angles cannot close a unit cell (Gram matrix not positive definite)
    #[error(
        "lattice angles do not describe a physical cell (1 - cos²α - cos²β - cos²γ + 2cosα·cosβ·cosγ = {gram_determinant:.3e})"
    )]
    NotPositiveDefinite { gram_determinant: f64 },

    /// NaN or infinite input
    #[error("lattice parameter {field} is not a finite number")]
    NonFinite { field: String },
}

/// A facet set that does not bound a finite convex volume.
///
/// Every failure of the hull stage is normalised into this type; callers only
/// ever need to know that the geometry is unusable.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum Degenerate {
    #[error("at least 3 facets are required for a bounded shape, got {count}")]
    TooFewFacets { count: usize },

    #[error("facet in row {row} has Miller index (0 0 0)")]
    ZeroMillerIndex { row: usize },

    #[error("facet in row {row} has non-positive surface energy {energy}")]
    NonPositiveEnergy { row: usize, energy: f64 },

    #[error("facets in rows {first} and {second} describe the same plane orientation")]
    DuplicatePlane { first: usize, second: usize },

    #[error("the facet planes do not enclose a finite volume")]
    Unbounded,

    #[error("convex hull of the dual points failed: {reason}")]
    HullFailure { reason: String },
}

/// Failure of the external surface-data provider.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum LookupFailure {
    #[error("lookup key is empty")]
    EmptyKey,

    #[error("no surface data for material '{key}'")]
    UnknownMaterial { key: String },

    #[error("surface data provider unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("surface data for '{key}' is malformed: {reason}")]
    Malformed { key: String, reason: String },
}

/// Umbrella error used by the library's `Result` alias and the binary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WulffError {
    #[error("invalid lattice: {0}")]
    InvalidLattice(#[from] InvalidLattice),

    #[error("degenerate facet set: {0}")]
    Degenerate(#[from] Degenerate),

    #[error("lookup failed: {0}")]
    LookupFailure(#[from] LookupFailure),
}
