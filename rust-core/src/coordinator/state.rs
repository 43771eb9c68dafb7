use serde::{Deserialize, Serialize};

use crate::config::LOOKUP_ENERGY_DECIMALS;
use crate::lattice::{LatticeParameters, MillerIndex};
use crate::wulff::{FacetEntry, FacetSet, WulffPolytope};

/// One row of the editable facet table.
///
/// Cells are optional: a freshly added row is blank until the user fills it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetRow {
    pub h: Option<i32>,
    pub k: Option<i32>,
    pub l: Option<i32>,
    pub surface_energy: Option<f64>,
}

impl FacetRow {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn new(miller: impl Into<MillerIndex>, surface_energy: f64) -> Self {
        let miller = miller.into();
        Self {
            h: Some(miller.h),
            k: Some(miller.k),
            l: Some(miller.l),
            surface_energy: Some(surface_energy),
        }
    }

    pub fn from_entry(entry: &FacetEntry) -> Self {
        Self::new(entry.miller, entry.surface_energy)
    }

    /// Display form of a looked-up row: energy rounded to the table precision
    pub fn rounded(miller: impl Into<MillerIndex>, surface_energy: f64) -> Self {
        Self::new(miller, round_to_decimals(surface_energy, LOOKUP_ENERGY_DECIMALS))
    }

    /// `None` while any cell is blank
    pub fn to_entry(&self) -> Option<FacetEntry> {
        Some(FacetEntry::new(
            [self.h?, self.k?, self.l?],
            self.surface_energy?,
        ))
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::blank()
    }
}

/// Facet set made of the complete rows of `table`, in table order.
pub fn facet_set_from_rows(table: &[FacetRow]) -> FacetSet {
    table.iter().filter_map(FacetRow::to_entry).collect()
}

pub(crate) fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Everything the coordinator carries from one cycle to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatorState {
    /// Last lattice that passed validation
    pub lattice: LatticeParameters,
    pub table: Vec<FacetRow>,
    /// Last successfully computed shape
    pub polytope: Option<WulffPolytope>,
}

impl CoordinatorState {
    /// Unit cube with a single (1 0 0) facet at energy 1
    pub fn initial() -> Self {
        Self {
            lattice: LatticeParameters::cubic(1.0),
            table: vec![FacetRow::new([1, 0, 0], 1.0)],
            polytope: None,
        }
    }

    pub fn facet_set(&self) -> FacetSet {
        facet_set_from_rows(&self.table)
    }
}

impl Default for CoordinatorState {
    fn default() -> Self {
        Self::initial()
    }
}
