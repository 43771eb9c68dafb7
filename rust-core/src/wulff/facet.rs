use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::lattice::MillerIndex;

/// One facet row: a Miller index and its surface energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacetEntry {
    #[serde(flatten)]
    pub miller: MillerIndex,
    pub surface_energy: f64,
}

impl FacetEntry {
    pub fn new(miller: impl Into<MillerIndex>, surface_energy: f64) -> Self {
        Self {
            miller: miller.into(),
            surface_energy,
        }
    }
}

/// Ordered collection of facet rows.
///
/// Row order carries no geometric meaning but is kept so results can be
/// reported back against the caller's table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetSet {
    entries: Vec<FacetEntry>,
}

impl FacetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: FacetEntry) {
        self.entries.push(entry);
    }

    /// Builder-style push
    pub fn with(mut self, miller: impl Into<MillerIndex>, surface_energy: f64) -> Self {
        self.push(FacetEntry::new(miller, surface_energy));
        self
    }

    pub fn entries(&self) -> &[FacetEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FacetEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<FacetEntry>> for FacetSet {
    fn from(entries: Vec<FacetEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<FacetEntry> for FacetSet {
    fn from_iter<I: IntoIterator<Item = FacetEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FacetSet {
    type Item = &'a FacetEntry;
    type IntoIter = std::slice::Iter<'a, FacetEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Half-space `normal · x ≤ energy` derived from one facet row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneConstraint {
    /// Index of the originating row in the [`FacetSet`]
    pub row: usize,
    pub miller: MillerIndex,
    /// Cartesian unit normal
    pub normal: Vector3<f64>,
    pub energy: f64,
}

impl PlaneConstraint {
    /// Positive outside, negative inside
    pub fn signed_distance(&self, point: &Vector3<f64>) -> f64 {
        self.normal.dot(point) - self.energy
    }

    /// Polar dual point `n / e`
    pub fn dual_point(&self) -> Vector3<f64> {
        self.normal / self.energy
    }
}
