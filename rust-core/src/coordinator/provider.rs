//! External surface-data provider.
//!
//! The coordinator only needs "key in, lattice + surfaces out". Real providers
//! (a materials database client) implement [`SurfaceDataProvider`]; this crate
//! ships an in-memory table loadable from JSON and an always-offline stub.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coordinator::state::FacetRow;
use crate::errors::LookupFailure;
use crate::lattice::LatticeParameters;
use crate::wulff::{FacetEntry, FacetSet};

/// One surface reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceEntry {
    pub miller_index: [i32; 3],
    pub surface_energy: f64,
}

/// Conventional-cell lattice and surface energies of one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSurfaceData {
    pub lattice: LatticeParameters,
    pub surfaces: Vec<SurfaceEntry>,
}

impl MaterialSurfaceData {
    /// Exact energies, used for the lookup cycle's geometry
    pub fn facet_set(&self) -> FacetSet {
        self.surfaces
            .iter()
            .map(|s| FacetEntry::new(s.miller_index, s.surface_energy))
            .collect()
    }

    /// Rebuilt facet table with display-rounded energies
    pub fn table_rows(&self) -> Vec<FacetRow> {
        self.surfaces
            .iter()
            .map(|s| FacetRow::rounded(s.miller_index, s.surface_energy))
            .collect()
    }
}

/// Blocking lookup of surface data by an opaque material key.
pub trait SurfaceDataProvider {
    fn fetch(&self, key: &str) -> Result<MaterialSurfaceData, LookupFailure>;
}

impl<P: SurfaceDataProvider + ?Sized> SurfaceDataProvider for &P {
    fn fetch(&self, key: &str) -> Result<MaterialSurfaceData, LookupFailure> {
        (**self).fetch(key)
    }
}

/// Materials held in memory, keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryProvider {
    materials: BTreeMap<String, MaterialSurfaceData>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a material.
    pub fn insert(&mut self, key: impl Into<String>, data: MaterialSurfaceData) {
        self.materials.insert(key.into(), data);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Parse a database of the form `{"<key>": {"lattice": {...}, "surfaces": [...]}}`.
    pub fn from_json_str(json: &str) -> Result<Self, LookupFailure> {
        serde_json::from_str(json).map_err(|e| LookupFailure::Unavailable {
            reason: format!("materials database is not valid JSON: {e}"),
        })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LookupFailure> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| LookupFailure::Unavailable {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_json_str(&json)
    }
}

impl SurfaceDataProvider for InMemoryProvider {
    fn fetch(&self, key: &str) -> Result<MaterialSurfaceData, LookupFailure> {
        let key = key.trim();
        if key.is_empty() {
            return Err(LookupFailure::EmptyKey);
        }
        let data = self
            .materials
            .get(key)
            .cloned()
            .ok_or_else(|| LookupFailure::UnknownMaterial { key: key.into() })?;

        if data.surfaces.is_empty() {
            return Err(LookupFailure::Malformed {
                key: key.into(),
                reason: "no surfaces listed".into(),
            });
        }
        Ok(data)
    }
}

/// Provider for running without a data source; every lookup is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProvider;

impl SurfaceDataProvider for OfflineProvider {
    fn fetch(&self, key: &str) -> Result<MaterialSurfaceData, LookupFailure> {
        if key.trim().is_empty() {
            return Err(LookupFailure::EmptyKey);
        }
        Err(LookupFailure::Unavailable {
            reason: "no surface data provider configured".into(),
        })
    }
}
