use std::f64::consts::PI;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::lattice::MillerIndex;
use crate::wulff::facet::FacetEntry;
use crate::wulff::polygon::{centroid, max_plane_deviation};
use crate::wulff::polyhedron::Polyhedron;

/// One facet of the Wulff shape: a planar polygon on its generating plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WulffFacet {
    /// Row of the originating entry in the input facet set
    pub row: usize,
    pub miller: MillerIndex,
    pub surface_energy: f64,
    /// Outward Cartesian unit normal
    pub normal: Vector3<f64>,
    /// Boundary loop, counter-clockwise seen from outside
    pub vertices: Vec<Vector3<f64>>,
    /// Indices of `vertices` into the polytope's vertex list
    pub vertex_indices: Vec<usize>,
    pub area: f64,
}

impl WulffFacet {
    pub fn centroid(&self) -> Vector3<f64> {
        centroid(&self.vertices)
    }

    /// Maximum point-to-plane distance of the boundary (0 for an exact facet)
    pub fn planarity_error(&self) -> f64 {
        max_plane_deviation(
            &self.vertices,
            &(self.normal * self.surface_energy),
            &self.normal,
        )
    }
}

/// The Wulff shape: a bounded convex polyhedron plus per-facet areas.
///
/// Owned by the caller; the engine keeps nothing after returning it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WulffPolytope {
    /// Facets present on the shape (positive area), in input row order
    pub facets: Vec<WulffFacet>,
    /// Every input row, including facets that do not reach the shape
    pub entries: Vec<FacetEntry>,
    /// Mesh form: vertices, edges, faces and volume
    pub polyhedron: Polyhedron,
    pub total_area: f64,
    pub volume: f64,
}

impl WulffPolytope {
    pub fn vertices(&self) -> &[Vector3<f64>] {
        self.polyhedron.vertices()
    }

    /// The facet generated by `miller`, if it appears on the shape
    pub fn facet_for(&self, miller: &MillerIndex) -> Option<&WulffFacet> {
        self.facets.iter().find(|facet| &facet.miller == miller)
    }

    /// Miller indices whose facets appear on the shape
    pub fn on_shape(&self) -> Vec<MillerIndex> {
        self.facets.iter().map(|facet| facet.miller).collect()
    }

    /// Area per Miller index in first-appearance row order; zero for facets
    /// that do not reach the shape, summed when an index appears twice.
    pub fn miller_area(&self) -> Vec<(MillerIndex, f64)> {
        let mut areas: Vec<(MillerIndex, f64)> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !areas.iter().any(|(miller, _)| *miller == entry.miller) {
                areas.push((entry.miller, 0.0));
            }
        }
        for facet in &self.facets {
            if let Some((_, area)) = areas.iter_mut().find(|(miller, _)| *miller == facet.miller) {
                *area += facet.area;
            }
        }
        areas
    }

    /// Fraction of the total surface area contributed by each Miller index
    pub fn area_fractions(&self) -> Vec<(MillerIndex, f64)> {
        self.miller_area()
            .into_iter()
            .map(|(miller, area)| (miller, area / self.total_area))
            .collect()
    }

    pub fn area_fraction(&self, miller: &MillerIndex) -> f64 {
        self.area_fractions()
            .into_iter()
            .find(|(index, _)| index == miller)
            .map_or(0.0, |(_, fraction)| fraction)
    }

    /// Σ γᵢ·Aᵢ
    pub fn total_surface_energy(&self) -> f64 {
        self.facets
            .iter()
            .map(|facet| facet.surface_energy * facet.area)
            .sum()
    }

    /// Area-weighted mean surface energy
    pub fn weighted_surface_energy(&self) -> f64 {
        self.total_surface_energy() / self.total_area
    }

    /// Area-weighted standard deviation of the surface energies, relative to their mean
    pub fn anisotropy(&self) -> f64 {
        let weighted = self.weighted_surface_energy();
        let square_difference: f64 = self
            .facets
            .iter()
            .map(|facet| (facet.surface_energy - weighted).powi(2) * facet.area / self.total_area)
            .sum();
        square_difference.sqrt() / weighted
    }

    /// A / V^(2/3), dimensionless
    pub fn shape_factor(&self) -> f64 {
        self.total_area / self.volume.powf(2.0 / 3.0)
    }

    /// Radius of the sphere with the same volume
    pub fn effective_radius(&self) -> f64 {
        (3.0 * self.volume / (4.0 * PI)).cbrt()
    }

    pub fn contains(&self, point: Vector3<f64>) -> bool {
        self.polyhedron.contains(point)
    }
}
