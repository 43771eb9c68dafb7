//! # Wulff construction via polar duality
//!
//! 1. Facet rows become half-spaces `n·x ≤ e` (unit normals from the reciprocal basis)
//! 2. Each half-space maps to the dual point `n / e`
//! 3. Every face of the dual convex hull (unit normal m, offset δ > 0) is a
//!    polytope vertex `m / δ`
//! 4. Each constraint's facet is the loop of vertices on its plane
//!
//! The origin must be strictly interior to the intersection; otherwise the dual
//! hull has a face through or behind the origin and the shape is unbounded.

use log::debug;
use nalgebra::Vector3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::{ON_PLANE_TOLERANCE, PARALLEL_TOLERANCE, VERTEX_MERGE_TOLERANCE};
use crate::errors::Degenerate;
use crate::lattice::LatticeBasis;
use crate::wulff::convex_hull::{convex_hull, HullError};
use crate::wulff::facet::{FacetSet, PlaneConstraint};
use crate::wulff::polygon::{counter_clockwise_order, polygon_area};
use crate::wulff::polyhedron::Polyhedron;
use crate::wulff::polytope::{WulffFacet, WulffPolytope};

/// Either the Wulff shape or the reason no bounded shape exists
pub type EngineResult = Result<WulffPolytope, Degenerate>;

/// Compute the Wulff shape of `facets` in the lattice `basis`.
///
/// Pure: nothing is cached between calls.
pub fn construct(basis: &LatticeBasis, facets: &FacetSet) -> EngineResult {
    let constraints = plane_constraints(basis, facets)?;
    let vertices = polytope_vertices(&constraints)?;

    let extent = vertices.iter().map(|v| v.norm()).fold(0.0_f64, f64::max);

    #[cfg(feature = "parallel")]
    let polygons: Vec<Option<FacetPolygon>> = constraints
        .par_iter()
        .map(|constraint| facet_polygon(constraint, &vertices, extent))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let polygons: Vec<Option<FacetPolygon>> = constraints
        .iter()
        .map(|constraint| facet_polygon(constraint, &vertices, extent))
        .collect();

    let mut wulff_facets = Vec::new();
    for (constraint, polygon) in constraints.iter().zip(polygons) {
        let Some(polygon) = polygon else {
            continue;
        };
        wulff_facets.push(WulffFacet {
            row: constraint.row,
            miller: constraint.miller,
            surface_energy: constraint.energy,
            normal: constraint.normal,
            vertices: polygon.indices.iter().map(|&i| vertices[i]).collect(),
            vertex_indices: polygon.indices,
            area: polygon.area,
        });
    }

    if wulff_facets.len() < 4 {
        return Err(Degenerate::HullFailure {
            reason: format!(
                "only {} facets with positive area were recovered",
                wulff_facets.len()
            ),
        });
    }

    let total_area: f64 = wulff_facets.iter().map(|facet| facet.area).sum();
    // Divergence theorem: each facet is the base of a pyramid with apex at the origin
    let volume: f64 = wulff_facets
        .iter()
        .map(|facet| facet.surface_energy * facet.area)
        .sum::<f64>()
        / 3.0;

    let faces = wulff_facets
        .iter()
        .map(|facet| facet.vertex_indices.clone())
        .collect();
    let polyhedron = Polyhedron::from_faces(vertices, faces, volume);

    debug!(
        "Wulff shape: {} of {} facets on shape, {} vertices, area {:.6}, volume {:.6}",
        wulff_facets.len(),
        constraints.len(),
        polyhedron.vertices.len(),
        total_area,
        volume
    );

    Ok(WulffPolytope {
        facets: wulff_facets,
        entries: facets.entries().to_vec(),
        polyhedron,
        total_area,
        volume,
    })
}

/// Validate the facet rows and convert them into Cartesian half-spaces.
///
/// Rejects fewer than 3 rows, a (0 0 0) index, a non-positive or non-finite
/// energy, and two rows whose normals point the same way.
pub fn plane_constraints(
    basis: &LatticeBasis,
    facets: &FacetSet,
) -> Result<Vec<PlaneConstraint>, Degenerate> {
    if facets.len() < 3 {
        return Err(Degenerate::TooFewFacets {
            count: facets.len(),
        });
    }

    let mut constraints: Vec<PlaneConstraint> = Vec::with_capacity(facets.len());
    for (row, entry) in facets.iter().enumerate() {
        let energy = entry.surface_energy;
        if !(energy.is_finite() && energy > 0.0) {
            return Err(Degenerate::NonPositiveEnergy { row, energy });
        }
        let normal = basis
            .miller_normal(&entry.miller)
            .ok_or(Degenerate::ZeroMillerIndex { row })?;

        if let Some(previous) = constraints
            .iter()
            .find(|c| c.normal.dot(&normal) >= 1.0 - PARALLEL_TOLERANCE)
        {
            return Err(Degenerate::DuplicatePlane {
                first: previous.row,
                second: row,
            });
        }

        constraints.push(PlaneConstraint {
            row,
            miller: entry.miller,
            normal,
            energy,
        });
    }

    Ok(constraints)
}

/// Extreme points of the half-space intersection, deduplicated.
fn polytope_vertices(constraints: &[PlaneConstraint]) -> Result<Vec<Vector3<f64>>, Degenerate> {
    let dual_points: Vec<Vector3<f64>> = constraints.iter().map(|c| c.dual_point()).collect();
    let hull = convex_hull(&dual_points).map_err(degenerate_from_hull)?;

    if !hull.contains_origin_strictly() {
        return Err(Degenerate::Unbounded);
    }

    let raw: Vec<Vector3<f64>> = hull
        .faces
        .iter()
        .map(|face| face.normal / face.offset)
        .collect();
    let extent = raw.iter().map(|v| v.norm()).fold(0.0_f64, f64::max);
    if !extent.is_finite() {
        return Err(Degenerate::Unbounded);
    }

    // Coplanar hull triangles share a polytope vertex
    let merge_tolerance = VERTEX_MERGE_TOLERANCE * extent;
    let mut vertices: Vec<Vector3<f64>> = Vec::with_capacity(raw.len());
    for candidate in raw {
        if !vertices
            .iter()
            .any(|v| (v - candidate).norm() <= merge_tolerance)
        {
            vertices.push(candidate);
        }
    }

    let plane_tolerance = ON_PLANE_TOLERANCE * extent;
    for (index, vertex) in vertices.iter().enumerate() {
        if let Some(violated) = constraints
            .iter()
            .find(|c| c.signed_distance(vertex) > plane_tolerance)
        {
            return Err(Degenerate::HullFailure {
                reason: format!(
                    "vertex {index} lies outside the plane of row {}",
                    violated.row
                ),
            });
        }
    }

    Ok(vertices)
}

fn degenerate_from_hull(error: HullError) -> Degenerate {
    match error {
        // Dual points spanning less than 3D leave a direction unconstrained
        HullError::TooFewPoints { .. } | HullError::Collinear | HullError::Coplanar => {
            Degenerate::Unbounded
        }
        other => Degenerate::HullFailure {
            reason: other.to_string(),
        },
    }
}

struct FacetPolygon {
    /// Counter-clockwise loop, indices into the polytope vertices
    indices: Vec<usize>,
    area: f64,
}

/// Boundary of one constraint's facet, `None` when the plane only touches
/// the shape at an edge or a vertex.
fn facet_polygon(
    constraint: &PlaneConstraint,
    vertices: &[Vector3<f64>],
    extent: f64,
) -> Option<FacetPolygon> {
    let plane_tolerance = ON_PLANE_TOLERANCE * extent;
    let on_plane: Vec<usize> = vertices
        .iter()
        .enumerate()
        .filter(|(_, v)| constraint.signed_distance(v).abs() <= plane_tolerance)
        .map(|(i, _)| i)
        .collect();
    if on_plane.len() < 3 {
        return None;
    }

    let points: Vec<Vector3<f64>> = on_plane.iter().map(|&i| vertices[i]).collect();
    let order = counter_clockwise_order(&points, &constraint.normal);
    let ordered: Vec<Vector3<f64>> = order.iter().map(|&i| points[i]).collect();

    let area = polygon_area(&ordered, &constraint.normal);
    if area <= plane_tolerance * extent {
        return None;
    }

    Some(FacetPolygon {
        indices: order.into_iter().map(|i| on_plane[i]).collect(),
        area,
    })
}
