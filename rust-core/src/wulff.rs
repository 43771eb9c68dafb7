//! Wulff module: equilibrium crystal shapes from facet energies.
//!
//! Quick reference
//! - Input: [`FacetEntry`], [`FacetSet`] (Miller index + surface energy rows)
//! - Entry point: [`construct`] → [`EngineResult`] (a [`WulffPolytope`] or [`Degenerate`](crate::errors::Degenerate))
//! - Result: [`WulffPolytope`] with ordered [`WulffFacet`] polygons, areas, area fractions and
//!   shape metrics, plus a renderer-friendly [`Polyhedron`] mesh
//!
//! See submodules for full details: [`facet`], [`construction`], [`polytope`], [`polygon`], [`polyhedron`].

// ======================== MODULE DECLARATIONS ========================
pub mod construction;
pub mod facet;
pub mod polygon;
pub mod polyhedron;
pub mod polytope;

pub(crate) mod convex_hull;

// Test modules
mod _tests_construction;

// ======================== FACET INPUT ========================
#[doc(inline)]
pub use facet::{
    FacetEntry,      // struct - one (h k l) row with its surface energy
    FacetSet,        // struct - ordered rows, row order preserved for echo
    PlaneConstraint, // struct - Cartesian half-space n·x ≤ e derived from a row
};

// ======================== CONSTRUCTION ========================
#[doc(inline)]
pub use construction::{
    construct,         // fn(basis: &LatticeBasis, facets: &FacetSet) -> EngineResult
    plane_constraints, // fn(basis: &LatticeBasis, facets: &FacetSet) -> Result<Vec<PlaneConstraint>, Degenerate>
    EngineResult,      // type - Result<WulffPolytope, Degenerate>
};

// ======================== RESULT GEOMETRY ========================
#[doc(inline)]
pub use polyhedron::Polyhedron;

#[doc(inline)]
pub use polytope::{WulffFacet, WulffPolytope};
