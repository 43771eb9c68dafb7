//! Wulff shape library
//!
//! Equilibrium crystal shapes from lattice parameters and facet surface energies:
//! lattice bases and Miller-index normals, the Wulff construction by convex-hull
//! duality, and a coordinator that turns form events into engine inputs with a
//! "keep the last good shape" fallback.

pub mod config;
pub mod coordinator;
pub mod errors;
pub mod interfaces;
pub mod lattice;
pub mod wulff;

pub use errors::WulffError;

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, WulffError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lattice parameters and facets straight to a Wulff shape.
pub fn wulff_shape(
    params: &lattice::LatticeParameters,
    facets: &wulff::FacetSet,
) -> Result<wulff::WulffPolytope> {
    let basis = lattice::build(params)?;
    Ok(wulff::construct(&basis, facets)?)
}

/// Commonly used types
pub mod prelude {
    pub use crate::coordinator::{
        Coordinator, CoordinatorOutput, CoordinatorState, FacetRow, InMemoryProvider, InputEvent,
        Outcome, SurfaceDataProvider,
    };
    pub use crate::errors::{Degenerate, InvalidLattice, LookupFailure, WulffError};
    pub use crate::lattice::{LatticeBasis, LatticeParameters, MillerIndex};
    pub use crate::wulff::{construct, FacetEntry, FacetSet, WulffFacet, WulffPolytope};
}
