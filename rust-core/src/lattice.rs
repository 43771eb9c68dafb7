//! Lattice module: cell parameters, direct/reciprocal bases and Miller-index geometry.
//!
//! Quick reference
//! - Types: [`LatticeParameters`], [`LatticeBasis`], [`MillerIndex`]
//! - Construction: [`LatticeBasis::from_parameters`], [`LatticeBasis::from_base_vectors`]
//! - Miller geometry: [`LatticeBasis::miller_normal`], [`LatticeBasis::miller_vector`], [`LatticeBasis::d_spacing`]
//!
//! See submodules for full details: [`lattice_parameters`], [`base_matrix`], [`miller`].

// ======================== MODULE DECLARATIONS ========================
pub mod base_matrix;
pub mod lattice_parameters;
pub mod miller;


// ======================== RE-EXPORTED PUBLIC API (curated) ========================
#[doc(inline)]
pub use base_matrix::LatticeBasis;

#[doc(inline)]
pub use lattice_parameters::LatticeParameters;

#[doc(inline)]
pub use miller::MillerIndex;

/// Build the basis for a parameter set (the Lattice Model's single entry point).
pub fn build(params: &LatticeParameters) -> Result<LatticeBasis, crate::errors::InvalidLattice> {
    LatticeBasis::from_parameters(params)
}
