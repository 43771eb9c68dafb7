//! Coordinator module: merges form events into one (lattice, facet set) input per cycle.
//!
//! Quick reference
//! - State: [`CoordinatorState`] (last valid lattice, facet table, last shape), [`FacetRow`]
//! - Events: [`InputEvent`] (`ExternalLookup`, `ManualEdit`, `RowAdd`)
//! - Transition: [`transition`] → ([`CoordinatorState`], [`CoordinatorOutput`]); [`Coordinator`] owns state between cycles
//! - Data source: [`SurfaceDataProvider`], [`InMemoryProvider`], [`OfflineProvider`]
//!
//! See submodules for full details: [`state`], [`events`], [`provider`], [`transition`](mod@transition).

// ======================== MODULE DECLARATIONS ========================
pub mod events;
pub mod provider;
pub mod state;
pub mod transition;

// Test modules
mod _tests_provider;

// ======================== RE-EXPORTED PUBLIC API (curated) ========================
#[doc(inline)]
pub use events::InputEvent;

#[doc(inline)]
pub use provider::{
    InMemoryProvider,    // struct - materials keyed by identifier, loadable from JSON
    MaterialSurfaceData, // struct - lattice + surfaces returned by a lookup
    OfflineProvider,     // struct - every lookup fails as unavailable
    SurfaceDataProvider, // trait - fetch(key) -> Result<MaterialSurfaceData, LookupFailure>
    SurfaceEntry,        // struct - one provider surface (miller_index, surface_energy)
};

#[doc(inline)]
pub use state::{facet_set_from_rows, CoordinatorState, FacetRow};

#[doc(inline)]
pub use transition::{transition, Coordinator, CoordinatorOutput, Outcome};
