//! # Cycle transition
//!
//! One cycle = every event that fired since the last one. Precedence:
//! 1. A non-blank external lookup replaces lattice and table; manual edits and
//!    row additions of the same cycle are discarded
//! 2. Otherwise the last manual edit is taken verbatim, then one blank row is
//!    appended per row addition
//! 3. The engine runs on the resulting lattice and complete rows; a degenerate
//!    facet set keeps the previous shape on display
//!
//! The lookup key is one-shot: every output clears it.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::coordinator::events::InputEvent;
use crate::coordinator::provider::SurfaceDataProvider;
use crate::coordinator::state::{facet_set_from_rows, CoordinatorState, FacetRow};
use crate::errors::{Degenerate, InvalidLattice, LookupFailure};
use crate::lattice::{self, LatticeParameters};
use crate::wulff::{construct, EngineResult, WulffPolytope};

/// How a cycle ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// A new shape was computed
    Rendered,
    /// The facet set has no bounded shape; the previous one is shown
    RetainedPrevious(Degenerate),
    /// The submitted lattice was rejected; table edits are kept, the shape is not recomputed
    LatticeRejected(InvalidLattice),
    /// The provider failed; nothing changed
    LookupFailed(LookupFailure),
}

impl Outcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered)
    }
}

/// What the form shows after a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatorOutput {
    pub polytope: Option<WulffPolytope>,
    /// Lattice fields as displayed (the submitted values, even when rejected)
    pub lattice: LatticeParameters,
    pub table: Vec<FacetRow>,
    /// Always empty: the lookup field is cleared every cycle
    pub lookup_key: String,
    pub outcome: Outcome,
}

/// Pure transition from `(previous, events)` to `(next, output)`.
pub fn transition<P>(
    previous: &CoordinatorState,
    events: &[InputEvent],
    provider: &P,
) -> (CoordinatorState, CoordinatorOutput)
where
    P: SurfaceDataProvider + ?Sized,
{
    match events.iter().rev().find_map(InputEvent::lookup_key) {
        Some(key) => lookup_cycle(previous, key, provider),
        None => manual_cycle(previous, events),
    }
}

fn lookup_cycle<P>(
    previous: &CoordinatorState,
    key: &str,
    provider: &P,
) -> (CoordinatorState, CoordinatorOutput)
where
    P: SurfaceDataProvider + ?Sized,
{
    info!("looking up surface data for '{key}'");

    let fetched = provider.fetch(key).and_then(|data| {
        let basis = lattice::build(&data.lattice).map_err(|e| LookupFailure::Malformed {
            key: key.into(),
            reason: e.to_string(),
        })?;
        Ok((data, basis))
    });

    let (data, basis) = match fetched {
        Ok(fetched) => fetched,
        Err(failure) => {
            warn!("lookup of '{key}' failed, keeping current state: {failure}");
            let output = CoordinatorOutput {
                polytope: previous.polytope.clone(),
                lattice: previous.lattice,
                table: previous.table.clone(),
                lookup_key: String::new(),
                outcome: Outcome::LookupFailed(failure),
            };
            return (previous.clone(), output);
        }
    };

    let table = data.table_rows();
    info!(
        "'{key}': {} surfaces, a={:.4} b={:.4} c={:.4}",
        table.len(),
        data.lattice.a,
        data.lattice.b,
        data.lattice.c
    );
    let (polytope, outcome) = render(previous, construct(&basis, &data.facet_set()));

    finish(
        CoordinatorState {
            lattice: data.lattice,
            table,
            polytope,
        },
        data.lattice,
        outcome,
    )
}

fn manual_cycle(
    previous: &CoordinatorState,
    events: &[InputEvent],
) -> (CoordinatorState, CoordinatorOutput) {
    let mut submitted = previous.lattice;
    let mut table = previous.table.clone();

    for event in events {
        if let InputEvent::ManualEdit {
            lattice,
            table: edited,
        } = event
        {
            submitted = *lattice;
            table = edited.clone();
        }
    }

    let added = events
        .iter()
        .filter(|event| matches!(event, InputEvent::RowAdd))
        .count();
    if added > 0 {
        debug!("appending {added} blank facet row(s)");
        table.extend(std::iter::repeat(FacetRow::blank()).take(added));
    }

    let basis = match lattice::build(&submitted) {
        Ok(basis) => basis,
        Err(invalid) => {
            warn!("rejected lattice parameters: {invalid}");
            let state = CoordinatorState {
                lattice: previous.lattice,
                table,
                polytope: previous.polytope.clone(),
            };
            return finish(state, submitted, Outcome::LatticeRejected(invalid));
        }
    };

    let facets = facet_set_from_rows(&table);
    let (polytope, outcome) = render(previous, construct(&basis, &facets));
    finish(
        CoordinatorState {
            lattice: submitted,
            table,
            polytope,
        },
        submitted,
        outcome,
    )
}

/// New shape on success, the previous one on a degenerate facet set
fn render(
    previous: &CoordinatorState,
    result: EngineResult,
) -> (Option<WulffPolytope>, Outcome) {
    match result {
        Ok(polytope) => {
            debug!(
                "rendered shape with {} facets, volume {:.4}",
                polytope.facets.len(),
                polytope.volume
            );
            (Some(polytope), Outcome::Rendered)
        }
        Err(degenerate) => {
            warn!("no bounded shape, keeping previous: {degenerate}");
            (previous.polytope.clone(), Outcome::RetainedPrevious(degenerate))
        }
    }
}

fn finish(
    state: CoordinatorState,
    displayed_lattice: LatticeParameters,
    outcome: Outcome,
) -> (CoordinatorState, CoordinatorOutput) {
    let output = CoordinatorOutput {
        polytope: state.polytope.clone(),
        lattice: displayed_lattice,
        table: state.table.clone(),
        lookup_key: String::new(),
        outcome,
    };
    (state, output)
}

/// Owns the state between cycles and the provider used for lookups.
#[derive(Debug, Clone)]
pub struct Coordinator<P> {
    state: CoordinatorState,
    provider: P,
}

impl<P: SurfaceDataProvider> Coordinator<P> {
    pub fn new(provider: P) -> Self {
        Self::with_state(CoordinatorState::initial(), provider)
    }

    pub fn with_state(state: CoordinatorState, provider: P) -> Self {
        Self { state, provider }
    }

    /// First render of the initial state. The default single-facet table is
    /// degenerate, so this reports `RetainedPrevious` with no shape.
    pub fn startup(&mut self) -> CoordinatorOutput {
        self.handle(&[])
    }

    pub fn handle(&mut self, events: &[InputEvent]) -> CoordinatorOutput {
        let (state, output) = transition(&self.state, events, &self.provider);
        self.state = state;
        output
    }

    pub fn state(&self) -> &CoordinatorState {
        &self.state
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
