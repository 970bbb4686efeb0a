//! The announcement resolvers: search procedures that discover a single
//! public sentence whose joint effect, under each agent's own revision
//! operator, transforms that agent's beliefs into its target.

use crate::{
    core::{ProblemInstance, Proposition, State, Variable},
    exec::CancellationToken,
};
use anyhow::Result;
use std::collections::BTreeSet;

mod brute_force;
pub use brute_force::BruteForceResolver;

mod ordered;
pub use ordered::OrderedResolver;

/// The outcome of a resolution run.
///
/// The three terminal states are distinguishable: exhausting the search
/// space without success is not a fault, and a cancellation is neither.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// An announcement was found; revising every instance by it yields that
    /// instance's target.
    Announcement(Proposition),
    /// The search space was exhausted and no announcement exists under the
    /// chosen strategy.
    NoSolution,
    /// The run was cancelled before completion.
    Cancelled,
}

/// Resolves a batch of instances, selecting the strategy from the operators
/// involved: the ordered strategy when every instance is comparator-based,
/// the brute-force strategy otherwise.
///
/// An empty batch resolves to [`Resolution::NoSolution`].
pub fn resolve(instances: &[ProblemInstance], cancel: &CancellationToken) -> Result<Resolution> {
    if instances.is_empty() {
        return Ok(Resolution::NoSolution);
    }
    if instances.iter().all(|i| i.operator().is_comparator_based()) {
        OrderedResolver.resolve(instances, cancel)
    } else {
        BruteForceResolver.resolve(instances, cancel)
    }
}

// The joint variable universe across all instances.
fn joint_universe(instances: &[ProblemInstance]) -> BTreeSet<Variable> {
    instances.iter().flat_map(|i| i.variables()).collect()
}

fn belief_conjunction(belief_state: &BTreeSet<Proposition>) -> Proposition {
    Proposition::and_all(belief_state.iter().cloned()).unwrap_or(Proposition::True)
}

// Model-set equality, decided by evaluation over a shared universe.
fn equivalent_over(universe_states: &[State], lhs: &Proposition, rhs: &Proposition) -> bool {
    universe_states.iter().all(|s| lhs.eval(s) == rhs.eval(s))
}
