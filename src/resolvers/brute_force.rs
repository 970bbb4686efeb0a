use super::{belief_conjunction, equivalent_over, joint_universe, Resolution};
use crate::{core::ProblemInstance, core::Proposition, core::State, exec::CancellationToken};
use anyhow::Result;
use itertools::Itertools;
use log::{debug, info};

/// The general announcement-search strategy.
///
/// Candidate announcements are the disjunctions of non-empty subsets of the
/// states over the joint variable universe, enumerated from the fewest
/// satisfying states to the most (the full state set, the tautology over the
/// universe, comes last). Each candidate is pushed through every instance's
/// own revision operator and accepted when every revised belief state is
/// model-equivalent to its instance's target.
///
/// No assumption is made on the operators' algebraic structure, which makes
/// the search doubly exponential in the number of variables; it is only
/// tractable for small universes.
#[derive(Default)]
pub struct BruteForceResolver;

impl BruteForceResolver {
    /// Searches for an announcement valid for all the given instances.
    ///
    /// Instances are revised in the order they are supplied. The first
    /// candidate under the enumeration order that fits every instance is
    /// returned, so results are reproducible.
    pub fn resolve(
        &self,
        instances: &[ProblemInstance],
        cancel: &CancellationToken,
    ) -> Result<Resolution> {
        let universe = joint_universe(instances);
        let states = State::permutations_of(&universe);
        info!(
            "brute-force resolution of {} instance(s) over {} variable(s), {} state(s)",
            instances.len(),
            universe.len(),
            states.len()
        );
        for n_models in 1..=states.len() {
            debug!("trying candidates with {} satisfying state(s)", n_models);
            for combination in (0..states.len()).combinations(n_models) {
                if cancel.is_cancelled() {
                    return Ok(Resolution::Cancelled);
                }
                let candidate = match Proposition::or_all(
                    combination.iter().map(|&i| states[i].to_proposition()),
                ) {
                    Some(p) => p,
                    None => continue,
                };
                if self.fits_all(instances, &candidate, &states)? {
                    info!("announcement found: {}", candidate);
                    return Ok(Resolution::Announcement(candidate));
                }
            }
        }
        info!("search space exhausted, no announcement exists");
        Ok(Resolution::NoSolution)
    }

    fn fits_all(
        &self,
        instances: &[ProblemInstance],
        candidate: &Proposition,
        universe_states: &[State],
    ) -> Result<bool> {
        for instance in instances {
            let revised = belief_conjunction(&instance.revise_by(candidate)?);
            if !equivalent_over(universe_states, &revised, instance.target_belief_state()) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
