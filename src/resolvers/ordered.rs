use super::{joint_universe, Resolution};
use crate::{
    core::{ConfigurationError, ProblemInstance, Proposition, State},
    exec::CancellationToken,
};
use anyhow::Result;
use itertools::Itertools;
use log::{debug, info};

/// The optimized announcement-search strategy, valid only when every
/// instance uses a comparator-based operator.
///
/// Such a revision is determined entirely by the instance's preorder over
/// states and the announcement's model set, so the search runs directly over
/// the state lattice: a candidate state-set wins when, for every instance,
/// its rank-minimal states are exactly the models of that instance's target.
/// Candidates are enumerated from the fewest states to the most, and the
/// winning set is converted to a sentence only once.
#[derive(Default)]
pub struct OrderedResolver;

impl OrderedResolver {
    /// Searches for an announcement valid for all the given instances.
    ///
    /// # Errors
    ///
    /// A [`ConfigurationError`] is raised before any enumeration begins if
    /// some instance's operator is not comparator-based.
    pub fn resolve(
        &self,
        instances: &[ProblemInstance],
        cancel: &CancellationToken,
    ) -> Result<Resolution> {
        if instances.iter().any(|i| !i.operator().is_comparator_based()) {
            return Err(ConfigurationError::NotComparatorBased.into());
        }
        let universe = joint_universe(instances);
        let states = State::permutations_of(&universe);
        info!(
            "ordered resolution of {} instance(s) over {} variable(s), {} state(s)",
            instances.len(),
            universe.len(),
            states.len()
        );
        // per instance: the rank of every state and the target's model flags
        let mut ranks = Vec::with_capacity(instances.len());
        let mut target_flags = Vec::with_capacity(instances.len());
        for instance in instances {
            let ranking = match instance
                .operator()
                .ranking(instance.initial_belief_state(), &universe)
            {
                Some(r) => r,
                None => return Err(ConfigurationError::NotComparatorBased.into()),
            };
            ranks.push(states.iter().map(|s| ranking.rank(s)).collect::<Vec<_>>());
            let flags = states
                .iter()
                .map(|s| instance.target_belief_state().eval(s))
                .collect::<Vec<_>>();
            if flags.iter().all(|f| !f) {
                // a revised belief state is never empty, so an unsatisfiable
                // target is unreachable
                info!("target {} has no model", instance.target_belief_state());
                return Ok(Resolution::NoSolution);
            }
            target_flags.push(flags);
        }
        for n_states in 1..=states.len() {
            debug!("trying candidate state-sets of size {}", n_states);
            for combination in (0..states.len()).combinations(n_states) {
                if cancel.is_cancelled() {
                    return Ok(Resolution::Cancelled);
                }
                if self.admissible_for_all(&combination, &ranks, &target_flags) {
                    let announcement = match Proposition::or_all(
                        combination.iter().map(|&i| states[i].to_proposition()),
                    ) {
                        Some(p) => p,
                        None => continue,
                    };
                    info!("announcement found: {}", announcement);
                    return Ok(Resolution::Announcement(announcement));
                }
            }
        }
        info!("search space exhausted, no announcement exists");
        Ok(Resolution::NoSolution)
    }

    // A candidate fits an instance when its rank-minimal states are exactly
    // the models of the instance's target.
    fn admissible_for_all(
        &self,
        combination: &[usize],
        ranks: &[Vec<usize>],
        target_flags: &[Vec<bool>],
    ) -> bool {
        ranks.iter().zip(target_flags.iter()).all(|(rank, flags)| {
            let minimal_rank = match combination.iter().map(|&i| rank[i]).min() {
                Some(r) => r,
                None => return false,
            };
            let minimal = combination
                .iter()
                .copied()
                .filter(|&i| rank[i] == minimal_rank)
                .collect::<Vec<_>>();
            let n_target_models = flags.iter().filter(|&&f| f).count();
            minimal.len() == n_target_models && minimal.iter().all(|&i| flags[i])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        resolvers::{belief_conjunction, equivalent_over},
        revision::{RevisionOperator, VarWeights, Weighted},
        core::Variable,
    };

    fn parse(text: &str) -> Proposition {
        Proposition::parse(text).unwrap()
    }

    fn instance(initial: &[&str], target: &str, operator: RevisionOperator) -> ProblemInstance {
        ProblemInstance::new(
            initial.iter().map(|t| parse(t)).collect(),
            parse(target),
            operator,
        )
    }

    fn resolve_and_check(instances: &[ProblemInstance]) -> Proposition {
        let resolution = OrderedResolver
            .resolve(instances, &CancellationToken::new())
            .unwrap();
        let announcement = match resolution {
            Resolution::Announcement(p) => p,
            other => panic!("expected an announcement, got {:?}", other),
        };
        let universe_states = State::permutations_of(&joint_universe(instances));
        for problem in instances {
            let revised = belief_conjunction(&problem.revise_by(&announcement).unwrap());
            assert!(
                equivalent_over(&universe_states, &revised, problem.target_belief_state()),
                "revising by {} does not reach {}",
                announcement,
                problem.target_belief_state()
            );
        }
        announcement
    }

    #[test]
    fn test_rejects_satisfiability_instances() {
        let instances = vec![instance(&["a"], "a", RevisionOperator::Satisfiability)];
        let result = OrderedResolver.resolve(&instances, &CancellationToken::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_single_hamming_instance() {
        resolve_and_check(&[instance(
            &["a and b"],
            "-a and b",
            RevisionOperator::HammingDistance,
        )]);
    }

    #[test]
    fn test_joint_hamming_batch() {
        resolve_and_check(&[
            instance(&["a"], "a and b", RevisionOperator::HammingDistance),
            instance(&["b"], "a and b", RevisionOperator::HammingDistance),
        ]);
    }

    #[test]
    fn test_mixed_comparator_batch() {
        let weights = [Weighted::new(Variable::make("a").unwrap(), 3)]
            .into_iter()
            .collect::<VarWeights>();
        resolve_and_check(&[
            instance(
                &["a and b"],
                "a and -b",
                RevisionOperator::WeightedHammingDistance(weights),
            ),
            instance(
                &["a"],
                "a and -b",
                RevisionOperator::OrderedSets(vec![parse("a and -b"), parse("true")]),
            ),
        ]);
    }

    #[test]
    fn test_no_solution_when_target_unsatisfiable() {
        let instances = vec![instance(
            &["a"],
            "a and -a",
            RevisionOperator::HammingDistance,
        )];
        assert_eq!(
            Resolution::NoSolution,
            OrderedResolver
                .resolve(&instances, &CancellationToken::new())
                .unwrap()
        );
    }

    #[test]
    fn test_no_solution_when_targets_conflict() {
        let instances = vec![
            instance(&["a"], "a", RevisionOperator::HammingDistance),
            instance(&["a"], "-a", RevisionOperator::HammingDistance),
        ];
        assert_eq!(
            Resolution::NoSolution,
            OrderedResolver
                .resolve(&instances, &CancellationToken::new())
                .unwrap()
        );
    }

    #[test]
    fn test_cancellation_observed_between_candidates() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let instances = vec![instance(
            &["a and b"],
            "a",
            RevisionOperator::HammingDistance,
        )];
        assert_eq!(
            Resolution::Cancelled,
            OrderedResolver.resolve(&instances, &cancel).unwrap()
        );
    }
}
