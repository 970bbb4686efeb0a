use super::{
    rankings::{HammingRanking, OrderedSetsRanking, StateRanking},
    weights::VarWeights,
};
use crate::core::{Proposition, RevisionError, Variable};
use std::collections::BTreeSet;

/// An AGM-style belief-revision policy: given the current belief state `K`
/// and an incoming sentence `φ`, [`RevisionOperator::revise`] produces
/// `K * φ`.
///
/// The operator family is a closed union so that serialization and matching
/// stay total; each variant carries only the data its policy needs.
#[derive(Clone, Debug, PartialEq)]
pub enum RevisionOperator {
    /// Expansion when consistent; on inconsistency, the whole of `K` is
    /// dropped and the result is `{φ}`. This full-contraction policy keeps
    /// the AGM success, consistency and vacuity postulates.
    Satisfiability,
    /// Dalal revision: keeps the models of `φ` at minimal Hamming distance
    /// to the models of `K`.
    HammingDistance,
    /// Hamming revision where each variable mismatch contributes its weight
    /// from the table (1 when unmapped).
    WeightedHammingDistance(VarWeights),
    /// Sphere-based revision: plausibility is the index of the first sphere
    /// sentence a state satisfies; states matching no sphere rank last.
    OrderedSets(Vec<Proposition>),
}

impl RevisionOperator {
    /// Returns `true` iff this operator is defined by a total preorder over
    /// states, which the ordered resolution strategy requires.
    pub fn is_comparator_based(&self) -> bool {
        !matches!(self, RevisionOperator::Satisfiability)
    }

    /// Returns the variables owned by the operator configuration itself
    /// (the sphere sentences of an ordered-sets operator).
    ///
    /// These take part in the joint variable universe of a revision, so that
    /// every ranking can evaluate its sentences on every enumerated state.
    pub fn variables(&self) -> BTreeSet<Variable> {
        match self {
            RevisionOperator::OrderedSets(spheres) => spheres
                .iter()
                .flat_map(|s| s.variables())
                .collect(),
            _ => BTreeSet::new(),
        }
    }

    /// Builds the total preorder over states seeded from a belief state, or
    /// `None` for the satisfiability-based operator.
    ///
    /// The universe must cover the variables of the belief state and of the
    /// operator configuration.
    pub fn ranking(
        &self,
        belief_state: &BTreeSet<Proposition>,
        universe: &BTreeSet<Variable>,
    ) -> Option<Box<dyn StateRanking>> {
        match self {
            RevisionOperator::Satisfiability => None,
            RevisionOperator::HammingDistance => Some(Box::new(HammingRanking::new(
                belief_state,
                universe,
                VarWeights::new(),
            ))),
            RevisionOperator::WeightedHammingDistance(weights) => Some(Box::new(
                HammingRanking::new(belief_state, universe, weights.clone()),
            )),
            RevisionOperator::OrderedSets(spheres) => {
                Some(Box::new(OrderedSetsRanking::new(spheres.clone())))
            }
        }
    }

    /// Revises a belief state by a sentence.
    ///
    /// For a comparator-based operator, the result is the single sentence
    /// whose models are exactly the rank-minimal models of the incoming
    /// sentence over the joint variable universe. For the satisfiability
    /// operator, the result is the expansion `K ∪ {φ}` when consistent and
    /// `{φ}` otherwise.
    pub fn revise(
        &self,
        belief_state: &BTreeSet<Proposition>,
        sentence: &Proposition,
    ) -> Result<BTreeSet<Proposition>, RevisionError> {
        if !sentence.is_satisfiable() {
            return Err(RevisionError::Contradiction);
        }
        let mut universe = sentence.variables();
        belief_state
            .iter()
            .for_each(|p| universe.extend(p.variables()));
        universe.extend(self.variables());
        match self.ranking(belief_state, &universe) {
            None => {
                let mut expanded = belief_state.clone();
                expanded.insert(sentence.clone());
                let conjunction = Proposition::and_all(expanded.iter().cloned())
                    .unwrap_or_else(|| sentence.clone());
                if conjunction.is_satisfiable() {
                    Ok(expanded)
                } else {
                    Ok([sentence.clone()].into())
                }
            }
            Some(ranking) => {
                let candidates = sentence.models_over(&universe);
                let minimal_rank = match candidates.iter().map(|s| ranking.rank(s)).min() {
                    Some(r) => r,
                    None => return Err(RevisionError::Contradiction),
                };
                let revised = Proposition::or_all(
                    candidates
                        .iter()
                        .filter(|s| ranking.rank(s) == minimal_rank)
                        .map(|s| s.to_proposition()),
                )
                .unwrap_or(Proposition::False);
                Ok([revised].into())
            }
        }
    }
}
