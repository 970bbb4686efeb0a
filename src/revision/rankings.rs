use super::weights::VarWeights;
use crate::core::{Proposition, State, Variable};
use std::collections::BTreeSet;

/// A total preorder over states, most plausible first.
///
/// A ranking is seeded from an agent's initial belief state; rank 0 is the
/// most plausible. Comparator-based revision keeps the rank-minimal models of
/// the incoming sentence, and the ordered resolution strategy reasons over
/// ranks directly.
pub trait StateRanking {
    /// Returns the plausibility rank of a state, 0 being most plausible.
    fn rank(&self, state: &State) -> usize;
}

/// Ranks states by their (weighted) Hamming distance to the nearest model of
/// the seeding belief state.
///
/// Each mismatched variable contributes its weight from the table, 1 when
/// unmapped; a uniform table yields the plain Hamming distance. When the
/// seeding belief state is unsatisfiable there is no nearest model and every
/// state ranks 0.
pub struct HammingRanking {
    base_models: Vec<State>,
    weights: VarWeights,
}

impl HammingRanking {
    /// Builds a ranking seeded from a belief state, over a universe that must
    /// cover the variables of all its sentences.
    pub fn new(
        belief_state: &BTreeSet<Proposition>,
        universe: &BTreeSet<Variable>,
        weights: VarWeights,
    ) -> Self {
        let base = Proposition::and_all(belief_state.iter().cloned()).unwrap_or(Proposition::True);
        Self {
            base_models: base.models_over(universe).into_iter().collect(),
            weights,
        }
    }

    fn distance(&self, lhs: &State, rhs: &State) -> usize {
        lhs.iter()
            .filter(|(v, b)| rhs.value_of(v) != *b)
            .map(|(v, _)| self.weights.weight_of(v))
            .sum()
    }
}

impl StateRanking for HammingRanking {
    fn rank(&self, state: &State) -> usize {
        self.base_models
            .iter()
            .map(|m| self.distance(state, m))
            .min()
            .unwrap_or(0)
    }
}

/// Ranks states by sphere membership: the rank of a state is the index of the
/// first sphere sentence it satisfies, and states matching no sphere rank
/// last.
pub struct OrderedSetsRanking {
    spheres: Vec<Proposition>,
}

impl OrderedSetsRanking {
    /// Builds a ranking from an ordered list of sphere sentences.
    pub fn new(spheres: Vec<Proposition>) -> Self {
        Self { spheres }
    }
}

impl StateRanking for OrderedSetsRanking {
    fn rank(&self, state: &State) -> usize {
        self.spheres
            .iter()
            .position(|sphere| sphere.eval(state))
            .unwrap_or(self.spheres.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revision::weights::Weighted;

    fn var(name: &str) -> Variable {
        Variable::make(name).unwrap()
    }

    fn beliefs(texts: &[&str]) -> BTreeSet<Proposition> {
        texts
            .iter()
            .map(|t| Proposition::parse(t).unwrap())
            .collect()
    }

    fn state_where(universe: &BTreeSet<Variable>, text: &str) -> State {
        let sentence = Proposition::parse(text).unwrap();
        let mut models = sentence.models_over(universe).into_iter();
        let first = models.next().unwrap();
        assert!(models.next().is_none(), "more than one state matches");
        first
    }

    #[test]
    fn test_hamming_rank_is_bit_distance() {
        let universe = [var("a"), var("b")].into_iter().collect();
        let ranking = HammingRanking::new(
            &beliefs(&["a and b"]),
            &universe,
            VarWeights::new(),
        );
        assert_eq!(0, ranking.rank(&state_where(&universe, "a and b")));
        assert_eq!(1, ranking.rank(&state_where(&universe, "a and -b")));
        assert_eq!(1, ranking.rank(&state_where(&universe, "-a and b")));
        assert_eq!(2, ranking.rank(&state_where(&universe, "-a and -b")));
    }

    #[test]
    fn test_hamming_rank_uses_nearest_model() {
        let universe = [var("a"), var("b")].into_iter().collect();
        let ranking = HammingRanking::new(
            &beliefs(&["a xor b"]),
            &universe,
            VarWeights::new(),
        );
        // both remaining states are one flip away from a model
        assert_eq!(1, ranking.rank(&state_where(&universe, "a and b")));
        assert_eq!(1, ranking.rank(&state_where(&universe, "-a and -b")));
    }

    #[test]
    fn test_weighted_hamming_rank() {
        let universe = [var("a"), var("b")].into_iter().collect();
        let weights = [Weighted::new(var("a"), 3)]
            .into_iter()
            .collect::<VarWeights>();
        let ranking = HammingRanking::new(&beliefs(&["a and b"]), &universe, weights);
        assert_eq!(3, ranking.rank(&state_where(&universe, "-a and b")));
        // "b" is unmapped and weights 1
        assert_eq!(1, ranking.rank(&state_where(&universe, "a and -b")));
        assert_eq!(4, ranking.rank(&state_where(&universe, "-a and -b")));
    }

    #[test]
    fn test_hamming_rank_with_unsatisfiable_seed() {
        let universe = [var("a")].into_iter().collect();
        let ranking = HammingRanking::new(&beliefs(&["a and -a"]), &universe, VarWeights::new());
        assert_eq!(0, ranking.rank(&state_where(&universe, "a")));
        assert_eq!(0, ranking.rank(&state_where(&universe, "-a")));
    }

    #[test]
    fn test_ordered_sets_rank_is_first_matching_sphere() {
        let universe = [var("a"), var("b")].into_iter().collect::<BTreeSet<_>>();
        let spheres = vec![
            Proposition::parse("a and b").unwrap(),
            Proposition::parse("a").unwrap(),
        ];
        let ranking = OrderedSetsRanking::new(spheres);
        assert_eq!(0, ranking.rank(&state_where(&universe, "a and b")));
        assert_eq!(1, ranking.rank(&state_where(&universe, "a and -b")));
        assert_eq!(2, ranking.rank(&state_where(&universe, "-a and b")));
    }

    #[test]
    fn test_ordered_sets_rank_without_spheres() {
        let universe = [var("a")].into_iter().collect::<BTreeSet<_>>();
        let ranking = OrderedSetsRanking::new(Vec::new());
        assert_eq!(0, ranking.rank(&state_where(&universe, "a")));
    }
}
