use super::{proposition::Proposition, variable::Variable};
use itertools::Itertools;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::{self, Display},
};

/// A total truth assignment over a finite set of variables; one possible
/// world.
///
/// States are immutable once built and may be freely shared across threads.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State {
    assignment: BTreeMap<Variable, bool>,
}

impl State {
    /// Builds a state from an explicit assignment.
    pub fn new(assignment: BTreeMap<Variable, bool>) -> Self {
        Self { assignment }
    }

    /// Enumerates the `2^n` states over a set of `n` variables.
    ///
    /// Each state appears exactly once. The order is unspecified but stable
    /// within a single call (and, in practice, across calls: states are
    /// emitted by counting over the variables in name order).
    ///
    /// # Panics
    ///
    /// This function panics if more variables are given than there are bits
    /// in a machine word; such a universe could not be enumerated anyway.
    pub fn permutations_of(vars: &BTreeSet<Variable>) -> Vec<State> {
        assert!(
            vars.len() < usize::BITS as usize,
            "cannot enumerate the states of {} variables",
            vars.len()
        );
        (0..1_usize << vars.len())
            .map(|bits| {
                let assignment = vars
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (v.clone(), bits >> i & 1 == 1))
                    .collect();
                State { assignment }
            })
            .collect()
    }

    /// Returns the truth value this state assigns to a variable.
    ///
    /// # Panics
    ///
    /// This function panics if the variable does not belong to the universe
    /// of this state.
    pub fn value_of(&self, var: &Variable) -> bool {
        match self.assignment.get(var) {
            Some(b) => *b,
            None => panic!(r#"state does not assign variable "{}""#, var),
        }
    }

    /// Iterates over the variables of this state's universe, in name order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.assignment.keys()
    }

    /// Iterates over the (variable, value) pairs of this state, in name
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, bool)> + '_ {
        self.assignment.iter().map(|(v, b)| (v, *b))
    }

    /// Renders this state as the sentence that is true in exactly this state:
    /// the full conjunction of its literals.
    ///
    /// Over an empty universe, the rendering is the tautology.
    pub fn to_proposition(&self) -> Proposition {
        Proposition::and_all(self.assignment.iter().map(|(v, b)| {
            let atom = Proposition::Var(v.clone());
            if *b {
                atom
            } else {
                Proposition::Not(Box::new(atom))
            }
        }))
        .unwrap_or(Proposition::True)
    }
}

impl Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.assignment
                .iter()
                .map(|(v, b)| format!("{}{}", if *b { "" } else { "-" }, v))
                .join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe(names: &[&str]) -> BTreeSet<Variable> {
        names.iter().map(|n| Variable::make(n).unwrap()).collect()
    }

    #[test]
    fn test_permutations_count_and_uniqueness() {
        for n in 0..=4 {
            let names = (0..n).map(|i| format!("v{}", i)).collect::<Vec<_>>();
            let vars = universe(&names.iter().map(String::as_str).collect::<Vec<_>>());
            let states = State::permutations_of(&vars);
            assert_eq!(1 << n, states.len());
            let distinct = states.iter().collect::<BTreeSet<_>>();
            assert_eq!(states.len(), distinct.len());
        }
    }

    #[test]
    fn test_permutations_of_no_vars() {
        let states = State::permutations_of(&BTreeSet::new());
        assert_eq!(1, states.len());
        assert_eq!(0, states[0].variables().count());
    }

    #[test]
    fn test_value_of() {
        let vars = universe(&["a", "b"]);
        let states = State::permutations_of(&vars);
        let a = Variable::make("a").unwrap();
        let b = Variable::make("b").unwrap();
        let n_with_a = states.iter().filter(|s| s.value_of(&a)).count();
        let n_with_both = states
            .iter()
            .filter(|s| s.value_of(&a) && s.value_of(&b))
            .count();
        assert_eq!(2, n_with_a);
        assert_eq!(1, n_with_both);
    }

    #[test]
    #[should_panic(expected = "does not assign")]
    fn test_value_of_unknown_var() {
        let states = State::permutations_of(&universe(&["a"]));
        states[0].value_of(&Variable::make("b").unwrap());
    }

    #[test]
    fn test_to_proposition_single_model() {
        let vars = universe(&["a", "b", "c"]);
        for state in State::permutations_of(&vars) {
            let p = state.to_proposition();
            let models = p.models();
            assert_eq!(1, models.len());
            assert!(models.contains(&state));
        }
    }

    #[test]
    fn test_to_proposition_empty_universe() {
        let states = State::permutations_of(&BTreeSet::new());
        assert_eq!(Proposition::True, states[0].to_proposition());
    }

    #[test]
    fn test_display() {
        let vars = universe(&["a", "b"]);
        let states = State::permutations_of(&vars);
        let a = Variable::make("a").unwrap();
        let b = Variable::make("b").unwrap();
        let s = states
            .iter()
            .find(|s| s.value_of(&a) && !s.value_of(&b))
            .unwrap();
        assert_eq!("{a -b}", format!("{}", s));
    }
}
