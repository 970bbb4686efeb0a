use crate::core::Variable;
use rustc_hash::FxHashMap;

/// A thing with a weight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Weighted<T> {
    weight: usize,
    thing: T,
}

impl<T> Weighted<T> {
    /// Builds a new weighted thing.
    pub fn new(thing: T, weight: usize) -> Self {
        Self { weight, thing }
    }

    /// Returns a reference to the thing.
    pub fn thing(&self) -> &T {
        &self.thing
    }

    /// Returns the weight of the thing.
    pub fn weight(&self) -> usize {
        self.weight
    }
}

/// A structure used to handle the weights of the variables of a formula.
///
/// Variables with no associated weight implicitly weight 1; the weighted
/// Hamming distance over an empty table is the plain Hamming distance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VarWeights {
    weights: FxHashMap<Variable, usize>,
}

impl VarWeights {
    /// Builds an empty weight table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates a weight with a variable, replacing any previous one.
    pub fn add(&mut self, weighted_var: Weighted<Variable>) {
        self.weights
            .insert(weighted_var.thing().clone(), weighted_var.weight());
    }

    /// Returns the weight of a variable, defaulting to 1 when none was
    /// associated with it.
    pub fn weight_of(&self, var: &Variable) -> usize {
        self.weights.get(var).copied().unwrap_or(1)
    }

    /// Iterates over the variables which have an explicit weight.
    pub fn iter(&self) -> impl Iterator<Item = Weighted<Variable>> + '_ {
        self.weights
            .iter()
            .map(|(v, w)| Weighted::new(v.clone(), *w))
    }

    /// Returns the maximal weight explicitly associated with a variable, or
    /// `None` if the table is empty.
    pub fn max_weight(&self) -> Option<usize> {
        self.weights.values().copied().max()
    }
}

impl FromIterator<Weighted<Variable>> for VarWeights {
    fn from_iter<I: IntoIterator<Item = Weighted<Variable>>>(iter: I) -> Self {
        let mut result = VarWeights::new();
        iter.into_iter().for_each(|w| result.add(w));
        result
    }
}
