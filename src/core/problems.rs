use super::{errors::RevisionError, proposition::Proposition, variable::Variable};
use crate::revision::RevisionOperator;
use std::collections::BTreeSet;

/// One agent's announcement-resolution problem: an initial belief state, a
/// target belief sentence and the agent's private revision operator.
///
/// Instances are value objects built by the caller and consumed read-only by
/// the resolvers.
#[derive(Clone, Debug, PartialEq)]
pub struct ProblemInstance {
    initial_belief_state: BTreeSet<Proposition>,
    target_belief_state: Proposition,
    operator: RevisionOperator,
}

impl ProblemInstance {
    /// Builds a new problem instance.
    pub fn new(
        initial_belief_state: BTreeSet<Proposition>,
        target_belief_state: Proposition,
        operator: RevisionOperator,
    ) -> Self {
        Self {
            initial_belief_state,
            target_belief_state,
            operator,
        }
    }

    /// Returns the initial belief state of the agent.
    pub fn initial_belief_state(&self) -> &BTreeSet<Proposition> {
        &self.initial_belief_state
    }

    /// Returns the target belief sentence of the agent.
    pub fn target_belief_state(&self) -> &Proposition {
        &self.target_belief_state
    }

    /// Returns the revision operator of the agent.
    pub fn operator(&self) -> &RevisionOperator {
        &self.operator
    }

    /// Revises the initial belief state by an announcement, through the
    /// agent's own operator.
    pub fn revise_by(
        &self,
        announcement: &Proposition,
    ) -> Result<BTreeSet<Proposition>, RevisionError> {
        self.operator.revise(&self.initial_belief_state, announcement)
    }

    /// Returns the variables involved in this instance: those of the initial
    /// belief state, of the target and of the operator configuration.
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut vars = self.target_belief_state.variables();
        self.initial_belief_state
            .iter()
            .for_each(|p| vars.extend(p.variables()));
        vars.extend(self.operator.variables());
        vars
    }
}
