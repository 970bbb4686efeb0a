//! An announcement-resolution engine for multi-agent belief revision.
//!
//! Given several agents, each holding an initial set of believed sentences, a
//! target belief sentence and a private belief-revision policy, the engine
//! searches for a single public announcement such that revising every agent's
//! beliefs by it yields exactly that agent's target.

mod core;
pub use crate::core::ConfigurationError;
pub use crate::core::ParseError;
pub use crate::core::ProblemInstance;
pub use crate::core::Proposition;
pub use crate::core::RevisionError;
pub use crate::core::State;
pub use crate::core::Variable;

mod revision;
pub use revision::HammingRanking;
pub use revision::OrderedSetsRanking;
pub use revision::RevisionOperator;
pub use revision::StateRanking;
pub use revision::VarWeights;
pub use revision::Weighted;

mod resolvers;
pub use resolvers::resolve;
pub use resolvers::BruteForceResolver;
pub use resolvers::OrderedResolver;
pub use resolvers::Resolution;

mod exec;
pub use exec::CancellationToken;
pub use exec::ResolverTask;

mod io;
pub use io::InstanceBatch;
pub use io::InstancesReader;
pub use io::InstancesWriter;
