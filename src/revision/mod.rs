//! The belief-revision operators and the preorders over states that seed
//! them.

mod operators;
pub use operators::RevisionOperator;

mod rankings;
pub use rankings::HammingRanking;
pub use rankings::OrderedSetsRanking;
pub use rankings::StateRanking;

mod weights;
pub use weights::VarWeights;
pub use weights::Weighted;
