mod errors;
pub use errors::ConfigurationError;
pub use errors::ParseError;
pub use errors::RevisionError;

mod problems;
pub use problems::ProblemInstance;

mod proposition;
pub use proposition::Proposition;

mod state;
pub use state::State;

mod variable;
pub use variable::Variable;
