use super::errors::ParseError;
use rustc_hash::FxHashSet;
use std::{
    fmt::{self, Display},
    sync::{Arc, OnceLock, PoisonError, RwLock},
};

/// The connective keywords of the sentence grammar; none of them may be used
/// as a variable name.
pub(crate) const RESERVED_WORDS: [&str; 5] = ["and", "or", "xor", "true", "false"];

static INTERN_TABLE: OnceLock<RwLock<FxHashSet<Arc<str>>>> = OnceLock::new();

/// An atomic propositional symbol, identified by its canonical name.
///
/// Variables are immutable and interned by name: two variables built from the
/// same name share their backing storage and compare equal. Equality,
/// ordering and hashing are all by name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(Arc<str>);

impl Variable {
    /// Builds a variable from its name, interning the name process-wide.
    ///
    /// A valid name matches `[A-Za-z_][A-Za-z0-9_]*` and is not one of the
    /// connective keywords (`and`, `or`, `xor`, `true`, `false`).
    pub fn make(name: &str) -> Result<Self, ParseError> {
        if !is_valid_name(name) {
            return Err(ParseError::InvalidVariableName(name.to_string()));
        }
        Ok(Self(intern(name)))
    }

    /// Returns the canonical name of this variable.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let first_is_ok = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    first_is_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED_WORDS.contains(&name)
}

// First sight of a name takes the write lock; later sightings only contend on
// the read lock.
fn intern(name: &str) -> Arc<str> {
    let table = INTERN_TABLE.get_or_init(|| RwLock::new(FxHashSet::default()));
    if let Some(interned) = table
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
    {
        return Arc::clone(interned);
    }
    let mut writable = table.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(interned) = writable.get(name) {
        return Arc::clone(interned);
    }
    let interned: Arc<str> = Arc::from(name);
    writable.insert(Arc::clone(&interned));
    interned
}
