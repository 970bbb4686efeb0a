use thiserror::Error;

/// An error raised while parsing the text of a sentence.
///
/// Parse errors are recoverable: batch loaders report the offending element
/// and carry on with the rest of the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A character that cannot begin a token was encountered.
    #[error(r#"unexpected character "{character}" at position {position}"#)]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Its byte position in the input text.
        position: usize,
    },
    /// A well-formed token appeared where the grammar does not allow it.
    #[error(r#"unexpected token "{token}" at position {position}"#)]
    UnexpectedToken {
        /// The offending token, as written in the input.
        token: String,
        /// Its byte position in the input text.
        position: usize,
    },
    /// The input ended while a subformula was still expected.
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// A complete sentence was parsed but input remained after it.
    #[error(r#"trailing input "{token}" at position {position}"#)]
    TrailingInput {
        /// The first token past the end of the sentence.
        token: String,
        /// Its byte position in the input text.
        position: usize,
    },
    /// A variable name does not match `[A-Za-z_][A-Za-z0-9_]*` or collides
    /// with a connective keyword.
    #[error(r#"invalid variable name "{0}""#)]
    InvalidVariableName(String),
    /// The input contained no sentence at all.
    #[error("empty input")]
    EmptyInput,
}

/// An error raised by a belief-revision operator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RevisionError {
    /// The revising sentence is unsatisfiable; no operator can produce a
    /// consistent belief state from it.
    #[error("cannot revise by an unsatisfiable sentence")]
    Contradiction,
}

/// An error in the configuration of an operator or a resolution strategy.
///
/// Configuration errors are raised before any search begins; they are never
/// discovered mid-enumeration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// An operator record carries a tag that matches no known operator.
    #[error(r#"unknown revision operator tag "{0}""#)]
    UnknownOperatorTag(String),
    /// A weight table entry names an invalid variable.
    #[error(r#"invalid variable "{0}" in a weight table"#)]
    InvalidWeightVariable(String),
    /// The ordered resolution strategy was given an instance whose operator
    /// is not comparator-based.
    #[error("the ordered resolution strategy requires comparator-based operators only")]
    NotComparatorBased,
}
