//! Error types for grammar loading and tokenization.

use std::fmt;

/// Errors reported by the grammar registry and the tokenizer.
///
/// Every failure is surfaced to the immediate caller; the only silent
/// degradation in the crate is the plain-line fallback in
/// [highlight](crate::syntax::highlight), which is a normal outcome, not an
/// error.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// The grammar source has no definition under the requested name.
    GrammarNotFound(String),
    /// The definition exists but its content could not be read.
    GrammarRead { name: String, message: String },
    /// The definition content does not match the grammar schema.
    GrammarParse { name: String, message: String },
    /// A sub-pattern's regular-expression source failed to compile.
    InvalidPattern { pattern: String, message: String },
    /// A request was malformed (e.g. an empty registration batch).
    InvalidArgument(String),
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::GrammarNotFound(name) => {
                write!(f, "grammar '{}' not found", name)
            }
            SyntaxError::GrammarRead { name, message } => {
                write!(f, "failed to read grammar '{}': {}", name, message)
            }
            SyntaxError::GrammarParse { name, message } => {
                write!(f, "failed to parse grammar '{}': {}", name, message)
            }
            SyntaxError::InvalidPattern { pattern, message } => {
                write!(f, "invalid pattern '{}': {}", pattern, message)
            }
            SyntaxError::InvalidArgument(message) => {
                write!(f, "invalid argument: {}", message)
            }
        }
    }
}

impl std::error::Error for SyntaxError {}
