//! Syntax highlighting core
//!
//! This module contains the two components the rest of an editor builds on:
//!
//! Grammar Registry:
//!     Loads named grammar definitions from a [`source::GrammarSource`] and
//!     resolves file extensions to definitions. Registration is async (it is
//!     the only operation that performs I/O) and single-flighted per grammar
//!     name; lookup is synchronous. See [registry](registry).
//!
//! Tokenizer:
//!     A pure function from (text, grammar) to a conflict-free,
//!     position-ordered token sequence. Matching runs every declared
//!     sub-pattern over the full text; overlapping candidates are then
//!     eliminated by rule-group priority. See [tokenizer](tokenizer).
//!
//! The [highlight](highlight) facade ties the two together: it resolves the
//! grammar for a file extension and degrades to plain, unclassified lines
//! when the extension is unknown.

pub mod error;
pub mod grammar;
pub mod highlight;
pub mod registry;
pub mod source;
pub mod tokenizer;

pub use error::SyntaxError;
pub use grammar::{GrammarDefinition, RuleGroup, SubPattern};
pub use highlight::{Highlight, Highlighter};
pub use registry::GrammarRegistry;
pub use source::{
    DirGrammarSource, EmbeddedGrammarSource, GrammarSource, MemoryGrammarSource,
    BUILTIN_GRAMMAR_NAMES,
};
pub use tokenizer::{tokenize, Token};
