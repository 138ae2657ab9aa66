//! Highlight facade: extension in, token stream (or plain lines) out.

use std::sync::Arc;

use serde::Serialize;

use crate::syntax::error::SyntaxError;
use crate::syntax::registry::GrammarRegistry;
use crate::syntax::source::GrammarSource;
use crate::syntax::tokenizer::{self, Token};

/// Result of highlighting a block of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Highlight {
    /// The extension resolved to a grammar; classified spans follow.
    Tokens(Vec<Token>),
    /// No grammar claims the extension: the text split into unclassified
    /// lines. A degraded but defined fallback, not an error.
    Plain(Vec<String>),
}

/// Front door for callers that think in file extensions rather than grammar
/// definitions.
pub struct Highlighter<S: GrammarSource> {
    registry: Arc<GrammarRegistry<S>>,
}

impl<S: GrammarSource> Highlighter<S> {
    pub fn new(registry: Arc<GrammarRegistry<S>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &GrammarRegistry<S> {
        &self.registry
    }

    /// Register grammars by name; see [`GrammarRegistry::register`].
    pub async fn register(&self, names: &[&str]) -> Result<(), SyntaxError> {
        self.registry.register(names).await
    }

    /// Highlight `text` as a file with the given extension.
    ///
    /// Resolves the grammar through the registry; an unresolved extension
    /// degrades to [`Highlight::Plain`]. Errors only on a malformed
    /// sub-pattern in the resolved grammar.
    pub fn highlight(&self, text: &str, extension: &str) -> Result<Highlight, SyntaxError> {
        match self.registry.lookup(extension) {
            Some(grammar) => Ok(Highlight::Tokens(tokenizer::tokenize(text, &grammar)?)),
            None => Ok(Highlight::Plain(
                text.split('\n').map(str::to_string).collect(),
            )),
        }
    }
}
