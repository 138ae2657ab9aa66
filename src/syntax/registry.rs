//! Grammar registry: owns loaded definitions and resolves extensions.
//!
//! Registration Semantics
//!
//!     Registration is batched and concurrent: every requested name loads
//!     independently, and the aggregate operation fails with the first
//!     observed failure. Names that finished loading before the failure
//!     remain registered; callers that need to know which subset made it
//!     should query the registry afterwards.
//!
//!     Registration for one name is single-flighted through a per-name
//!     `tokio::sync::OnceCell`: the presence check and the population of the
//!     entry are atomic, so a second caller for an in-flight name awaits the
//!     same load instead of duplicating it. A name that is already registered
//!     is an idempotent no-op; re-registration does not update the
//!     definition. A failed load leaves no entry behind, so a later request
//!     for the same name retries.
//!
//! Lookup
//!
//!     `lookup` scans definitions in registration order (order of load
//!     completion) and returns the first whose extension set contains the
//!     queried extension. Extension sets should not overlap between
//!     registered grammars; when they do, first registered wins.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future;
use tokio::sync::OnceCell;

use crate::syntax::error::SyntaxError;
use crate::syntax::grammar::{self, GrammarDefinition};
use crate::syntax::source::GrammarSource;

/// Process-lifetime store of grammar definitions.
///
/// Constructed explicitly and injected into callers; there is no ambient
/// global registry, so tests can run against a fresh registry each.
pub struct GrammarRegistry<S: GrammarSource> {
    source: S,
    cells: Mutex<HashMap<String, Arc<OnceCell<Arc<GrammarDefinition>>>>>,
    loaded: Mutex<Vec<Arc<GrammarDefinition>>>,
}

impl<S: GrammarSource> GrammarRegistry<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cells: Mutex::new(HashMap::new()),
            loaded: Mutex::new(Vec::new()),
        }
    }

    /// The grammar source this registry loads from.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Register one or more grammars by name.
    ///
    /// All names load concurrently. Fails with `InvalidArgument` on an empty
    /// batch, otherwise with the first observed per-name failure
    /// (`GrammarNotFound`, `GrammarRead`, or `GrammarParse`).
    pub async fn register(&self, names: &[&str]) -> Result<(), SyntaxError> {
        if names.is_empty() {
            return Err(SyntaxError::InvalidArgument(
                "at least one grammar name is required".to_string(),
            ));
        }

        future::try_join_all(names.iter().map(|name| self.register_one(name))).await?;
        Ok(())
    }

    async fn register_one(&self, name: &str) -> Result<(), SyntaxError> {
        let cell = {
            let mut cells = self.cells.lock().expect("registry cell map poisoned");
            cells.entry(name.to_string()).or_default().clone()
        };

        cell.get_or_try_init(|| async {
            let raw = self.source.load(name).await?;
            let definition = Arc::new(grammar::parse(name, &raw)?);
            self.loaded
                .lock()
                .expect("registry definition list poisoned")
                .push(definition.clone());
            Ok::<_, SyntaxError>(definition)
        })
        .await?;

        Ok(())
    }

    /// Resolve a file extension to the owning grammar definition.
    ///
    /// Returns `None` for unrecognized extensions; this is a normal outcome,
    /// not an error.
    pub fn lookup(&self, extension: &str) -> Option<Arc<GrammarDefinition>> {
        self.loaded
            .lock()
            .expect("registry definition list poisoned")
            .iter()
            .find(|definition| definition.matches_extension(extension))
            .cloned()
    }

    /// Whether a grammar finished registering under the given name.
    pub fn is_registered(&self, name: &str) -> bool {
        self.cells
            .lock()
            .expect("registry cell map poisoned")
            .get(name)
            .is_some_and(|cell| cell.initialized())
    }

    /// All registered definitions, in registration order.
    pub fn definitions(&self) -> Vec<Arc<GrammarDefinition>> {
        self.loaded
            .lock()
            .expect("registry definition list poisoned")
            .clone()
    }
}
