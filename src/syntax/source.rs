//! Grammar sources: where raw definition content comes from.
//!
//! The registry is generic over a [`GrammarSource`], which keeps the loading
//! mechanics (filesystem, compiled-in defaults, test fixtures) out of the
//! registry itself and lets tests run with fresh in-memory sources.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use once_cell::sync::Lazy;

use crate::syntax::error::SyntaxError;

/// The built-in grammar set shipped with the crate, mirroring the default
/// languages an editor registers at startup.
pub const BUILTIN_GRAMMAR_NAMES: [&str; 4] =
    ["grammar_js", "grammar_html", "grammar_json", "grammar_md"];

static BUILTIN_GRAMMARS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            "grammar_js",
            include_str!("../../resources/grammar/grammar_js.json"),
        ),
        (
            "grammar_html",
            include_str!("../../resources/grammar/grammar_html.json"),
        ),
        (
            "grammar_json",
            include_str!("../../resources/grammar/grammar_json.json"),
        ),
        (
            "grammar_md",
            include_str!("../../resources/grammar/grammar_md.json"),
        ),
    ])
});

/// A provider of raw grammar definition content.
///
/// `load` returns the definition text for a grammar name, or
/// [`SyntaxError::GrammarNotFound`] when the source has nothing registered
/// under that name. Parsing is the registry's job, not the source's.
pub trait GrammarSource {
    async fn load(&self, name: &str) -> Result<String, SyntaxError>;
}

/// Loads `<root>/<name>.json` from the filesystem.
///
/// Existence is checked before reading, so a missing file reports
/// `GrammarNotFound` while an unreadable file reports `GrammarRead`.
#[derive(Debug, Clone)]
pub struct DirGrammarSource {
    root: PathBuf,
}

impl DirGrammarSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl GrammarSource for DirGrammarSource {
    async fn load(&self, name: &str) -> Result<String, SyntaxError> {
        let path = self.root.join(format!("{}.json", name));

        match tokio::fs::try_exists(&path).await {
            Ok(true) => {}
            _ => return Err(SyntaxError::GrammarNotFound(name.to_string())),
        }

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| SyntaxError::GrammarRead {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}

/// Serves the compiled-in default grammars (see [`BUILTIN_GRAMMAR_NAMES`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedGrammarSource;

impl GrammarSource for EmbeddedGrammarSource {
    async fn load(&self, name: &str) -> Result<String, SyntaxError> {
        BUILTIN_GRAMMARS
            .get(name)
            .map(|content| content.to_string())
            .ok_or_else(|| SyntaxError::GrammarNotFound(name.to_string()))
    }
}

/// In-memory source for tests.
///
/// Counts every load attempt, which lets tests assert single-flight behavior
/// (a name registered concurrently by two callers must be loaded once). An
/// optional per-load delay widens the race window.
#[derive(Debug, Default)]
pub struct MemoryGrammarSource {
    entries: HashMap<String, String>,
    delay: Option<Duration>,
    loads: AtomicUsize,
}

impl MemoryGrammarSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(name.into(), content.into());
    }

    /// Number of load attempts made against this source.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl GrammarSource for MemoryGrammarSource {
    async fn load(&self, name: &str) -> Result<String, SyntaxError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| SyntaxError::GrammarNotFound(name.to_string()))
    }
}
