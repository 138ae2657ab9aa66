//! Tokenizer: pattern matching and conflict resolution.
//!
//! Matching Phase
//!
//!     For every rule category in the grammar, every sub-pattern runs a
//!     find-all scan over the full text. A single pattern never overlaps its
//!     own previous match (the scan continues from the end of each match),
//!     but distinct patterns match completely independently, so two
//!     candidates may claim overlapping ranges.
//!
//! Conflict Resolution
//!
//!     Two candidates conflict when their half-open byte ranges intersect or
//!     when they share a start offset. Of a conflicting pair, the strictly
//!     lower-priority candidate is discarded; at equal priority the candidate
//!     discovered earlier in the matching phase survives. Resolution is
//!     implemented by ordering candidates by (priority descending, discovery
//!     order ascending) and greedily accepting each candidate that conflicts
//!     with no already-accepted one. The result is independent of the order
//!     pairs are considered in, which a remove-while-iterating pass would not
//!     be.
//!
//! The output is sorted by ascending start offset and contains no two tokens
//! with intersecting ranges.

use regex::Regex;
use serde::Serialize;

use crate::syntax::error::SyntaxError;
use crate::syntax::grammar::GrammarDefinition;

/// One matched, classified span of source text.
///
/// Tokens are created fresh per tokenization call and owned solely by the
/// returned sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The exact matched substring.
    pub text: String,
    /// Composite classification: `"<category>:<kind>"`.
    pub scope: String,
    /// Priority of the owning rule group; retained for downstream styling
    /// decisions.
    pub priority: i64,
    /// Byte offset of the match in the source text.
    pub start: usize,
    /// Byte length of the match.
    pub length: usize,
}

impl Token {
    /// One past the last byte of the match.
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Produce a conflict-free, position-ordered token sequence for `text` under
/// `grammar`.
///
/// Fails fast with `InvalidPattern` when a sub-pattern's regular-expression
/// source does not compile; nothing is silently skipped.
pub fn tokenize(text: &str, grammar: &GrammarDefinition) -> Result<Vec<Token>, SyntaxError> {
    let mut candidates = Vec::new();

    for (category, group) in &grammar.rules {
        for sub_pattern in &group.patterns {
            let regex =
                Regex::new(&sub_pattern.expression).map_err(|e| SyntaxError::InvalidPattern {
                    pattern: sub_pattern.expression.clone(),
                    message: e.to_string(),
                })?;

            for found in regex.find_iter(text) {
                candidates.push(Token {
                    text: found.as_str().to_string(),
                    scope: format!("{}:{}", category, sub_pattern.kind),
                    priority: group.priority,
                    start: found.start(),
                    length: found.len(),
                });
            }
        }
    }

    Ok(resolve_conflicts(candidates))
}

/// Whether two candidates occupy conflicting ranges.
///
/// Identical start offsets conflict even for zero-length matches, which the
/// intersection test alone would miss.
fn conflicts(a: &Token, b: &Token) -> bool {
    a.start == b.start || (a.start < b.end() && b.start < a.end())
}

/// Eliminate dominated candidates and order the survivors by position.
///
/// Candidate index doubles as discovery order: candidates were pushed in the
/// order the matching phase found them.
fn resolve_conflicts(candidates: Vec<Token>) -> Vec<Token> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        candidates[b]
            .priority
            .cmp(&candidates[a].priority)
            .then(a.cmp(&b))
    });

    let mut keep = vec![false; candidates.len()];
    let mut accepted: Vec<usize> = Vec::new();
    for index in order {
        if accepted
            .iter()
            .all(|&kept| !conflicts(&candidates[kept], &candidates[index]))
        {
            keep[index] = true;
            accepted.push(index);
        }
    }

    let mut survivors: Vec<(usize, Token)> = candidates
        .into_iter()
        .enumerate()
        .filter(|(index, _)| keep[*index])
        .collect();
    survivors.sort_by_key(|(index, token)| (token.start, *index));
    survivors.into_iter().map(|(_, token)| token).collect()
}
