//! Grammar definitions and the JSON schema they are parsed from.
//!
//! A grammar definition file looks like:
//!
//! ```json
//! {
//!   "extension_name": "JavaScript",
//!   "extension_types": ["js", "mjs"],
//!   "grammar": {
//!     "keyword": {
//!       "priority": 5,
//!       "patterns": [ { "expression": "\\b(?:if|else)\\b", "kind": "control" } ]
//!     }
//!   }
//! }
//! ```
//!
//! Rule categories are kept in declaration order, as are the sub-patterns
//! within a category. Declaration order is observable: the matching phase
//! discovers candidates in that order, and equal-priority conflicts are
//! broken in favor of the earlier-discovered candidate.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::syntax::error::SyntaxError;

/// One regular expression plus the classification label applied to its
/// matches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubPattern {
    /// Regular-expression source string.
    pub expression: String,
    /// Classification label, combined with the category name into a token
    /// scope (`"<category>:<kind>"`).
    pub kind: String,
}

/// A named group of sub-patterns sharing one priority.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleGroup {
    /// Conflict-resolution priority; higher wins.
    pub priority: i64,
    /// Sub-patterns in declaration order.
    pub patterns: Vec<SubPattern>,
}

/// Wire shape of a grammar definition file.
#[derive(Debug, Deserialize)]
struct GrammarFile {
    extension_name: String,
    extension_types: Vec<String>,
    #[serde(deserialize_with = "rules_in_declaration_order")]
    grammar: Vec<(String, RuleGroup)>,
}

/// Deserialize the `grammar` map into a vector so category declaration order
/// survives parsing (a keyed map would re-sort it).
fn rules_in_declaration_order<'de, D>(
    deserializer: D,
) -> Result<Vec<(String, RuleGroup)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RulesVisitor;

    impl<'de> Visitor<'de> for RulesVisitor {
        type Value = Vec<(String, RuleGroup)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of rule categories")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut rules = Vec::new();
            while let Some(entry) = map.next_entry::<String, RuleGroup>()? {
                rules.push(entry);
            }
            Ok(rules)
        }
    }

    deserializer.deserialize_map(RulesVisitor)
}

/// An immutable grammar definition, parsed once at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarDefinition {
    /// Registry key: the identifier the definition was registered under.
    pub name: String,
    /// Display name from the file's `extension_name` field.
    pub display_name: String,
    /// File extensions this grammar applies to.
    pub extensions: Vec<String>,
    /// Rule categories with their names, in declaration order.
    pub rules: Vec<(String, RuleGroup)>,
}

impl GrammarDefinition {
    /// Whether this grammar claims the given file extension.
    pub fn matches_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e == extension)
    }

    /// Look up a rule group by category name.
    pub fn rule(&self, category: &str) -> Option<&RuleGroup> {
        self.rules
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, group)| group)
    }
}

/// Parse raw definition content into a [`GrammarDefinition`].
///
/// `name` is the registry key the definition is being registered under; it is
/// also used in error messages.
pub fn parse(name: &str, content: &str) -> Result<GrammarDefinition, SyntaxError> {
    let file: GrammarFile =
        serde_json::from_str(content).map_err(|e| SyntaxError::GrammarParse {
            name: name.to_string(),
            message: e.to_string(),
        })?;

    Ok(GrammarDefinition {
        name: name.to_string(),
        display_name: file.extension_name,
        extensions: file.extension_types,
        rules: file.grammar,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = r#"{
        "extension_name": "Demo",
        "extension_types": ["demo", "dmo"],
        "grammar": {
            "keyword": {
                "priority": 5,
                "patterns": [
                    { "expression": "\\bif\\b", "kind": "control" },
                    { "expression": "\\belse\\b", "kind": "control" }
                ]
            },
            "identifier": {
                "priority": 1,
                "patterns": [ { "expression": "\\w+", "kind": "name" } ]
            }
        }
    }"#;

    #[test]
    fn test_parse_valid_definition() {
        let grammar = parse("grammar_demo", DEMO).unwrap();
        assert_eq!(grammar.name, "grammar_demo");
        assert_eq!(grammar.display_name, "Demo");
        assert_eq!(grammar.extensions, vec!["demo", "dmo"]);
        assert_eq!(grammar.rules.len(), 2);
        assert_eq!(grammar.rule("keyword").unwrap().priority, 5);
        assert_eq!(grammar.rule("keyword").unwrap().patterns.len(), 2);
        assert_eq!(grammar.rule("identifier").unwrap().patterns[0].kind, "name");
        assert!(grammar.rule("missing").is_none());
    }

    #[test]
    fn test_parse_preserves_category_declaration_order() {
        // "keyword" is declared before "identifier"; a keyed map would sort
        // them the other way around.
        let grammar = parse("grammar_demo", DEMO).unwrap();
        let categories: Vec<&str> = grammar.rules.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(categories, vec!["keyword", "identifier"]);
    }

    #[test]
    fn test_parse_preserves_sub_pattern_order() {
        let grammar = parse("grammar_demo", DEMO).unwrap();
        let patterns = &grammar.rule("keyword").unwrap().patterns;
        assert_eq!(patterns[0].expression, "\\bif\\b");
        assert_eq!(patterns[1].expression, "\\belse\\b");
    }

    #[test]
    fn test_matches_extension() {
        let grammar = parse("grammar_demo", DEMO).unwrap();
        assert!(grammar.matches_extension("demo"));
        assert!(grammar.matches_extension("dmo"));
        assert!(!grammar.matches_extension("txt"));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse("broken", "not json at all").unwrap_err();
        assert!(matches!(err, SyntaxError::GrammarParse { ref name, .. } if name == "broken"));
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let err = parse("partial", r#"{ "extension_name": "X" }"#).unwrap_err();
        assert!(matches!(err, SyntaxError::GrammarParse { .. }));
    }

    #[test]
    fn test_parse_rejects_wrong_priority_type() {
        let content = r#"{
            "extension_name": "X",
            "extension_types": ["x"],
            "grammar": {
                "keyword": { "priority": "high", "patterns": [] }
            }
        }"#;
        let err = parse("typed", content).unwrap_err();
        assert!(matches!(err, SyntaxError::GrammarParse { .. }));
    }

    #[test]
    fn test_parse_rejects_non_map_grammar() {
        let content = r#"{
            "extension_name": "X",
            "extension_types": ["x"],
            "grammar": []
        }"#;
        let err = parse("shaped", content).unwrap_err();
        assert!(matches!(err, SyntaxError::GrammarParse { .. }));
    }

    #[test]
    fn test_parse_allows_negative_priority() {
        let content = r#"{
            "extension_name": "X",
            "extension_types": ["x"],
            "grammar": {
                "filler": {
                    "priority": -1,
                    "patterns": [ { "expression": ".", "kind": "any" } ]
                }
            }
        }"#;
        let grammar = parse("negative", content).unwrap();
        assert_eq!(grammar.rule("filler").unwrap().priority, -1);
    }
}
