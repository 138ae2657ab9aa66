//! End-to-end highlighting tests against the shipped grammar definitions.

use std::sync::Arc;

use glint::syntax::{
    DirGrammarSource, EmbeddedGrammarSource, GrammarRegistry, Highlight, Highlighter,
    BUILTIN_GRAMMAR_NAMES,
};

async fn builtin_highlighter() -> Highlighter<EmbeddedGrammarSource> {
    let registry = Arc::new(GrammarRegistry::new(EmbeddedGrammarSource));
    let highlighter = Highlighter::new(registry);
    highlighter.register(&BUILTIN_GRAMMAR_NAMES).await.unwrap();
    highlighter
}

fn expect_tokens(highlight: Highlight) -> Vec<glint::syntax::Token> {
    match highlight {
        Highlight::Tokens(tokens) => tokens,
        Highlight::Plain(lines) => panic!("expected tokens, got plain lines: {:?}", lines),
    }
}

#[tokio::test]
async fn test_javascript_snippet() {
    let highlighter = builtin_highlighter().await;
    let source = "if (count > 41) { return \"done\"; } // check\n";

    let tokens = expect_tokens(highlighter.highlight(source, "js").unwrap());

    let find = |text: &str| {
        tokens
            .iter()
            .find(|t| t.text == text)
            .unwrap_or_else(|| panic!("no token for {:?}", text))
    };
    assert_eq!(find("if").scope, "keyword:control");
    assert_eq!(find("return").scope, "keyword:control");
    assert_eq!(find("count").scope, "identifier:name");
    assert_eq!(find("41").scope, "literal:number");
    assert_eq!(find("\"done\"").scope, "string:double");
    assert_eq!(find("// check").scope, "comment:line");

    // Output invariants hold on real grammars too.
    for pair in tokens.windows(2) {
        assert!(pair[0].start < pair[1].start);
        assert!(pair[0].end() <= pair[1].start);
    }
}

#[tokio::test]
async fn test_comment_shadows_code_patterns() {
    let highlighter = builtin_highlighter().await;
    let source = "// if (x) return 1\n";

    let tokens = expect_tokens(highlighter.highlight(source, "js").unwrap());

    // The whole line is one comment token; the keyword and number patterns
    // inside it are discarded by priority.
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].scope, "comment:line");
    assert_eq!(tokens[0].text, "// if (x) return 1");
}

#[tokio::test]
async fn test_json_keys_beat_plain_strings() {
    let highlighter = builtin_highlighter().await;
    let source = "{\"name\": \"glint\"}";

    let tokens = expect_tokens(highlighter.highlight(source, "json").unwrap());

    let key = tokens.iter().find(|t| t.text == "\"name\":").unwrap();
    assert_eq!(key.scope, "key:name");
    let value = tokens.iter().find(|t| t.text == "\"glint\"").unwrap();
    assert_eq!(value.scope, "string:double");
}

#[tokio::test]
async fn test_markdown_heading_and_code() {
    let highlighter = builtin_highlighter().await;
    let source = "# Title\n\nSome `inline` code.\n";

    let tokens = expect_tokens(highlighter.highlight(source, "md").unwrap());

    let heading = tokens.iter().find(|t| t.scope == "heading:atx").unwrap();
    assert_eq!(heading.text, "# Title");
    let code = tokens.iter().find(|t| t.scope == "code:inline").unwrap();
    assert_eq!(code.text, "`inline`");
}

#[tokio::test]
async fn test_unknown_extension_degrades_to_plain_lines() {
    let highlighter = builtin_highlighter().await;

    let highlight = highlighter.highlight("alpha\nbeta", "unknownext").unwrap();
    assert_eq!(
        highlight,
        Highlight::Plain(vec!["alpha".to_string(), "beta".to_string()])
    );
}

#[tokio::test]
async fn test_directory_source_serves_shipped_grammars() {
    let registry = Arc::new(GrammarRegistry::new(DirGrammarSource::new(
        "resources/grammar",
    )));
    registry.register(&BUILTIN_GRAMMAR_NAMES).await.unwrap();

    assert_eq!(registry.definitions().len(), BUILTIN_GRAMMAR_NAMES.len());
    assert_eq!(registry.lookup("html").unwrap().display_name, "HTML");
    assert_eq!(registry.lookup("markdown").unwrap().display_name, "Markdown");
}

#[tokio::test]
async fn test_directory_source_with_custom_grammar() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("grammar_ini.json"),
        r#"{
            "extension_name": "INI",
            "extension_types": ["ini", "cfg"],
            "grammar": {
                "section": {
                    "priority": 5,
                    "patterns": [ { "expression": "(?m)^\\[[^\\]\\n]*\\]", "kind": "header" } ]
                },
                "assignment": {
                    "priority": 3,
                    "patterns": [ { "expression": "(?m)^[A-Za-z_][\\w.]*\\s*=", "kind": "key" } ]
                }
            }
        }"#,
    )
    .unwrap();

    let registry = Arc::new(GrammarRegistry::new(DirGrammarSource::new(dir.path())));
    registry.register(&["grammar_ini"]).await.unwrap();
    let highlighter = Highlighter::new(registry);

    let tokens = expect_tokens(
        highlighter
            .highlight("[core]\nname = glint\n", "ini")
            .unwrap(),
    );
    assert_eq!(tokens[0].text, "[core]");
    assert_eq!(tokens[0].scope, "section:header");
    assert_eq!(tokens[1].text, "name =");
    assert_eq!(tokens[1].scope, "assignment:key");
}
