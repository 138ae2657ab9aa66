//! Command-line interface for glint
//! This binary registers a grammar set, highlights a file, and prints the
//! resulting token stream.
//!
//! Usage:
//!   glint highlight `<path>` [--grammar-dir `<dir>`] [--format `<format>`]  - Highlight a file
//!   glint grammars [--grammar-dir `<dir>`]                              - List grammar definitions

use clap::{Arg, Command};
use std::path::Path;
use std::sync::Arc;

use glint::syntax::{
    DirGrammarSource, EmbeddedGrammarSource, GrammarRegistry, GrammarSource, Highlight,
    Highlighter, BUILTIN_GRAMMAR_NAMES,
};

#[tokio::main]
async fn main() {
    let matches = Command::new("glint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A grammar-driven syntax highlighter")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("highlight")
                .about("Tokenize a file and print the classified spans")
                .arg(
                    Arg::new("path")
                        .help("Path to the file to highlight")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("grammar-dir")
                        .long("grammar-dir")
                        .help("Directory of grammar definition files (defaults to the built-in set)"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('simple' or 'json')")
                        .default_value("simple"),
                ),
        )
        .subcommand(
            Command::new("grammars")
                .about("List available grammar definitions")
                .arg(
                    Arg::new("grammar-dir")
                        .long("grammar-dir")
                        .help("Directory of grammar definition files (defaults to the built-in set)"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("highlight", highlight_matches)) => {
            let path = highlight_matches.get_one::<String>("path").unwrap();
            let format = highlight_matches.get_one::<String>("format").unwrap();
            match highlight_matches.get_one::<String>("grammar-dir") {
                Some(dir) => {
                    let names = grammar_names_in(dir);
                    handle_highlight(DirGrammarSource::new(dir), names, path, format).await;
                }
                None => {
                    let names = builtin_names();
                    handle_highlight(EmbeddedGrammarSource, names, path, format).await;
                }
            }
        }
        Some(("grammars", grammars_matches)) => {
            match grammars_matches.get_one::<String>("grammar-dir") {
                Some(dir) => {
                    let names = grammar_names_in(dir);
                    handle_grammars(DirGrammarSource::new(dir), names).await;
                }
                None => {
                    let names = builtin_names();
                    handle_grammars(EmbeddedGrammarSource, names).await;
                }
            }
        }
        _ => unreachable!(),
    }
}

fn builtin_names() -> Vec<String> {
    BUILTIN_GRAMMAR_NAMES.iter().map(|n| n.to_string()).collect()
}

/// Collect grammar names (file stems of `*.json`) from a directory.
fn grammar_names_in(dir: &str) -> Vec<String> {
    let entries = std::fs::read_dir(dir).unwrap_or_else(|e| {
        eprintln!("Error reading grammar directory '{}': {}", dir, e);
        std::process::exit(1);
    });

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .filter_map(|path| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string())
        })
        .collect();
    names.sort();

    if names.is_empty() {
        eprintln!("No grammar definitions found in '{}'", dir);
        std::process::exit(1);
    }
    names
}

async fn register_all<S: GrammarSource>(source: S, names: &[String]) -> Arc<GrammarRegistry<S>> {
    let registry = Arc::new(GrammarRegistry::new(source));
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    if let Err(e) = registry.register(&name_refs).await {
        eprintln!("Error loading grammars: {}", e);
        std::process::exit(1);
    }
    registry
}

/// Handle the highlight command
async fn handle_highlight<S: GrammarSource>(source: S, names: Vec<String>, path: &str, format: &str) {
    let registry = register_all(source, &names).await;

    let content = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    let highlighter = Highlighter::new(registry);
    let output = highlighter.highlight(&content, extension).unwrap_or_else(|e| {
        eprintln!("Highlighting error: {}", e);
        std::process::exit(1);
    });

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
                eprintln!("Serialization error: {}", e);
                std::process::exit(1);
            });
            println!("{}", json);
        }
        "simple" => print_simple(&output),
        other => {
            eprintln!("Unknown format '{}'; expected 'simple' or 'json'", other);
            std::process::exit(1);
        }
    }
}

fn print_simple(output: &Highlight) {
    match output {
        Highlight::Tokens(tokens) => {
            for token in tokens {
                println!(
                    "{:>6}..{:<6} {:<24} {:?}",
                    token.start,
                    token.end(),
                    token.scope,
                    token.text
                );
            }
        }
        Highlight::Plain(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
    }
}

/// Handle the grammars command
async fn handle_grammars<S: GrammarSource>(source: S, names: Vec<String>) {
    let registry = register_all(source, &names).await;

    println!("Registered grammar definitions:\n");
    for definition in registry.definitions() {
        println!(
            "  {:<16} {:<12} [{}]",
            definition.name,
            definition.display_name,
            definition.extensions.join(", ")
        );
    }
}
