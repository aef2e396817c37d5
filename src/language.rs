//! Shared language support (tree-sitter configuration)
//!
//! The syntax provider for both pipelines. Everything above this module only
//! sees `tree_sitter::Tree`s with row/column spans.

use crate::error::{MetaError, Result};
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// Grammars the extractors understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// Component/page modules
    Script,
    /// Stylesheets (css, wxss, acss, ttss, less)
    Style,
}

impl Grammar {
    pub fn name(&self) -> &'static str {
        match self {
            Grammar::Script => "javascript",
            Grammar::Style => "css",
        }
    }
}

pub fn get_tree_sitter_language(grammar: Grammar) -> tree_sitter::Language {
    match grammar {
        Grammar::Script => tree_sitter_javascript::LANGUAGE.into(),
        Grammar::Style => tree_sitter_css::LANGUAGE.into(),
    }
}

/// Determine the grammar from a file extension
pub fn detect_grammar_from_extension(file_path: &str) -> Option<Grammar> {
    let extension = Path::new(file_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension {
        "js" | "mjs" | "cjs" => Some(Grammar::Script),
        "css" | "wxss" | "acss" | "ttss" | "less" => Some(Grammar::Style),
        _ => None,
    }
}

/// Parse `content` with a fresh parser. Parsers are cheap and not `Sync`,
/// so every extraction owns one.
pub fn parse_source(grammar: Grammar, content: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&get_tree_sitter_language(grammar))
        .map_err(|e| MetaError::Grammar(format!("Failed to set parser language for {}: {}", grammar.name(), e)))?;

    parser
        .parse(content, None)
        .ok_or_else(|| MetaError::Grammar(format!("{} parser produced no tree", grammar.name())))
}

/// First ERROR or MISSING node in document order, if any
pub fn first_error_node<'a>(root: Node<'a>) -> Option<Node<'a>> {
    if !root.has_error() {
        return None;
    }
    if root.is_error() || root.is_missing() {
        return Some(root);
    }

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if let Some(found) = first_error_node(child) {
            return Some(found);
        }
    }
    // has_error() without a visible culprit: report the root itself
    Some(root)
}
