// CSS Extractor
//
// Extracts stylesheet metadata:
// - Class selectors, one entry per occurrence, anywhere in the tree
//   (nested blocks, @media/@supports, pseudo-class arguments)
// - @import targets, verbatim, in source order

use crate::config::MetaConfig;
use crate::error::{MetaError, Result};
use crate::extractors::base::BaseExtractor;
use crate::extractors::meta::{ClassNameMeta, CssMeta};
use crate::language::first_error_node;
use tracing::{debug, warn};
use tree_sitter::{Node, Tree};

pub struct CSSExtractor<'c> {
    base: BaseExtractor,
    config: &'c MetaConfig,
}

impl<'c> CSSExtractor<'c> {
    pub fn new(file_path: String, content: String, config: &'c MetaConfig) -> Self {
        Self {
            base: BaseExtractor::new(file_path, content),
            config,
        }
    }

    pub fn extract(&self, tree: &Tree) -> Result<CssMeta> {
        let root = tree.root_node();
        if let Some(error) = first_error_node(root) {
            let span = self.base.span_of(&error);
            if !self.config.tolerate_style_errors {
                return Err(MetaError::Syntax {
                    path: self.base.file_path.clone(),
                    line: span.start.line,
                    column: span.start.column,
                });
            }
            warn!(
                "Syntax error in {} at {}:{}, extracting from recovered tree",
                self.base.file_path, span.start.line, span.start.column
            );
        }

        let mut meta = CssMeta::default();
        self.visit_tree(root, &mut meta);

        debug!(
            "Extracted {} classes and {} imports from {}",
            meta.classes.len(),
            meta.imports.len(),
            self.base.file_path
        );
        Ok(meta)
    }

    /// Pre-order traversal; class names nested in compound selectors come out
    /// in source order because the inner selector is always the first child.
    fn visit_tree(&self, root: Node, meta: &mut CssMeta) {
        let mut cursor = root.walk();
        let mut visited_children = false;
        loop {
            let node = cursor.node();
            if !visited_children {
                match node.kind() {
                    "class_name" => {
                        if let Some(class) = self.extract_class_name(node) {
                            meta.classes.push(class);
                        }
                    }
                    "import_statement" => {
                        if let Some(import) = self.extract_import(node) {
                            meta.imports.push(import);
                        }
                    }
                    _ => {}
                }
            }

            if !visited_children && cursor.goto_first_child() {
                continue;
            }
            if cursor.goto_next_sibling() {
                visited_children = false;
                continue;
            }
            if !cursor.goto_parent() {
                break;
            }
            visited_children = true;
        }
    }

    fn extract_class_name(&self, node: Node) -> Option<ClassNameMeta> {
        if node.parent().is_none_or(|parent| parent.kind() != "class_selector") {
            return None;
        }
        let name = self.base.get_node_text(&node);
        if name.is_empty() {
            return None;
        }
        Some(ClassNameMeta {
            name,
            loc: self.base.span_of(&node),
        })
    }

    /// `@import "a.css";`, `@import 'a.css' screen;`, `@import url(a.css);`
    fn extract_import(&self, node: Node) -> Option<String> {
        let mut cursor = node.walk();
        let target = node
            .named_children(&mut cursor)
            .find(|child| matches!(child.kind(), "string_value" | "call_expression" | "plain_value"));

        let target = target?;
        let path = match target.kind() {
            "string_value" => unquote(self.base.node_str(&target)),
            "call_expression" => self.url_argument(target)?,
            _ => self.base.node_str(&target).trim().to_string(),
        };
        (!path.is_empty()).then_some(path)
    }

    fn url_argument(&self, call: Node) -> Option<String> {
        let function_name = self.base.find_child_by_type(&call, "function_name")?;
        if !self.base.node_str(&function_name).eq_ignore_ascii_case("url") {
            return None;
        }
        let arguments = self.base.find_child_by_type(&call, "arguments")?;
        let text = self.base.node_str(&arguments);
        let inner = text.trim().trim_start_matches('(').trim_end_matches(')').trim();
        Some(unquote(inner))
    }
}

fn unquote(text: &str) -> String {
    let text = text.trim();
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return text[1..text.len() - 1].to_string();
        }
    }
    text.to_string()
}
