// Registration-call recognition
//
// Only top-level expression statements are considered. Exact `Component(...)`
// / `Page(...)` calls win over wrapper-named calls (`myPage({...})`) anywhere
// in the module; within each tier the first call in source order is used.

use super::helpers::{callee_identifier, first_argument, object_entries, entry_key};
use crate::error::{MetaError, Result};
use crate::extractors::base::BaseExtractor;
use crate::extractors::meta::ComponentKind;
use tree_sitter::Node;

/// A recognised registration call
#[derive(Debug, Clone, Copy)]
pub struct Registration<'t> {
    pub kind: ComponentKind,
    /// The configuration object literal; `None` when the argument could not be
    /// traced to an object literal
    pub config: Option<Node<'t>>,
}

pub(super) fn find_registration<'t>(
    base: &BaseExtractor,
    root: Node<'t>,
    hint: Option<ComponentKind>,
    guess_wrappers: bool,
) -> Result<Option<Registration<'t>>> {
    let calls = top_level_calls(root);

    let exact: Vec<(ComponentKind, Node<'t>)> = calls
        .iter()
        .filter_map(|call| {
            let kind = ComponentKind::from_identifier(callee_identifier(base, call)?)?;
            first_argument(call).map(|_| (kind, *call))
        })
        .collect();

    if hint.is_none() {
        let has_component = exact.iter().any(|(kind, _)| *kind == ComponentKind::Component);
        let has_page = exact.iter().any(|(kind, _)| *kind == ComponentKind::Page);
        if has_component && has_page {
            return Err(MetaError::AmbiguousModuleKind {
                path: base.file_path.clone(),
            });
        }
    }

    let matches_hint = |kind: ComponentKind| hint.is_none_or(|wanted| wanted == kind);

    if let Some((kind, call)) = exact.into_iter().find(|(kind, _)| matches_hint(*kind)) {
        let config = first_argument(&call).and_then(|argument| match argument.kind() {
            "object" => Some(argument),
            _ if guess_wrappers => guess_component_params(base, kind, argument),
            _ => None,
        });
        return Ok(Some(Registration { kind, config }));
    }

    if !guess_wrappers {
        return Ok(None);
    }

    // myComponent({...}) / basePage({...})
    for call in &calls {
        let Some(name) = callee_identifier(base, call) else {
            continue;
        };
        let Some(kind) = ComponentKind::from_suffix(name) else {
            continue;
        };
        if !matches_hint(kind) {
            continue;
        }
        let Some(argument) = first_argument(call) else {
            continue;
        };
        if argument.kind() == "object" && count_signature_keys(base, argument, kind) >= 2 {
            return Ok(Some(Registration {
                kind,
                config: Some(argument),
            }));
        }
    }

    Ok(None)
}

/// Call expressions that form a whole top-level statement
fn top_level_calls<'t>(root: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = root.walk();
    let calls = root
        .named_children(&mut cursor)
        .filter(|statement| statement.kind() == "expression_statement")
        .filter_map(|statement| statement.named_child(0))
        .filter(|expression| expression.kind() == "call_expression")
        .collect();
    calls
}

/// Trace `Page(wrap({...}))`, `Page(a.b({...}))` and nested wrappers down to
/// the object literal. The object is accepted only if it carries at least two
/// of the kind's signature keys.
fn guess_component_params<'t>(base: &BaseExtractor, kind: ComponentKind, expression: Node<'t>) -> Option<Node<'t>> {
    if expression.kind() != "call_expression" {
        return None;
    }
    let argument = first_argument(&expression)?;
    if argument.kind() == "object" {
        return (count_signature_keys(base, argument, kind) >= 2).then_some(argument);
    }
    guess_component_params(base, kind, argument)
}

fn count_signature_keys(base: &BaseExtractor, object: Node, kind: ComponentKind) -> usize {
    let keys = kind.signature_keys();
    object_entries(object)
        .iter()
        .filter(|entry| matches!(entry.kind(), "pair" | "method_definition"))
        .filter_map(|entry| entry_key(entry))
        .filter(|key| key.kind() == "property_identifier")
        .filter(|key| keys.contains(&base.node_str(key)))
        .count()
}
