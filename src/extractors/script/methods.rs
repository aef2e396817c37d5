// `methods` classification
//
// Components declare methods under a `methods` object. Pages declare their
// handlers directly on the configuration object, so every top-level function
// entry of a page is a method too.

use super::helpers::{entry_key, object_entries};
use crate::extractors::base::{accessor_kind, is_function_node, BaseExtractor};
use crate::extractors::meta::MethodMeta;
use tree_sitter::Node;

pub(super) fn extract_methods(base: &BaseExtractor, object: Node) -> Vec<MethodMeta> {
    object_entries(object)
        .into_iter()
        .filter_map(|entry| method_entry(base, entry))
        .collect()
}

pub(super) fn extract_page_methods(base: &BaseExtractor, config_object: Node) -> Vec<MethodMeta> {
    let mut result = Vec::new();

    for entry in object_entries(config_object) {
        let nested_methods = (entry.kind() == "pair")
            .then(|| entry.child_by_field_name("value"))
            .flatten()
            .filter(|value| value.kind() == "object")
            .filter(|_| {
                entry
                    .child_by_field_name("key")
                    .and_then(|key| base.property_key_name(&key))
                    .is_some_and(|name| name == "methods")
            });

        match nested_methods {
            Some(object) => result.extend(extract_methods(base, object)),
            None => result.extend(method_entry(base, entry)),
        }
    }

    result
}

/// A function-valued entry: `m: function () {}`, `m: () => {}`, `m() {}`,
/// and their async/generator variants. Accessors and plain values are skipped.
fn method_entry(base: &BaseExtractor, entry: Node) -> Option<MethodMeta> {
    let is_method = match entry.kind() {
        "pair" => entry
            .child_by_field_name("value")
            .is_some_and(|value| is_function_node(&value)),
        "method_definition" => accessor_kind(&entry).is_none(),
        _ => false,
    };
    if !is_method {
        return None;
    }

    let key = entry_key(&entry)?;
    let name = base.property_key_name(&key)?;

    Some(MethodMeta {
        name,
        comment: base.find_leading_comment(&entry),
        loc: base.span_of(&key),
    })
}
