// `data` classification: one DataMeta per key, recursing into object literals

use super::helpers::{entry_key, object_entries};
use crate::extractors::base::{accessor_kind, BaseExtractor};
use crate::extractors::meta::DataMeta;
use tracing::warn;
use tree_sitter::Node;

pub(super) fn extract_data(base: &BaseExtractor, object: Node, depth: usize, max_depth: usize) -> Vec<DataMeta> {
    let mut result = Vec::new();

    for entry in object_entries(object) {
        let value = match entry.kind() {
            "pair" => entry.child_by_field_name("value"),
            "shorthand_property_identifier" => None,
            // getters are leaves; the accessor body is never evaluated
            "method_definition" if accessor_kind(&entry) == Some("get") => None,
            _ => continue,
        };

        let Some(key) = entry_key(&entry) else {
            continue;
        };
        let Some(name) = base.property_key_name(&key) else {
            continue;
        };

        let children = match value {
            Some(value) if value.kind() == "object" => {
                if depth + 1 >= max_depth {
                    warn!(
                        "data nesting deeper than {} levels in {}, truncating at `{}`",
                        max_depth, base.file_path, name
                    );
                    None
                } else {
                    Some(extract_data(base, value, depth + 1, max_depth))
                }
            }
            _ => None,
        };

        result.push(DataMeta {
            name,
            comment: base.find_leading_comment(&entry),
            loc: base.span_of(&key),
            children,
        });
    }

    result
}
