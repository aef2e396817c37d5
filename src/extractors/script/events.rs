// Best-effort event scan over the configuration object
//
// Collects `this.<trigger>('name', ...)` calls in document order. Only string
// literal names are classified and the first occurrence of a name wins.

use super::helpers::first_argument;
use crate::extractors::base::BaseExtractor;
use crate::extractors::meta::EventMeta;
use std::collections::HashSet;
use tree_sitter::Node;

pub(super) fn extract_events(base: &BaseExtractor, config_object: Node, trigger: &str) -> Vec<EventMeta> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut events = Vec::new();

    let mut cursor = config_object.walk();
    let mut visited_children = false;
    loop {
        let node = cursor.node();
        if !visited_children && node.kind() == "call_expression" {
            if let Some(event) = trigger_event(base, node, trigger) {
                if seen.insert(event.name.clone()) {
                    events.push(event);
                }
            }
        }

        if !visited_children && cursor.goto_first_child() {
            continue;
        }
        if cursor.goto_next_sibling() {
            visited_children = false;
            continue;
        }
        if !cursor.goto_parent() || cursor.node() == config_object {
            break;
        }
        visited_children = true;
    }

    events
}

fn trigger_event(base: &BaseExtractor, call: Node, trigger: &str) -> Option<EventMeta> {
    let callee = call.child_by_field_name("function")?;
    if callee.kind() != "member_expression" {
        return None;
    }
    let object = callee.child_by_field_name("object")?;
    let property = callee.child_by_field_name("property")?;
    if object.kind() != "this" || base.node_str(&property) != trigger {
        return None;
    }

    let name_node = first_argument(&call)?;
    let name = base.string_literal_value(&name_node)?;

    Some(EventMeta {
        name,
        comment: base.find_leading_comment(&callee),
        loc: base.span_of(&callee),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{parse_source, Grammar};

    #[test]
    fn test_distinct_literal_events_in_order() {
        let code = r#"({
            methods: {
                a() {
                    // first
                    this.triggerEvent('change', 1);
                    this.triggerEvent(name);
                },
                b: function () {
                    this.triggerEvent(
                        "submit", {});
                    this.triggerEvent('change');
                    other.triggerEvent('ignored');
                },
            },
        })"#;
        let tree = parse_source(Grammar::Script, code).unwrap();
        let base = BaseExtractor::new("test.js".to_string(), code.to_string());
        let object = tree
            .root_node()
            .named_child(0)
            .and_then(|s| s.named_child(0))
            .and_then(|p| p.named_child(0))
            .unwrap();

        let events = extract_events(&base, object, "triggerEvent");
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["change", "submit"]);
        assert_eq!(events[0].comment.as_deref(), Some("// first"));
        assert!(events[1].comment.is_none());
        // span covers `this.triggerEvent`
        assert_eq!(events[0].loc.end.column - events[0].loc.start.column, 17);
    }
}
