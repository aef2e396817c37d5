// Object-literal helpers shared by the script passes

use crate::extractors::base::BaseExtractor;
use tree_sitter::Node;

/// Entries of an object literal in source order (comments dropped)
pub(super) fn object_entries<'a>(object: Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = object.walk();
    let entries = object
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    entries
}

/// Key node of an entry: `pair` key, `method_definition` name, or the
/// shorthand identifier itself
pub(super) fn entry_key<'a>(entry: &Node<'a>) -> Option<Node<'a>> {
    match entry.kind() {
        "pair" => entry.child_by_field_name("key"),
        "method_definition" => entry.child_by_field_name("name"),
        "shorthand_property_identifier" => Some(*entry),
        _ => None,
    }
}

/// Value expression of the `pair` named `name`
pub(super) fn find_pair_value<'a>(base: &BaseExtractor, object: Node<'a>, name: &str) -> Option<Node<'a>> {
    object_entries(object)
        .into_iter()
        .filter(|entry| entry.kind() == "pair")
        .find(|entry| {
            entry
                .child_by_field_name("key")
                .and_then(|key| base.property_key_name(&key))
                .is_some_and(|key| key == name)
        })
        .and_then(|entry| entry.child_by_field_name("value"))
}

/// Value of `name` when it is an object literal
pub(super) fn find_object_property<'a>(base: &BaseExtractor, object: Node<'a>, name: &str) -> Option<Node<'a>> {
    find_pair_value(base, object, name).filter(|value| value.kind() == "object")
}

/// First argument expression of a call
pub(super) fn first_argument<'a>(call: &Node<'a>) -> Option<Node<'a>> {
    let arguments = call.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();
    let first = arguments
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    first
}

/// Identifier name of a call's callee, if the callee is a bare identifier
pub(super) fn callee_identifier<'a>(base: &'a BaseExtractor, call: &Node) -> Option<&'a str> {
    let callee = call.child_by_field_name("function")?;
    (callee.kind() == "identifier").then(|| base.node_str(&callee))
}
