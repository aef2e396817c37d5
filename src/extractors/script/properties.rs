// `properties` classification
//
// Type resolution order:
// 1. descriptor object with a `type` field -> constructor identifier mapping
// 2. descriptor object without `type` -> literal shape of its `value` field
// 3. shorthand (non-object) value -> constructor identifier or literal shape
// Anything unrecognised is `Object`.

use super::helpers::{entry_key, find_pair_value, object_entries};
use crate::extractors::base::BaseExtractor;
use crate::extractors::meta::{PropertyMeta, PropertyType, PropertyValue};
use tree_sitter::Node;

pub(super) fn extract_properties(base: &BaseExtractor, object: Node) -> Vec<PropertyMeta> {
    let mut result = Vec::new();

    for entry in object_entries(object) {
        let (property_type, value) = match entry.kind() {
            "pair" => match entry.child_by_field_name("value") {
                Some(value) if value.kind() == "object" => classify_descriptor(base, value),
                Some(value) => classify_shorthand(base, value),
                None => (PropertyType::Object, None),
            },
            "method_definition" | "shorthand_property_identifier" => (PropertyType::Object, None),
            _ => continue,
        };

        let Some(key) = entry_key(&entry) else {
            continue;
        };
        let Some(name) = base.property_key_name(&key) else {
            continue;
        };

        result.push(PropertyMeta {
            name,
            property_type,
            value,
            comment: base.find_leading_comment(&entry),
            loc: base.span_of(&key),
        });
    }

    result
}

fn classify_descriptor(base: &BaseExtractor, descriptor: Node) -> (PropertyType, Option<PropertyValue>) {
    let value = find_pair_value(base, descriptor, "value");
    let echo = value.and_then(|value| base.literal_value(&value));

    let property_type = match find_pair_value(base, descriptor, "type") {
        Some(type_node) if type_node.kind() == "identifier" => {
            PropertyType::from_constructor(base.node_str(&type_node))
        }
        Some(_) => PropertyType::Object,
        None => literal_shape(echo.as_ref()),
    };

    (property_type, echo)
}

fn classify_shorthand(base: &BaseExtractor, value: Node) -> (PropertyType, Option<PropertyValue>) {
    if value.kind() == "identifier" {
        return (PropertyType::from_constructor(base.node_str(&value)), None);
    }
    let echo = base.literal_value(&value);
    (literal_shape(echo.as_ref()), echo)
}

fn literal_shape(value: Option<&PropertyValue>) -> PropertyType {
    value
        .map(PropertyValue::property_type)
        .unwrap_or(PropertyType::Object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{parse_source, Grammar};

    fn extract(code: &str) -> Vec<PropertyMeta> {
        let tree = parse_source(Grammar::Script, code).unwrap();
        let base = BaseExtractor::new("test.js".to_string(), code.to_string());
        let object = tree
            .root_node()
            .named_child(0)
            .and_then(|s| s.named_child(0))
            .and_then(|p| p.named_child(0))
            .unwrap();
        extract_properties(&base, object)
    }

    #[test]
    fn test_descriptor_types() {
        let props = extract(
            r#"({
                a: { type: Boolean, value: true },
                b: { type: Number, value: 1 },
                c: { type: String, value: 'x' },
                d: { type: Object, value: {} },
                e: { type: Array, value: [] },
                f: { type: Function, value: () => {} },
                g: { type: null },
            })"#,
        );
        let types: Vec<PropertyType> = props.iter().map(|p| p.property_type).collect();
        assert_eq!(
            types,
            vec![
                PropertyType::Boolean,
                PropertyType::Number,
                PropertyType::String,
                PropertyType::Object,
                PropertyType::Object,
                PropertyType::Object,
                PropertyType::Object,
            ]
        );
        assert_eq!(props[0].value, Some(PropertyValue::Boolean(true)));
        assert_eq!(props[1].value, Some(PropertyValue::Number(1.0)));
        assert_eq!(props[2].value, Some(PropertyValue::String("x".to_string())));
        assert!(props[3..].iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn test_descriptor_without_type_uses_value_shape() {
        let props = extract("({ a: { value: 3 }, b: { value: 'x' }, c: { observer() {} } })");
        assert_eq!(props[0].property_type, PropertyType::Number);
        assert_eq!(props[1].property_type, PropertyType::String);
        assert_eq!(props[2].property_type, PropertyType::Object);
        assert!(props[2].value.is_none());
    }

    #[test]
    fn test_shorthand_declarations() {
        let props = extract("({ a: String, b: () => {}, c: false, d: [1], e() {}, f })");
        let summary: Vec<(&str, PropertyType)> =
            props.iter().map(|p| (p.name.as_str(), p.property_type)).collect();
        assert_eq!(
            summary,
            vec![
                ("a", PropertyType::String),
                ("b", PropertyType::Object),
                ("c", PropertyType::Boolean),
                ("d", PropertyType::Object),
                ("e", PropertyType::Object),
                ("f", PropertyType::Object),
            ]
        );
        assert_eq!(props[2].value, Some(PropertyValue::Boolean(false)));
        assert!(props[0].value.is_none());
    }

    #[test]
    fn test_every_key_once_in_order() {
        let props = extract("({ z: {type: String}, 'y-y': {type: Number}, 3: {}, [dyn]: {}, ...rest })");
        let names: Vec<&str> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["z", "y-y", "3"]);
    }
}
