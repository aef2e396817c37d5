// Base extractor shared by the script and style extractors
//
// Owns the source text of one file and provides the node helpers both
// pipelines need: text slices, character-accurate spans, leading comments and
// literal decoding.

use crate::extractors::meta::{Position, PropertyValue, Span};
use tree_sitter::{Node, Point};

pub struct BaseExtractor {
    pub file_path: String,
    pub content: String,
}

impl BaseExtractor {
    pub fn new(file_path: String, content: String) -> Self {
        Self { file_path, content }
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        self.node_str(node).to_string()
    }

    /// Borrowed node text; empty when the node range is not valid UTF-8 boundaries
    pub fn node_str(&self, node: &Node) -> &str {
        self.content
            .get(node.start_byte()..node.end_byte())
            .unwrap_or("")
    }

    /// Span of a node with 1-based lines and character (not byte) columns
    pub fn span_of(&self, node: &Node) -> Span {
        Span {
            start: self.position(node.start_position(), node.start_byte()),
            end: self.position(node.end_position(), node.end_byte()),
        }
    }

    fn position(&self, point: Point, byte: usize) -> Position {
        let line_start = byte.saturating_sub(point.column);
        let column = self
            .content
            .get(line_start..byte)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(point.column);

        Position {
            line: point.row + 1,
            column,
        }
    }

    /// Leading comment of a node, verbatim with its delimiters.
    ///
    /// The node is widened to the outermost ancestor starting at the same byte
    /// (key -> pair, callee -> call -> statement), then the contiguous run of
    /// comment siblings before it is inspected. The first comment of the run
    /// wins; a comment sharing a line with the preceding token trails that
    /// token and is ignored.
    pub fn find_leading_comment(&self, node: &Node) -> Option<String> {
        let mut anchor = *node;
        while let Some(parent) = anchor.parent() {
            if parent.start_byte() != anchor.start_byte() || parent.kind() == "program" {
                break;
            }
            anchor = parent;
        }

        let mut run: Vec<Node> = Vec::new();
        let mut boundary_row = None;
        let mut sibling = anchor.prev_sibling();
        while let Some(prev) = sibling {
            if prev.kind() != "comment" {
                boundary_row = Some(prev.end_position().row);
                break;
            }
            run.push(prev);
            sibling = prev.prev_sibling();
        }

        // run is in reverse document order
        run.iter()
            .rev()
            .find(|comment| Some(comment.start_position().row) != boundary_row)
            .map(|comment| self.get_node_text(comment))
    }

    /// Find first child by type
    pub fn find_child_by_type<'a>(&self, node: &Node<'a>, child_type: &str) -> Option<Node<'a>> {
        let mut cursor = node.walk();
        let found = node.children(&mut cursor).find(|child| child.kind() == child_type);
        found
    }

    /// Name of an object key: identifier, string or number. Other key forms
    /// (computed, private) yield `None`.
    pub fn property_key_name(&self, key: &Node) -> Option<String> {
        match key.kind() {
            "property_identifier" | "shorthand_property_identifier" | "identifier" => {
                Some(self.get_node_text(key))
            }
            "string" => self.string_literal_value(key),
            "number" => parse_js_number(self.node_str(key)).map(format_js_number),
            _ => None,
        }
    }

    /// Decoded value of a `string` or substitution-free `template_string` node
    pub fn string_literal_value(&self, node: &Node) -> Option<String> {
        match node.kind() {
            "string" | "template_string" => {}
            _ => return None,
        }

        let mut value = String::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "string_fragment" => value.push_str(self.node_str(&child)),
                "escape_sequence" => value.push_str(&decode_escape(self.node_str(&child))),
                "template_substitution" => return None,
                _ => {}
            }
        }
        Some(value)
    }

    /// Boolean, number or string literal value of an expression.
    /// Signed numbers (`-1`, `+2`) count as number literals.
    pub fn literal_value(&self, node: &Node) -> Option<PropertyValue> {
        match node.kind() {
            "true" => Some(PropertyValue::Boolean(true)),
            "false" => Some(PropertyValue::Boolean(false)),
            "number" => parse_js_number(self.node_str(node)).map(PropertyValue::Number),
            "string" | "template_string" => self.string_literal_value(node).map(PropertyValue::String),
            "parenthesized_expression" => node
                .named_child(0)
                .and_then(|inner| self.literal_value(&inner)),
            "unary_expression" => {
                let operator = node.child_by_field_name("operator")?;
                let argument = node.child_by_field_name("argument")?;
                if argument.kind() != "number" {
                    return None;
                }
                let number = parse_js_number(self.node_str(&argument))?;
                match self.node_str(&operator) {
                    "-" => Some(PropertyValue::Number(-number)),
                    "+" => Some(PropertyValue::Number(number)),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Function-valued expression kinds (async variants share these kinds)
pub fn is_function_node(node: &Node) -> bool {
    matches!(
        node.kind(),
        "function_expression" | "function" | "arrow_function" | "generator_function"
    )
}

/// `get x() {}` / `set x(v) {}` accessor, as opposed to method shorthand
pub fn accessor_kind(node: &Node) -> Option<&'static str> {
    if node.kind() != "method_definition" {
        return None;
    }
    let mut cursor = node.walk();
    let kind = node.children(&mut cursor).find_map(|child| match child.kind() {
        "get" => Some("get"),
        "set" => Some("set"),
        _ => None,
    });
    kind
}

/// Parse a JS numeric literal (decimal, hex, octal, binary, legacy octal,
/// separators, BigInt suffix). Radix literals of any width are accepted.
pub fn parse_js_number(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().trim_end_matches('n').chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();

    if let Some(digits) = lower.strip_prefix("0x") {
        radix_value(digits, 16)
    } else if let Some(digits) = lower.strip_prefix("0o") {
        radix_value(digits, 8)
    } else if let Some(digits) = lower.strip_prefix("0b") {
        radix_value(digits, 2)
    } else if is_legacy_octal(&lower) {
        radix_value(&lower[1..], 8)
    } else {
        lower.parse::<f64>().ok()
    }
}

fn radix_value(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |value, c| {
        c.to_digit(radix).map(|digit| value * radix as f64 + digit as f64)
    })
}

/// `010` is octal; `089` and `0.5` are not
fn is_legacy_octal(text: &str) -> bool {
    text.len() > 1 && text.starts_with('0') && text.chars().all(|c| ('0'..='7').contains(&c))
}

/// Render a number the way a JS engine prints it (`Number.prototype.toString`)
pub fn format_js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        // shortest round-trip mantissa, JS exponent sign convention
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{}e+{}", mantissa, exponent),
            _ => formatted,
        };
    }

    if value.fract() == 0.0 {
        format!("{}", value as i128)
    } else {
        value.to_string()
    }
}

fn decode_escape(sequence: &str) -> String {
    let body = match sequence.strip_prefix('\\') {
        Some(body) => body,
        None => return sequence.to_string(),
    };

    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest: String = chars.collect();

    match first {
        'n' => "\n".to_string(),
        't' => "\t".to_string(),
        'r' => "\r".to_string(),
        'b' => "\u{8}".to_string(),
        'f' => "\u{c}".to_string(),
        'v' => "\u{b}".to_string(),
        '0' if rest.is_empty() => "\0".to_string(),
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => String::new(),
        'x' | 'u' => {
            let hex = rest.trim_start_matches('{').trim_end_matches('}');
            u32::from_str_radix(hex, 16)
                .ok()
                .and_then(char::from_u32)
                .map(|c| c.to_string())
                .unwrap_or_else(|| sequence.to_string())
        }
        other => format!("{}{}", other, rest),
    }
}
