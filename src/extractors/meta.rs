//! Metadata documents produced by the extractors
//!
//! Every value here is an immutable snapshot: it owns its strings and holds no
//! reference to the syntax tree or source text it came from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A source position: 1-based line, 0-based column counted in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Source range of a metadata node, copied from the originating syntax node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn from(start: [usize; 2], end: [usize; 2]) -> Self {
        Span {
            start: Position {
                line: start[0],
                column: start[1],
            },
            end: Position {
                line: end[0],
                column: end[1],
            },
        }
    }
}

/// Module kind, decided by which registration identifier is called
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Component,
    Page,
}

impl ComponentKind {
    /// Registration identifier for this kind
    pub fn identifier(&self) -> &'static str {
        match self {
            ComponentKind::Component => "Component",
            ComponentKind::Page => "Page",
        }
    }

    /// Configuration keys that mark an object literal as this kind's
    /// registration object when it is passed through a wrapper call
    pub fn signature_keys(&self) -> &'static [&'static str] {
        match self {
            ComponentKind::Component => &["properties", "data", "methods", "attached", "ready"],
            ComponentKind::Page => &["data", "onInit", "onLoad", "onReady", "onShow"],
        }
    }

    pub fn from_identifier(name: &str) -> Option<Self> {
        match name {
            "Component" => Some(ComponentKind::Component),
            "Page" => Some(ComponentKind::Page),
            _ => None,
        }
    }

    /// Kind guessed from a wrapper name such as `myComponent` or `basePage`
    pub fn from_suffix(name: &str) -> Option<Self> {
        if name.ends_with("Component") {
            Some(ComponentKind::Component)
        } else if name.ends_with("Page") {
            Some(ComponentKind::Page)
        } else {
            None
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl std::str::FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "component" => Ok(ComponentKind::Component),
            "page" => Ok(ComponentKind::Page),
            other => Err(format!("unknown module kind `{}`", other)),
        }
    }
}

/// A key of the `data` object; `children` mirrors nested object literals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataMeta {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<String>,
    pub loc: Span,
    /// `None` for non-object values, `Some(vec![])` for `{}`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub children: Option<Vec<DataMeta>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    Boolean,
    Number,
    String,
    Object,
}

impl PropertyType {
    /// Map a type-constructor identifier; unknown constructors are `Object`
    pub fn from_constructor(name: &str) -> Self {
        match name {
            "Boolean" => PropertyType::Boolean,
            "Number" => PropertyType::Number,
            "String" => PropertyType::String,
            _ => PropertyType::Object,
        }
    }
}

/// Literal default value echoed from a property descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl PropertyValue {
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Boolean(_) => PropertyType::Boolean,
            PropertyValue::Number(_) => PropertyType::Number,
            PropertyValue::String(_) => PropertyType::String,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<PropertyValue>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<String>,
    pub loc: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodMeta {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<String>,
    pub loc: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMeta {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<String>,
    pub loc: Span,
}

/// Metadata of one component/page module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentMeta {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub data: Vec<DataMeta>,
    pub properties: Vec<PropertyMeta>,
    pub methods: Vec<MethodMeta>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub events: Option<Vec<EventMeta>>,
}

impl ComponentMeta {
    /// Pages have no external property contract and emit no events
    pub fn page(data: Vec<DataMeta>, methods: Vec<MethodMeta>) -> Self {
        Self {
            kind: ComponentKind::Page,
            data,
            properties: Vec::new(),
            methods,
            events: None,
        }
    }

    pub fn component(
        data: Vec<DataMeta>,
        properties: Vec<PropertyMeta>,
        methods: Vec<MethodMeta>,
        events: Vec<EventMeta>,
    ) -> Self {
        Self {
            kind: ComponentKind::Component,
            data,
            properties,
            methods,
            events: Some(events),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassNameMeta {
    pub name: String,
    pub loc: Span,
}

/// Metadata of one stylesheet
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CssMeta {
    pub classes: Vec<ClassNameMeta>,
    pub imports: Vec<String>,
}
