// mpmeta Metadata Extractors
//
// Tree-sitter based extractors for mini-program sources. The script extractor
// classifies `Component`/`Page` registration calls, the CSS extractor collects
// class selectors and imports from stylesheets.

pub mod base;
pub mod css;
pub mod manager;
pub mod meta;
pub mod script;

pub use base::BaseExtractor;
pub use css::CSSExtractor;
pub use manager::ExtractorManager;
pub use meta::{
    ClassNameMeta, ComponentKind, ComponentMeta, CssMeta, DataMeta, EventMeta, MethodMeta, Position,
    PropertyMeta, PropertyType, PropertyValue, Span,
};
pub use script::ScriptExtractor;
