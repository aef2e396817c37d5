// mpmeta - Mini-Program Metadata Extraction Library
//!
//! Extracts typed, source-located metadata from mini-program sources using
//! tree-sitter: `data`/`properties`/`methods`/`events` from `Component(...)`
//! and `Page(...)` registrations, class selectors and imports from stylesheets.

pub mod api;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractors;
pub mod language; // Shared language support (tree-sitter configuration)

#[cfg(test)]
pub mod tests;

// Re-export common types
pub use api::{
    parse_css, parse_css_files, parse_script, parse_script_files, parse_script_with_kind, paths_from_json,
};
pub use batch::{BatchConfig, CancellationToken, ParallelExtractor};
pub use config::MetaConfig;
pub use error::{MetaError, Result};
pub use extractors::{
    ClassNameMeta, ComponentKind, ComponentMeta, CssMeta, DataMeta, EventMeta, ExtractorManager, MethodMeta,
    Position, PropertyMeta, PropertyType, PropertyValue, Span,
};
