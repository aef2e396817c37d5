//! Public entry points
//!
//! Thin wrappers over [`ExtractorManager`] and [`ParallelExtractor`] with the
//! default configuration. Callers that need a custom [`crate::MetaConfig`]
//! build those two types directly.

use crate::batch::{BatchConfig, ParallelExtractor};
use crate::error::{MetaError, Result};
use crate::extractors::meta::{ComponentKind, ComponentMeta, CssMeta};
use crate::extractors::ExtractorManager;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Extract component metadata from one module.
///
/// `Ok(None)` when the module parses but has no registration call.
pub fn parse_script(path: impl AsRef<Path>) -> Result<Option<ComponentMeta>> {
    parse_script_with_kind(path, None)
}

/// Like [`parse_script`], only recognising registrations of `kind` when given
pub fn parse_script_with_kind(path: impl AsRef<Path>, kind: Option<ComponentKind>) -> Result<Option<ComponentMeta>> {
    ExtractorManager::default().parse_script_file(path.as_ref(), kind)
}

/// Extract every script in parallel; failed files are omitted
pub fn parse_script_files<S: AsRef<str>>(paths: &[S]) -> BTreeMap<String, ComponentMeta> {
    default_extractor().extract_scripts(&owned_paths(paths))
}

pub fn parse_css(path: impl AsRef<Path>) -> Result<CssMeta> {
    ExtractorManager::default().parse_css_file(path.as_ref())
}

/// Extract every stylesheet plus its transitive imports; failed files are omitted
pub fn parse_css_files<S: AsRef<str>>(paths: &[S]) -> BTreeMap<String, CssMeta> {
    default_extractor().extract_stylesheets(&owned_paths(paths))
}

/// Validate an untyped path list (a JSON array of strings)
pub fn paths_from_json(value: &Value) -> Result<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(MetaError::Usage(format!(
            "expected an array of file paths, got {}",
            json_type_name(value)
        )));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(path) => Ok(path.clone()),
            other => Err(MetaError::Usage(format!(
                "path list element {} is {}, expected a string",
                index,
                json_type_name(other)
            ))),
        })
        .collect()
}

fn default_extractor() -> ParallelExtractor {
    ParallelExtractor::new(ExtractorManager::default(), BatchConfig::default())
}

fn owned_paths<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    paths.iter().map(|p| p.as_ref().to_string()).collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
