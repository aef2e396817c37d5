//! ExtractorManager - text-level entry point for metadata extraction
//!
//! Owns the [`MetaConfig`] for its lifetime, parses source text with the right
//! grammar and delegates to the script or CSS extractor. Batch extraction and
//! the public API both go through a manager; no extractor reads global state.

use crate::config::MetaConfig;
use crate::error::{MetaError, Result};
use crate::extractors::css::CSSExtractor;
use crate::extractors::meta::{ComponentKind, ComponentMeta, CssMeta};
use crate::extractors::script::ScriptExtractor;
use crate::language::{parse_source, Grammar};
use std::fs;
use std::path::Path;

/// Manager for the script and style extractors
#[derive(Debug, Clone, Default)]
pub struct ExtractorManager {
    config: MetaConfig,
}

impl ExtractorManager {
    pub fn new(config: MetaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MetaConfig {
        &self.config
    }

    /// Extract component metadata from module source text.
    ///
    /// `hint` restricts recognition to one registration kind; without it the
    /// kind is whatever the module actually calls.
    pub fn extract_script(
        &self,
        file_path: &str,
        content: &str,
        hint: Option<ComponentKind>,
    ) -> Result<Option<ComponentMeta>> {
        let tree = parse_source(Grammar::Script, content)?;
        let extractor = ScriptExtractor::new(file_path.to_string(), content.to_string(), &self.config);
        let meta = extractor.extract(&tree, hint)?;

        tracing::debug!(
            "Script extraction for {}: {}",
            file_path,
            match &meta {
                Some(meta) => meta.kind.identifier(),
                None => "no registration",
            }
        );
        Ok(meta)
    }

    /// Extract class selectors and imports from stylesheet source text
    pub fn extract_css(&self, file_path: &str, content: &str) -> Result<CssMeta> {
        let tree = parse_source(Grammar::Style, content)?;
        let extractor = CSSExtractor::new(file_path.to_string(), content.to_string(), &self.config);
        extractor.extract(&tree)
    }

    /// Read a source file, keeping "absent" distinguishable from other I/O failures
    pub fn read_source(path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| MetaError::from_io(path, e))
    }

    pub fn parse_script_file(&self, path: &Path, hint: Option<ComponentKind>) -> Result<Option<ComponentMeta>> {
        let content = Self::read_source(path)?;
        self.extract_script(&path.to_string_lossy(), &content, hint)
    }

    pub fn parse_css_file(&self, path: &Path) -> Result<CssMeta> {
        let content = Self::read_source(path)?;
        self.extract_css(&path.to_string_lossy(), &content)
    }
}
