//! Script Metadata Extractor
//!
//! Finds the `Component({...})` / `Page({...})` registration call of a module
//! and classifies its configuration object:
//! - `data` -> recursive [`DataMeta`] tree
//! - `properties` -> typed [`PropertyMeta`] list (components only)
//! - `methods` -> [`MethodMeta`] list
//! - `this.triggerEvent(...)` calls -> [`EventMeta`] list (components only)
//!
//! The mandatory passes (`data`, `properties`, `methods`) never depend on the
//! events pass, which is a best-effort enrichment over the same object.

mod data;
mod events;
mod helpers;
mod methods;
mod properties;
mod registration;

use crate::config::MetaConfig;
use crate::error::{MetaError, Result};
use crate::extractors::base::BaseExtractor;
use crate::extractors::meta::{ComponentKind, ComponentMeta, DataMeta};
use crate::language::first_error_node;
use tracing::debug;
use tree_sitter::{Node, Tree};

pub use registration::Registration;

pub struct ScriptExtractor<'c> {
    base: BaseExtractor,
    config: &'c MetaConfig,
}

impl<'c> ScriptExtractor<'c> {
    pub fn new(file_path: String, content: String, config: &'c MetaConfig) -> Self {
        Self {
            base: BaseExtractor::new(file_path, content),
            config,
        }
    }

    /// Extract component metadata.
    ///
    /// `Ok(None)` means valid syntax without a usable registration call;
    /// malformed source is `MetaError::Syntax`.
    pub fn extract(&self, tree: &Tree, hint: Option<ComponentKind>) -> Result<Option<ComponentMeta>> {
        let root = tree.root_node();
        if let Some(error) = first_error_node(root) {
            let span = self.base.span_of(&error);
            return Err(MetaError::Syntax {
                path: self.base.file_path.clone(),
                line: span.start.line,
                column: span.start.column,
            });
        }

        let Some(registration) = self.find_registration(root, hint)? else {
            debug!("No registration call found in {}", self.base.file_path);
            return Ok(None);
        };

        let Some(config_object) = registration.config else {
            debug!(
                "{} registration in {} has no recognizable configuration object",
                registration.kind, self.base.file_path
            );
            return Ok(None);
        };

        let data = self.extract_data_section(config_object);

        let meta = match registration.kind {
            ComponentKind::Page => {
                let methods = methods::extract_page_methods(&self.base, config_object);
                ComponentMeta::page(data, methods)
            }
            ComponentKind::Component => {
                let properties = helpers::find_object_property(&self.base, config_object, "properties")
                    .map(|object| properties::extract_properties(&self.base, object))
                    .unwrap_or_default();
                let methods = helpers::find_object_property(&self.base, config_object, "methods")
                    .map(|object| methods::extract_methods(&self.base, object))
                    .unwrap_or_default();
                let events = events::extract_events(&self.base, config_object, &self.config.event_trigger);
                ComponentMeta::component(data, properties, methods, events)
            }
        };

        debug!(
            "Extracted {} metadata from {}: {} data, {} properties, {} methods",
            meta.kind,
            self.base.file_path,
            meta.data.len(),
            meta.properties.len(),
            meta.methods.len()
        );
        Ok(Some(meta))
    }

    /// Locate the registration call without classifying it
    pub fn find_registration<'t>(
        &self,
        root: Node<'t>,
        hint: Option<ComponentKind>,
    ) -> Result<Option<Registration<'t>>> {
        registration::find_registration(&self.base, root, hint, self.config.guess_wrappers)
    }

    fn extract_data_section(&self, config_object: Node) -> Vec<DataMeta> {
        helpers::find_object_property(&self.base, config_object, "data")
            .map(|object| data::extract_data(&self.base, object, 0, self.config.max_data_depth))
            .unwrap_or_default()
    }
}
