//! Content-type resolution.
//!
//! The change log stores a content-type slug per row; the title snapshot and
//! ordered lookups need the table behind that slug. The authoritative list of
//! content types lives outside this crate, so resolution goes through the
//! [`ContentTypeRegistry`] seam.

use std::collections::BTreeMap;

use crate::config::Config;
use crate::error::ChangeLogError;
use crate::types::{ContentType, ContentTypeSlug};

/// Resolves content-type slugs to their storage tables.
///
/// Use `MockContentTypeRegistry` in tests to control resolution.
#[cfg_attr(test, mockall::automock)]
pub trait ContentTypeRegistry: Send + Sync {
    /// Returns the content type registered under `slug`, if any.
    fn resolve(&self, slug: &ContentTypeSlug) -> Option<ContentType>;
}

/// Fixed registry built once from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticContentTypeRegistry {
    content_types: BTreeMap<ContentTypeSlug, ContentType>,
}

impl StaticContentTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every slug in `Config::content_types` under the configured
    /// table prefix.
    pub fn from_config(config: &Config) -> Result<Self, ChangeLogError> {
        config
            .content_types
            .iter()
            .try_fold(Self::new(), |registry, slug| {
                let content_type = ContentType::new(slug, config.content_table_for(slug))?;
                Ok(registry.with(content_type))
            })
    }

    pub fn with(mut self, content_type: ContentType) -> Self {
        self.register(content_type);
        self
    }

    /// Adds or replaces a content type.
    pub fn register(&mut self, content_type: ContentType) {
        self.content_types
            .insert(content_type.slug.clone(), content_type);
    }

    pub fn slugs(&self) -> impl Iterator<Item = &ContentTypeSlug> {
        self.content_types.keys()
    }

    pub fn len(&self) -> usize {
        self.content_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content_types.is_empty()
    }
}

impl ContentTypeRegistry for StaticContentTypeRegistry {
    fn resolve(&self, slug: &ContentTypeSlug) -> Option<ContentType> {
        self.content_types.get(slug).cloned()
    }
}
