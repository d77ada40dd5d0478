//! Content-type identifiers.
//!
//! Callers may name a content type either by its slug or by handing over a
//! resolved [`ContentType`]. Both collapse into a [`ContentTypeSlug`] before
//! any lookup happens.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::ChangeLogError;
use crate::validation::rules::validate_sql_identifier;

/// Canonical content-type slug: trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ContentTypeSlug(String);

impl ContentTypeSlug {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContentTypeSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentTypeSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentTypeSlug {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ContentTypeSlug {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for ContentTypeSlug {
    fn from(s: &String) -> Self {
        Self::new(s)
    }
}

impl From<&ContentTypeSlug> for ContentTypeSlug {
    fn from(slug: &ContentTypeSlug) -> Self {
        slug.clone()
    }
}

impl From<&ContentType> for ContentTypeSlug {
    fn from(content_type: &ContentType) -> Self {
        content_type.slug.clone()
    }
}

impl From<ContentType> for ContentTypeSlug {
    fn from(content_type: ContentType) -> Self {
        content_type.slug
    }
}

impl<'de> Deserialize<'de> for ContentTypeSlug {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(s))
    }
}

/// A content type together with the table its records live in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentType {
    pub slug: ContentTypeSlug,
    pub table_name: String,
}

impl ContentType {
    /// Builds a content type, rejecting table names that are not plain SQL
    /// identifiers. Table names are spliced into queries, never bound.
    pub fn new(
        slug: impl Into<ContentTypeSlug>,
        table_name: impl Into<String>,
    ) -> Result<Self, ChangeLogError> {
        let slug = slug.into();
        if slug.is_empty() {
            return Err(ChangeLogError::Configuration(
                "content type slug must not be empty".into(),
            ));
        }
        let table_name = table_name.into();
        validate_sql_identifier(&table_name).map_err(|err| {
            ChangeLogError::Configuration(format!(
                "table `{}` for content type `{}`: {}",
                table_name, slug, err.code
            ))
        })?;
        Ok(Self { slug, table_name })
    }
}
