use thiserror::Error;

use crate::types::ContentType;

/// Postgres SQLSTATE for `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";

#[derive(Debug, Error)]
pub enum ChangeLogError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unknown content type: {0}")]
    UnknownContentType(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl ChangeLogError {
    /// Wraps a store failure raised while querying `content_type`.
    ///
    /// Only a missing content table is reported as an unknown content type.
    /// Anything else, including a missing change-log table, stays a store
    /// error.
    pub fn from_store(err: sqlx::Error, content_type: Option<&ContentType>) -> Self {
        if let (Some(content_type), sqlx::Error::Database(db_err)) = (content_type, &err) {
            let missing_relation = format!("\"{}\"", content_type.table_name);
            if db_err.code().as_deref() == Some(UNDEFINED_TABLE)
                && db_err.message().contains(&missing_relation)
            {
                return ChangeLogError::UnknownContentType(format!(
                    "{} (table missing: {})",
                    content_type.slug,
                    db_err.message()
                ));
            }
        }
        ChangeLogError::Store(err)
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ChangeLogError::InvalidArgument(_))
    }

    pub fn is_unknown_content_type(&self) -> bool {
        matches!(self, ChangeLogError::UnknownContentType(_))
    }
}

impl From<validator::ValidationErrors> for ChangeLogError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let code = e.code.as_ref();
                    format!("{}: {}", field, code)
                })
            })
            .collect();
        messages.sort();
        ChangeLogError::InvalidArgument(messages.join(", "))
    }
}
