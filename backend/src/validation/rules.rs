//! Validation rules shared by options and configuration.

use validator::ValidationError;

/// Postgres truncates identifiers beyond this length.
const MAX_IDENTIFIER_LEN: usize = 63;

/// Validates an unquoted SQL identifier such as a table name.
///
/// Requirements:
/// - Starts with an ASCII letter or underscore
/// - Continues with ASCII letters, digits or underscores
/// - 1-63 characters in length
pub fn validate_sql_identifier(identifier: &str) -> Result<(), ValidationError> {
    if identifier.is_empty() || identifier.len() > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::new("identifier_invalid_length"));
    }

    let mut chars = identifier.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !starts_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::new("identifier_invalid_characters"));
    }

    Ok(())
}
