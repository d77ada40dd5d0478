//! Validation for caller-supplied options and configured identifiers.

pub mod rules;

pub use validator::Validate;
