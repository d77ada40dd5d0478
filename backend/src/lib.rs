//! Read-side access to the content change log.
//!
//! [`services::change_log::ChangeLogReader`] is the entry point; it resolves
//! content types through a [`registry::ContentTypeRegistry`] and runs the
//! queries assembled by [`repositories::change_log_query::ChangeLogQueryBuilder`].

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod registry;
pub mod repositories;
pub mod services;
pub mod types;
pub mod validation;
