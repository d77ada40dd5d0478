//! Execution of built change-log queries.

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::change_log::ChangeLogEntry;

pub async fn fetch_change_log_entries(
    pool: &PgPool,
    mut builder: QueryBuilder<'_, Postgres>,
) -> Result<Vec<ChangeLogEntry>, sqlx::Error> {
    tracing::trace!(sql = builder.sql(), "fetching change-log entries");
    builder
        .build_query_as::<ChangeLogEntry>()
        .fetch_all(pool)
        .await
}

pub async fn fetch_change_log_entry(
    pool: &PgPool,
    mut builder: QueryBuilder<'_, Postgres>,
) -> Result<Option<ChangeLogEntry>, sqlx::Error> {
    tracing::trace!(sql = builder.sql(), "fetching change-log entry");
    builder
        .build_query_as::<ChangeLogEntry>()
        .fetch_optional(pool)
        .await
}

pub async fn count_change_log_entries(
    pool: &PgPool,
    mut builder: QueryBuilder<'_, Postgres>,
) -> Result<i64, sqlx::Error> {
    tracing::trace!(sql = builder.sql(), "counting change-log entries");
    builder.build_query_scalar::<i64>().fetch_one(pool).await
}
