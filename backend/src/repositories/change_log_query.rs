//! Query construction for the change-log table.
//!
//! Every value supplied by a caller is bound as a parameter. The only text
//! spliced into SQL is the change-log table name, content table names taken
//! from a [`ContentType`] (both validated identifiers), and the fixed column
//! and keyword fragments below.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{Postgres, QueryBuilder};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::ChangeLogError;
use crate::repositories::common::push_clause;
use crate::types::{ChangeLogId, ContentId, ContentType};
use crate::validation::rules::validate_sql_identifier;

const LOG_COLUMNS: &str = "log.id, log.date, log.contentid, log.contenttype, log.ownerid, \
                           log.mutation_type, log.diff, log.comment";

/// Comparison used by the ordered lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// The entry itself.
    Eq,
    /// An entry with a smaller id, newest by date first.
    Lt,
    /// An entry with a larger id, oldest by date first.
    Gt,
}

impl ComparisonOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Gt => ">",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for ComparisonOp {
    type Err = ChangeLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" => Ok(ComparisonOp::Eq),
            "<" => Ok(ComparisonOp::Lt),
            ">" => Ok(ComparisonOp::Gt),
            other => Err(ChangeLogError::InvalidArgument(format!(
                "comparison operator must be one of =, <, > (got `{}`)",
                other
            ))),
        }
    }
}

/// Column a listing may be sorted by.
///
/// Accepts the column name with or without underscores, in any case, both
/// from strings and when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeLogOrder {
    Id,
    #[default]
    Date,
    ContentId,
    ContentType,
    Title,
    OwnerId,
    MutationType,
}

impl ChangeLogOrder {
    fn as_sql(self) -> &'static str {
        match self {
            ChangeLogOrder::Id => "log.id",
            ChangeLogOrder::Date => "log.date",
            ChangeLogOrder::ContentId => "log.contentid",
            ChangeLogOrder::ContentType => "log.contenttype",
            // Output alias; resolves to the joined title when a content table is joined.
            ChangeLogOrder::Title => "title",
            ChangeLogOrder::OwnerId => "log.ownerid",
            ChangeLogOrder::MutationType => "log.mutation_type",
        }
    }
}

impl FromStr for ChangeLogOrder {
    type Err = ChangeLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(ChangeLogOrder::Id),
            "date" => Ok(ChangeLogOrder::Date),
            "contentid" | "content_id" => Ok(ChangeLogOrder::ContentId),
            "contenttype" | "content_type" => Ok(ChangeLogOrder::ContentType),
            "title" => Ok(ChangeLogOrder::Title),
            "ownerid" | "owner_id" => Ok(ChangeLogOrder::OwnerId),
            "mutationtype" | "mutation_type" => Ok(ChangeLogOrder::MutationType),
            other => Err(ChangeLogError::InvalidArgument(format!(
                "unsupported order column `{}`",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ChangeLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            other => Err(ChangeLogError::InvalidArgument(format!(
                "direction must be ASC or DESC (got `{}`)",
                other
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for ChangeLogOrder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for SortDirection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Filters, ordering and paging for change-log listings.
///
/// `offset` only takes effect together with `limit`. `id` is matched within
/// `content_id`; given alone it compares against a NULL record id and
/// matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ChangeLogOptions {
    pub content_id: Option<ContentId>,
    pub id: Option<ChangeLogId>,
    #[validate(range(min = 0))]
    pub limit: Option<i64>,
    #[validate(range(min = 0))]
    pub offset: Option<i64>,
    pub order: Option<ChangeLogOrder>,
    pub direction: Option<SortDirection>,
}

impl ChangeLogOptions {
    pub fn for_content(content_id: ContentId) -> Self {
        Self {
            content_id: Some(content_id),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_order(mut self, order: ChangeLogOrder, direction: SortDirection) -> Self {
        self.order = Some(order);
        self.direction = Some(direction);
        self
    }

    /// Same filters and ordering with paging removed.
    pub fn without_paging(&self) -> Self {
        Self {
            limit: None,
            offset: None,
            ..self.clone()
        }
    }

    pub fn check(&self) -> Result<(), ChangeLogError> {
        self.validate()?;
        Ok(())
    }
}

/// Builds change-log queries against a single change-log table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLogQueryBuilder {
    log_table: String,
}

impl ChangeLogQueryBuilder {
    pub fn new(log_table: impl Into<String>) -> Result<Self, ChangeLogError> {
        let log_table = log_table.into();
        validate_sql_identifier(&log_table).map_err(|err| {
            ChangeLogError::Configuration(format!("change-log table `{}`: {}", log_table, err.code))
        })?;
        Ok(Self { log_table })
    }

    pub fn log_table(&self) -> &str {
        &self.log_table
    }

    /// `SELECT COUNT(*)` over the entries matching `options`; `None` counts
    /// across every content type. Ordering and paging are ignored. The
    /// content table is joined like the listing query so both agree on what
    /// exists.
    pub fn build_count_query(
        &self,
        content_type: Option<&ContentType>,
        options: &ChangeLogOptions,
    ) -> Result<QueryBuilder<'static, Postgres>, ChangeLogError> {
        options.check()?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM ");
        builder.push(&self.log_table).push(" log");
        if let Some(content_type) = content_type {
            push_content_join(&mut builder, content_type);
        }
        let mut has_clause = false;
        apply_change_log_filters(&mut builder, &mut has_clause, content_type, options);
        Ok(builder)
    }

    /// Selects entries matching `options`. With a content type the content
    /// table is joined for the title; without one every content type is
    /// listed using the title stored on the log row.
    pub fn build_filter_query(
        &self,
        content_type: Option<&ContentType>,
        options: &ChangeLogOptions,
    ) -> Result<QueryBuilder<'static, Postgres>, ChangeLogError> {
        options.check()?;

        let mut builder = self.select_entries(content_type);
        let mut has_clause = false;
        apply_change_log_filters(&mut builder, &mut has_clause, content_type, options);

        let order = options.order.unwrap_or_default();
        let direction = options.direction.unwrap_or_default();
        builder
            .push(" ORDER BY ")
            .push(order.as_sql())
            .push(" ")
            .push(direction.as_sql());
        if order != ChangeLogOrder::Id {
            builder.push(", log.id ").push(direction.as_sql());
        }

        if let Some(limit) = options.limit {
            builder.push(" LIMIT ").push_bind(limit);
            if let Some(offset) = options.offset {
                builder.push(" OFFSET ").push_bind(offset);
            }
        }

        Ok(builder)
    }

    /// Selects at most one entry of `content_id` whose id compares to `id`
    /// by `op`. Neighbours are chosen by id but ranked by date, then by id
    /// for entries sharing a date.
    pub fn build_ordered_lookup_query(
        &self,
        content_type: &ContentType,
        content_id: ContentId,
        id: ChangeLogId,
        op: ComparisonOp,
    ) -> QueryBuilder<'static, Postgres> {
        let mut builder = self.select_entries(Some(content_type));
        let mut has_clause = false;

        push_clause(&mut builder, &mut has_clause);
        builder
            .push("log.id ")
            .push(op.as_sql())
            .push(" ")
            .push_bind(id.get());
        push_clause(&mut builder, &mut has_clause);
        builder.push("log.contentid = ").push_bind(content_id.get());
        push_clause(&mut builder, &mut has_clause);
        builder
            .push("log.contenttype = ")
            .push_bind(content_type.slug.as_str().to_string());

        match op {
            ComparisonOp::Lt => {
                builder.push(" ORDER BY log.date DESC, log.id DESC");
            }
            ComparisonOp::Gt => {
                builder.push(" ORDER BY log.date ASC, log.id ASC");
            }
            ComparisonOp::Eq => {}
        }
        builder.push(" LIMIT 1");
        builder
    }

    fn select_entries(&self, content_type: Option<&ContentType>) -> QueryBuilder<'static, Postgres> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(LOG_COLUMNS);
        match content_type {
            Some(content_type) => {
                builder
                    .push(", COALESCE(content.title, log.title) AS title FROM ")
                    .push(&self.log_table)
                    .push(" log");
                push_content_join(&mut builder, content_type);
            }
            None => {
                builder
                    .push(", log.title AS title FROM ")
                    .push(&self.log_table)
                    .push(" log");
            }
        }
        builder
    }
}

/// Joins the content table on its primary key, so at most one content row
/// matches each log row.
fn push_content_join(builder: &mut QueryBuilder<'static, Postgres>, content_type: &ContentType) {
    builder
        .push(" LEFT JOIN ")
        .push(&content_type.table_name)
        .push(" content ON content.id = log.contentid");
}

fn apply_change_log_filters(
    builder: &mut QueryBuilder<'static, Postgres>,
    has_clause: &mut bool,
    content_type: Option<&ContentType>,
    options: &ChangeLogOptions,
) {
    if let Some(content_type) = content_type {
        push_clause(builder, has_clause);
        builder
            .push("log.contenttype = ")
            .push_bind(content_type.slug.as_str().to_string());
    }
    if options.content_id.is_some() || options.id.is_some() {
        push_clause(builder, has_clause);
        builder
            .push("log.contentid = ")
            .push_bind(options.content_id.map(ContentId::get));
    }
    if let Some(id) = options.id {
        push_clause(builder, has_clause);
        builder.push("log.id = ").push_bind(id.get());
    }
}
