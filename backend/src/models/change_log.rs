use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{types::Json, FromRow};

use crate::models::Page;
use crate::types::{ChangeLogId, ContentId, ContentTypeSlug};

/// One recorded edit to a content record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ChangeLogEntry {
    pub id: ChangeLogId,
    pub date: DateTime<Utc>,
    #[sqlx(rename = "contentid")]
    pub content_id: ContentId,
    #[sqlx(rename = "contenttype")]
    pub content_type: ContentTypeSlug,
    pub title: Option<String>,
    #[sqlx(rename = "ownerid")]
    pub owner_id: Option<i64>,
    pub mutation_type: Option<String>,
    pub diff: Option<Json<Value>>,
    pub comment: Option<String>,
}

pub type ChangeLogPage = Page<ChangeLogEntry>;
