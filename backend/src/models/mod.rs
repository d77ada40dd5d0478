//! Data models returned by the change-log reader.

use serde::{Deserialize, Serialize};

pub mod change_log;

/// Page-number pagination request. Missing or out-of-range values are
/// clamped against the reader's configured limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageRequest {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    /// Returns `(page, per_page)` with page >= 1 and per_page in 1..=max.
    pub fn resolve(&self, default_per_page: i64, max_per_page: i64) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self
            .per_page
            .unwrap_or(default_per_page)
            .clamp(1, max_per_page.max(1));
        (page, per_page)
    }
}

/// One page of results plus the total across all pages.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub items: Vec<T>,
}

impl<T: Serialize> Page<T> {
    pub fn new(items: Vec<T>, total: i64, page: i64, per_page: i64) -> Self {
        Self {
            page,
            per_page,
            total,
            items,
        }
    }

    /// Rows skipped before this page.
    pub fn offset(&self) -> i64 {
        offset_for(self.page, self.per_page)
    }

    pub fn total_pages(&self) -> i64 {
        if self.per_page <= 0 {
            return 1;
        }
        ((self.total + self.per_page - 1) / self.per_page).max(1)
    }

    pub fn has_more(&self) -> bool {
        self.offset() + (self.items.len() as i64) < self.total
    }
}

pub(crate) fn offset_for(page: i64, per_page: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(per_page)
}
