use serde::Serialize;

use crate::config::PaginationConfig;

/// Resolved page window. Malformed or non-positive `page`/`limit` inputs
/// fall back to their defaults rather than erroring; `limit` is clamped to
/// the configured maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn resolve(page: Option<&str>, limit: Option<&str>, default_limit: i64, config: &PaginationConfig) -> Self {
        let page = parse_positive(page).unwrap_or(1);
        let limit = parse_positive(limit)
            .unwrap_or(default_limit)
            .min(config.max_limit);
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

fn parse_positive(value: Option<&str>) -> Option<i64> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
}

/// Pagination envelope attached to listing responses. `totalSchemes` is the
/// full matching count, computed independently of the returned page slice.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_schemes: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn new(page: Page, total: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + page.limit - 1) / page.limit
        };
        Self {
            current_page: page.page,
            total_pages,
            total_schemes: total,
            has_next_page: page.page < total_pages,
            has_prev_page: page.page > 1,
        }
    }
}
