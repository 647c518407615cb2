//! Page/limit arithmetic for list endpoints.
//!
//! Pages are 1-based. The response envelope mirrors the wire shape
//! `{ data, pagination: { page, limit, total, totalPages } }`.

use serde::Serialize;

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_LIMIT: i64 = 100;

/// Number of rows to skip before the first row of `page`.
///
/// `page` is expected to be validated (>= 1); anything lower is treated as
/// the first page.
pub fn offset(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(limit.max(0))
}

/// `ceil(total / limit)`, which is `0` for an empty result set.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: i64,
    pub limit: i64,
    /// Matching rows across all pages.
    pub total: i64,
    pub total_pages: i64,
}

impl PageInfo {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
        }
    }
}

/// A page of results with its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}
