//! Shared pagination types for API query parameters and responses.
//!
//! All list endpoints use page-number pagination driven by a single `page`
//! query parameter (default 1); the page size comes from configuration.
//! Responses are wrapped in a uniform `{data, pagination}` envelope where
//! the pagination object carries navigation URLs and totals.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Standard pagination parameters for list endpoints.
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PageQuery {
    /// Page number to fetch (default: 1)
    #[param(default = 1, minimum = 1)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub page: Option<i64>,
}

impl PageQuery {
    /// Get the requested page, defaulting to 1 if not specified.
    #[inline]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }
}

/// Navigation metadata included with every list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginationInfo {
    /// URL of the previous page; null on the first page
    pub prev_url: Option<String>,
    /// URL of this page; always present
    pub current_url: String,
    /// URL of the next page; null on the last page
    pub next_url: Option<String>,
    /// Page size in effect
    pub per_page: i64,
    /// ceil(total_items / per_page); 0 for an empty result set
    pub total_pages: i64,
    /// Total number of items matching the query (before pagination)
    pub total_items: i64,
}

/// Generic paginated response wrapper for list endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Paginated<T: ToSchema> {
    /// The items for the current page
    pub data: Vec<T>,
    /// Navigation metadata
    pub pagination: PaginationInfo,
}

impl<T: ToSchema> Paginated<T> {
    pub fn new(data: Vec<T>, pagination: PaginationInfo) -> Self {
        Self { data, pagination }
    }
}

/// Pure pagination math over a page cursor, page size, and total count.
///
/// Performs no database access; repositories are queried with the derived
/// offset/limit, and [`Pager::envelope`] renders the navigation metadata.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    page: i64,
    per_page: i64,
    total_items: i64,
    total_pages: i64,
}

impl Pager {
    /// Validate a requested page against the total count.
    ///
    /// A page below 1 is a validation error. A page beyond the last
    /// available page is a hard not-found, not a silently empty page.
    /// Page 1 against an empty result set is allowed.
    pub fn new(page: i64, per_page: i64, total_items: i64) -> Result<Self> {
        debug_assert!(per_page > 0, "per_page is validated at config load");

        if page < 1 {
            return Err(Error::bad_request(format!("page must be at least 1, got {page}")));
        }

        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + per_page - 1) / per_page
        };

        if page > total_pages && !(page == 1 && total_pages == 0) {
            return Err(Error::not_found("page", page));
        }

        Ok(Self {
            page,
            per_page,
            total_items,
            total_pages,
        })
    }

    /// Row offset of this page.
    #[inline]
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    #[inline]
    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Index window of this page within an already-materialized slice.
    /// Used when pagination applies to a bounded ranked subset held in
    /// memory rather than a SQL OFFSET/LIMIT.
    pub fn window(&self, len: usize) -> (usize, usize) {
        let start = (self.offset() as usize).min(len);
        let end = (start + self.per_page as usize).min(len);
        (start, end)
    }

    /// Render the navigation envelope for a stable base request URL.
    pub fn envelope(&self, base_url: &str) -> PaginationInfo {
        let has_prev = self.page > 1;
        let has_next = self.page < self.total_pages;

        PaginationInfo {
            prev_url: has_prev.then(|| format!("{base_url}?page={}", self.page - 1)),
            current_url: format!("{base_url}?page={}", self.page),
            next_url: has_next.then(|| format!("{base_url}?page={}", self.page + 1)),
            per_page: self.per_page,
            total_pages: self.total_pages,
            total_items: self.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_default() {
        assert_eq!(PageQuery::default().page(), 1);
        assert_eq!(PageQuery { page: Some(7) }.page(), 7);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        for (total, per_page, want) in [(0, 10, 0), (1, 10, 1), (10, 10, 1), (11, 10, 2), (21, 10, 3), (30, 10, 3)] {
            let pager = Pager::new(1, per_page, total).unwrap();
            assert_eq!(pager.envelope("/x").total_pages, want, "total={total} per_page={per_page}");
        }
    }

    #[test]
    fn test_first_page_has_no_prev() {
        let info = Pager::new(1, 10, 25).unwrap().envelope("/employees/");
        assert_eq!(info.prev_url, None);
        assert_eq!(info.current_url, "/employees/?page=1");
        assert_eq!(info.next_url.as_deref(), Some("/employees/?page=2"));
    }

    #[test]
    fn test_middle_page_has_both_links() {
        let info = Pager::new(2, 10, 25).unwrap().envelope("/employees/");
        assert_eq!(info.prev_url.as_deref(), Some("/employees/?page=1"));
        assert_eq!(info.next_url.as_deref(), Some("/employees/?page=3"));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let info = Pager::new(3, 10, 25).unwrap().envelope("/employees/");
        assert_eq!(info.prev_url.as_deref(), Some("/employees/?page=2"));
        assert_eq!(info.next_url, None);
        assert_eq!(info.total_items, 25);
    }

    #[test]
    fn test_empty_set_yields_zero_pages_and_null_links() {
        let info = Pager::new(1, 10, 0).unwrap().envelope("/employees/");
        assert_eq!(info.total_pages, 0);
        assert_eq!(info.prev_url, None);
        assert_eq!(info.next_url, None);
        assert_eq!(info.current_url, "/employees/?page=1");
    }

    #[test]
    fn test_out_of_range_page_is_not_found() {
        let err = Pager::new(4, 10, 25).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));

        // Beyond an empty set, anything past page 1 is out of range too
        let err = Pager::new(2, 10, 0).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_page_below_one_is_bad_request() {
        assert!(matches!(Pager::new(0, 10, 25).unwrap_err(), Error::BadRequest { .. }));
        assert!(matches!(Pager::new(-3, 10, 25).unwrap_err(), Error::BadRequest { .. }));
    }

    #[test]
    fn test_offsets_tile_without_overlap_or_gap() {
        let total = 25;
        let per_page = 10;
        let mut covered = 0;
        for page in 1..=3 {
            let pager = Pager::new(page, per_page, total).unwrap();
            assert_eq!(pager.offset(), covered);
            let (start, end) = pager.window(total as usize);
            assert_eq!(start as i64, covered);
            covered = end as i64;
        }
        assert_eq!(covered, total);
    }

    #[test]
    fn test_window_clamps_to_slice() {
        let pager = Pager::new(3, 10, 25).unwrap();
        assert_eq!(pager.window(25), (20, 25));
    }
}
