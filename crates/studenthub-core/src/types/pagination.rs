//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 10;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
///
/// Inputs are clamped on construction: `page` is at least 1 and `limit`
/// stays within `1..=100`, so `page=0` or `limit=0` cannot produce a
/// negative offset or an unbounded query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub limit: u64,
}

impl PageRequest {
    /// Create a new page request with clamped inputs.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Calculate the SQL `OFFSET` value: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.limit
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Metadata carried alongside a page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub limit: u64,
    /// Total number of active records across all pages.
    pub total: u64,
    /// Total number of pages: `ceil(total / limit)`.
    pub total_pages: u64,
}

/// Paginated response envelope: `{ data, meta }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The records on this page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

impl<T> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(data: Vec<T>, page: &PageRequest, total: u64) -> Self {
        let total_pages = total.div_ceil(page.limit);
        Self {
            data,
            meta: PageMeta {
                page: page.page,
                limit: page.limit,
                total,
                total_pages,
            },
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_math() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(2, 10).offset(), 10);
        assert_eq!(PageRequest::new(7, 25).offset(), 150);
    }

    #[test]
    fn test_clamping() {
        let page = PageRequest::new(0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit(), 1);

        let page = PageRequest::new(3, 500);
        assert_eq!(page.limit(), 100);
    }

    #[test]
    fn test_total_pages() {
        let page = PageRequest::new(2, 10);
        let resp: PageResponse<u32> = PageResponse::new(vec![], &page, 15);
        assert_eq!(resp.meta.total_pages, 2);

        let resp: PageResponse<u32> = PageResponse::new(vec![], &page, 0);
        assert_eq!(resp.meta.total_pages, 0);

        let resp: PageResponse<u32> = PageResponse::new(vec![], &page, 20);
        assert_eq!(resp.meta.total_pages, 2);

        let resp: PageResponse<u32> = PageResponse::new(vec![], &page, 21);
        assert_eq!(resp.meta.total_pages, 3);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let page = PageRequest::new(1, 10);
        let resp: PageResponse<u32> = PageResponse::new(vec![1, 2], &page, 2);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["meta"]["totalPages"], 1);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }
}
