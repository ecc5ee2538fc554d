//! Pagination query parameters shared by every list endpoint.

use serde::{Deserialize, Serialize};

use studenthub_core::types::pagination::PageRequest;

/// `?page&limit&searchString` on list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (default: 10, max: 100).
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Keyword for case-insensitive substring search.
    #[serde(rename = "searchString")]
    pub search_string: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

impl ListParams {
    /// Converts to a clamped `PageRequest`.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_query() {
        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
        assert!(params.search_string.is_none());
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let params = ListParams {
            page: 0,
            limit: 1000,
            search_string: None,
        };
        let page = params.page_request();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit(), 100);
    }
}
