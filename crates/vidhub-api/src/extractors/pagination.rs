//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use vidhub_core::types::pagination::{DEFAULT_LIMIT, PageRequest};

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    pub page: Option<u64>,
    /// Items per page (default: 10, max: 100).
    pub limit: Option<u64>,
}

impl PaginationParams {
    /// Converts to a `PageRequest`.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(1), self.limit.unwrap_or(DEFAULT_LIMIT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        let page = PaginationParams::default().into_page_request();
        assert_eq!((page.page, page.limit), (1, 10));

        let page = PaginationParams {
            page: Some(0),
            limit: Some(1000),
        }
        .into_page_request();
        assert_eq!((page.page, page.limit), (1, 100));
    }
}
