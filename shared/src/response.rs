//! API Response types
//!
//! Standardized API response structures for the entire framework

use serde::{Deserialize, Serialize};

/// Unified API response structure
///
/// All API endpoints answer with this envelope:
/// ```json
/// {
///     "success": true,
///     "data": { ... }
/// }
/// ```
/// or, on failure:
/// ```json
/// {
///     "success": false,
///     "error": "Repair request repair_request:x9k not found"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AppResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (1-based)
    pub page: u32,
    /// Total number of pages
    pub total_pages: u32,
    /// Total number of items
    pub total: u64,
}

impl Pagination {
    /// Create pagination metadata from a total count and page size
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            ((total as f64) / (per_page as f64)).ceil() as u32
        };
        Self {
            page,
            total_pages,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rounds_up() {
        let p = Pagination::new(1, 10, 31);
        assert_eq!(p.total_pages, 4);
        assert_eq!(p.total, 31);
    }

    #[test]
    fn pagination_zero_per_page() {
        let p = Pagination::new(1, 0, 5);
        assert_eq!(p.total_pages, 0);
    }

    #[test]
    fn error_envelope_shape() {
        let resp = AppResponse::<()>::error("boom");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
        assert!(json.get("data").is_none());
    }
}
