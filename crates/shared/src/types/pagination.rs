//! Pagination types for list operations.
//!
//! Listings use additive `limit`/`offset` rather than page numbers. Defaults
//! are per listing: church listings default to 100 rows, transaction listings
//! apply no limit unless one is provided.

use serde::{Deserialize, Serialize};

/// Limit/offset parameters for list queries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListParams {
    /// Maximum number of rows to return. `None` means the listing's default.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Number of rows to skip.
    #[serde(default)]
    pub offset: Option<u64>,
}

impl ListParams {
    /// Resolves the effective limit against a listing-specific default.
    #[must_use]
    pub fn limit_or(&self, default: u64) -> u64 {
        self.limit.unwrap_or(default)
    }

    /// Resolves the effective offset (defaults to 0).
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ListParams::default();
        assert_eq!(params.limit_or(100), 100);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_explicit_values_win() {
        let params = ListParams {
            limit: Some(25),
            offset: Some(50),
        };
        assert_eq!(params.limit_or(100), 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.limit, None);
        assert_eq!(params.offset, None);
    }
}
