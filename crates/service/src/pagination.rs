//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

use common::{EnvelopeError, PageMeta};
use serde::Deserialize;

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination parameters, as received in a query string
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    #[serde(default = "default_page")]
    pub page: u32,
    /// items per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 { 1 }
fn default_per_page() -> u32 { DEFAULT_PER_PAGE }

impl Pagination {
    /// Clamp to sane defaults and convert to `(zero_based_page, per_page)`
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        ((page - 1) as u64, per_page as u64)
    }

    /// Metadata for the normalized page given the total item count
    pub fn meta(self, total: u64) -> Result<PageMeta, EnvelopeError> {
        let (idx, per_page) = self.normalize();
        PageMeta::new(idx + 1, per_page, total)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: DEFAULT_PER_PAGE } }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, 100);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.per_page, 20);
    }

    #[test]
    fn meta_uses_normalized_values() {
        let meta = Pagination { page: 1, per_page: 10 }.meta(25).unwrap();
        assert_eq!((meta.page(), meta.per_page(), meta.total(), meta.pages()), (1, 10, 25, 3));

        let meta = Pagination { page: 0, per_page: 0 }.meta(0).unwrap();
        assert_eq!((meta.page(), meta.per_page(), meta.pages()), (1, 1, 0));
    }

    #[test]
    fn query_defaults_fill_missing_fields() {
        let p: Pagination = serde_json::from_str(r#"{"per_page": 5}"#).unwrap();
        assert_eq!(p, Pagination { page: 1, per_page: 5 });
    }
}
