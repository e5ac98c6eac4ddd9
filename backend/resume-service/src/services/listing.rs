/// Paginated resume listing with an optional substring filter
use std::sync::Arc;

use crate::db::ResumeStore;
use crate::error::Result;
use crate::models::{Page, ResumeRecord};
use crate::services::parse_finite;

pub const DEFAULT_PAGE_SIZE: u64 = 9;
pub const MAX_PAGE_SIZE: u64 = 50;

/// Validated page coordinates. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Lenient parse of the raw query values; bad input falls back to defaults.
    pub fn parse(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page = parse_finite(page)
            .map(|v| v.trunc().max(1.0) as u64)
            .unwrap_or(1);
        let page_size = parse_finite(page_size)
            .map(|v| v.trunc().clamp(1.0, MAX_PAGE_SIZE as f64) as u64)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self { page, page_size }
    }

    pub fn offset(&self) -> i64 {
        let offset = self.page.saturating_sub(1).saturating_mul(self.page_size);
        i64::try_from(offset).unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }
}

/// Trimmed, lowercased filter text, or `None` when blank.
pub fn normalize_query(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase)
}

/// Case-insensitive substring match on name OR blurb.
///
/// `needle` must already be normalized.
pub fn matches_query(name: &str, blurb: Option<&str>, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
        || blurb
            .map(|b| b.to_lowercase().contains(needle))
            .unwrap_or(false)
}

/// Keep the records matching `query`, preserving order.
pub fn filter_by_query(records: Vec<ResumeRecord>, query: Option<&str>) -> Vec<ResumeRecord> {
    match normalize_query(query) {
        Some(needle) => records
            .into_iter()
            .filter(|r| matches_query(&r.name, r.blurb.as_deref(), &needle))
            .collect(),
        None => records,
    }
}

pub struct ListingService {
    store: Arc<dyn ResumeStore>,
}

impl ListingService {
    pub fn new(store: Arc<dyn ResumeStore>) -> Self {
        Self { store }
    }

    /// One page of resumes, newest first, with the total matching count.
    pub async fn list_page(
        &self,
        request: PageRequest,
        query: Option<&str>,
    ) -> Result<Page<ResumeRecord>> {
        let needle = normalize_query(query);
        let needle = needle.as_deref();

        let (items, total) = tokio::try_join!(
            self.store.fetch_page(request.offset(), request.limit(), needle),
            self.store.count_resumes(needle),
        )?;

        Ok(Page { items, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_and_clamps() {
        assert_eq!(PageRequest::parse(None, None), PageRequest::default());
        assert_eq!(
            PageRequest::parse(Some("0"), Some("500")),
            PageRequest {
                page: 1,
                page_size: 50
            }
        );
        assert_eq!(
            PageRequest::parse(Some("x"), Some("0")),
            PageRequest {
                page: 1,
                page_size: 1
            }
        );
        assert_eq!(PageRequest::parse(Some("3"), Some("9")).offset(), 18);
    }

    #[test]
    fn offset_saturates() {
        let req = PageRequest::parse(Some("1e30"), Some("50"));
        assert_eq!(req.offset(), i64::MAX);
    }

    #[test]
    fn query_matches_name_or_blurb() {
        let needle = normalize_query(Some("  ali ")).unwrap();
        assert!(matches_query("Ali Khan", None, &needle));
        assert!(matches_query("Resume", Some("say ali-gator"), &needle));
        assert!(!matches_query("Bob", Some("no match here"), &needle));
    }

    #[test]
    fn blank_query_is_no_filter() {
        assert_eq!(normalize_query(Some("   ")), None);
        assert_eq!(normalize_query(None), None);
    }
}
