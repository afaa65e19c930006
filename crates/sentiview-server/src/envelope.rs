//! Response envelopes shared by the collection endpoints.
//!
//! Single resources use `{ self, data, error_code, error_message }`; paged
//! collections add `next`/`prev` links and page bookkeeping. Page size is
//! taken from the query only when it is below the maximum, otherwise the
//! default applies.

use serde::Serialize;

/// Largest accepted page size. Requests at or above this fall back to the
/// default.
pub const MAX_PAGE_SIZE: u64 = 50;
/// Page size applied when the query omits or overshoots it.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Standard resource envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    #[serde(rename = "self")]
    pub self_url: String,
    pub data: T,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
}

impl<T> Envelope<T> {
    /// Wrap response data for the given request URL.
    pub fn new(self_url: impl Into<String>, data: T) -> Self {
        Self {
            self_url: self_url.into(),
            data,
            error_code: None,
            error_message: None,
        }
    }
}

/// Paged collection envelope. `next`/`prev` are `None` past either end.
#[derive(Debug, Serialize)]
pub struct Paged<T> {
    #[serde(rename = "self")]
    pub self_url: String,
    pub next: Option<String>,
    pub prev: Option<String>,
    pub start: u64,
    pub page_size: u64,
    pub page: u64,
    pub data: Vec<T>,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
}

/// Pagination window resolved from query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: u64,
    pub page_size: u64,
}

impl PageWindow {
    /// Resolve a window from raw query values.
    #[must_use]
    pub fn resolve(start: Option<u64>, page_size: Option<u64>) -> Self {
        let page_size = match page_size {
            Some(size) if size > 0 && size < MAX_PAGE_SIZE => size,
            _ => DEFAULT_PAGE_SIZE,
        };
        Self {
            start: start.unwrap_or(0),
            page_size,
        }
    }

    fn page(self) -> u64 {
        self.start / self.page_size
    }

    fn next_link(self, path: &str) -> Option<String> {
        Some(page_url(path, self.start + self.page_size, self.page_size))
    }

    fn prev_link(self, path: &str) -> Option<String> {
        let prev_start = self.start.checked_sub(self.page_size)?;
        Some(page_url(path, prev_start, self.page_size))
    }
}

fn page_url(path: &str, start: u64, page_size: u64) -> String {
    format!("/api/v1{path}?page_size={page_size}&start={start}")
}

impl<T> Paged<T> {
    /// Wrap one page of a collection.
    pub fn new(self_url: impl Into<String>, path: &str, window: PageWindow, data: Vec<T>) -> Self {
        Self {
            self_url: self_url.into(),
            next: window.next_link(path),
            prev: window.prev_link(path),
            start: window.start,
            page_size: window.page_size,
            page: window.page(),
            data,
            error_code: None,
            error_message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults() {
        let window = PageWindow::resolve(None, None);
        assert_eq!(window, PageWindow { start: 0, page_size: DEFAULT_PAGE_SIZE });
    }

    #[test]
    fn window_accepts_sizes_below_max() {
        let window = PageWindow::resolve(Some(20), Some(25));
        assert_eq!(window.page_size, 25);
        assert_eq!(window.start, 20);
    }

    #[test]
    fn window_rejects_oversized_pages() {
        assert_eq!(PageWindow::resolve(None, Some(50)).page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(PageWindow::resolve(None, Some(500)).page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(PageWindow::resolve(None, Some(0)).page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn first_page_has_no_prev() {
        let window = PageWindow::resolve(Some(0), Some(10));
        let paged = Paged::new("/api/v1/tweets/sample", "/tweets/sample", window, vec![1u32]);
        assert!(paged.prev.is_none());
        assert_eq!(
            paged.next.as_deref(),
            Some("/api/v1/tweets/sample?page_size=10&start=10")
        );
        assert_eq!(paged.page, 0);
    }

    #[test]
    fn later_pages_link_both_ways() {
        let window = PageWindow::resolve(Some(30), Some(10));
        let paged = Paged::new("/api/v1/tweets/sample", "/tweets/sample", window, Vec::<u32>::new());
        assert_eq!(
            paged.prev.as_deref(),
            Some("/api/v1/tweets/sample?page_size=10&start=20")
        );
        assert_eq!(paged.page, 3);
    }

    #[test]
    fn envelope_serializes_self_key() {
        let envelope = Envelope::new("/api/v1/datasets", vec![1u32, 2]);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["self"], "/api/v1/datasets");
        assert_eq!(json["error_code"], serde_json::Value::Null);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
