//! Paged result container cached by the search caches.

use serde::{Deserialize, Serialize};

// == Page ==
/// One page of a paginated query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Page number as requested by the caller
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Builds a page and derives `total_pages` from the element count.
    pub fn new(content: Vec<T>, page: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(size)) as u32
        };
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }

    /// True for the first page (page numbers start at 1; 0 is read as 1).
    pub fn is_first(&self) -> bool {
        self.page <= 1
    }

    pub fn is_last(&self) -> bool {
        self.page.max(1) >= self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_total_pages() {
        let page = Page::new(vec![1, 2, 3], 1, 3, 10);
        assert_eq!(page.total_pages, 4);
        assert!(page.is_first());
        assert!(!page.is_last());
    }

    #[test]
    fn test_page_last() {
        let page = Page::new(vec![10], 4, 3, 10);
        assert!(!page.is_first());
        assert!(page.is_last());
    }

    #[test]
    fn test_page_zero_size() {
        let page: Page<u8> = Page::new(vec![], 1, 0, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.is_empty());
        assert!(page.is_last());
    }

    #[test]
    fn test_page_serialize() {
        let page = Page::new(vec!["a"], 1, 10, 1);
        let json = serde_json::to_string(&page).unwrap();
        assert!(json.contains("\"totalElements\":1"));
        assert!(json.contains("\"totalPages\":1"));
    }
}
