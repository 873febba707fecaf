//! Offset pagination shared by the product and routine listings.

use serde::Serialize;

/// One page of a remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Builds a page from the pagination echoed by the server.
    pub fn new(items: Vec<T>, offset: u32, limit: u32, total: u32) -> Self {
        Self {
            items,
            has_more: has_more(offset, limit, total),
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_more: self.has_more,
        }
    }
}

/// True when entries exist past `offset + limit`.
pub fn has_more(offset: u32, limit: u32, total: u32) -> bool {
    u64::from(offset) + u64::from(limit) < u64::from(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_more() {
        assert!(has_more(0, 15, 16));
        assert!(!has_more(0, 15, 15));
        assert!(!has_more(15, 15, 20));
        assert!(!has_more(u32::MAX, u32::MAX, u32::MAX));
    }

    #[test]
    fn test_page_new() {
        let page = Page::new(vec![1, 2], 0, 2, 5);
        assert!(page.has_more);
        assert_eq!(page.map(|n| n * 10).items, vec![10, 20]);
    }
}
