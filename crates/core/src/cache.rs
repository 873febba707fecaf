//! In-memory mirror of remote collections.
//!
//! Repositories keep the last fetched state of a collection in a
//! [`CachedList`]. Every mutation goes through `watch::Sender::send_modify`,
//! so subscribers only ever observe complete snapshots.

use std::collections::HashSet;
use tokio::sync::watch;

/// Entities cached by id.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Repositories whose cached data must be dropped on logout.
pub trait Cleanable: Send + Sync {
    fn clear(&self);
}

pub struct CachedList<T> {
    sender: watch::Sender<Vec<T>>,
}

impl<T: Identifiable + Clone> CachedList<T> {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Vec::new());
        Self { sender }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Vec<T> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.sender.subscribe()
    }

    pub fn len(&self) -> usize {
        self.sender.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sender.borrow().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.sender.borrow().iter().find(|item| item.id() == id).cloned()
    }

    pub fn prepend(&self, item: T) {
        self.sender.send_modify(|items| items.insert(0, item));
    }

    pub fn replace_all(&self, items: Vec<T>) {
        self.sender.send_replace(items);
    }

    /// Appends a page, keeping the first occurrence of every id.
    pub fn append_dedup(&self, page: Vec<T>) {
        self.sender.send_modify(|items| {
            items.extend(page);
            let mut seen = HashSet::new();
            items.retain(|item| seen.insert(item.id().to_string()));
        });
    }

    /// Replaces the entry with the same id. Absent ids are left alone.
    pub fn replace(&self, item: T) {
        self.sender.send_if_modified(|items| {
            match items.iter_mut().find(|existing| existing.id() == item.id()) {
                Some(existing) => {
                    *existing = item;
                    true
                }
                None => false,
            }
        });
    }

    pub fn remove(&self, id: &str) {
        self.sender.send_if_modified(|items| {
            let before = items.len();
            items.retain(|item| item.id() != id);
            items.len() != before
        });
    }

    pub fn clear(&self) {
        self.sender.send_replace(Vec::new());
    }
}

impl<T: Identifiable + Clone> Default for CachedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies a fetched page: the first page replaces the cache, later pages
/// are appended and deduplicated by id.
pub fn apply_page<T: Identifiable + Clone>(cache: &CachedList<T>, offset: u32, items: Vec<T>) {
    if offset == 0 {
        cache.replace_all(items);
    } else {
        cache.append_dedup(items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(&'static str, u32);

    impl Identifiable for Item {
        fn id(&self) -> &str {
            self.0
        }
    }

    fn ids(cache: &CachedList<Item>) -> Vec<&'static str> {
        cache.snapshot().iter().map(|i| i.0).collect()
    }

    #[test]
    fn test_apply_page_replaces_on_first_page() {
        let cache = CachedList::new();
        cache.replace_all(vec![Item("a", 0), Item("b", 0)]);
        apply_page(&cache, 0, vec![Item("c", 0)]);
        assert_eq!(ids(&cache), vec!["c"]);
    }

    #[test]
    fn test_apply_page_appends_without_duplicates() {
        let cache = CachedList::new();
        apply_page(&cache, 0, vec![Item("a", 0), Item("b", 0)]);
        apply_page(&cache, 2, vec![Item("c", 0), Item("d", 0)]);
        apply_page(&cache, 2, vec![Item("c", 0), Item("d", 0)]);
        assert_eq!(ids(&cache), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_replace_only_touches_existing_entries() {
        let cache = CachedList::new();
        cache.replace_all(vec![Item("a", 1)]);
        cache.replace(Item("a", 2));
        cache.replace(Item("z", 9));
        assert_eq!(cache.snapshot(), vec![Item("a", 2)]);
    }

    #[test]
    fn test_subscribers_see_changes() {
        let cache = CachedList::new();
        let mut rx = cache.subscribe();
        cache.prepend(Item("a", 0));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        cache.remove("missing");
        assert!(!rx.has_changed().unwrap());
    }
}
