use std::collections::HashMap;
use tokio::sync::RwLock;
use crate::books::dto::BookResponse;

// PageKey identifies a cached grid page: zero-based page index plus page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct PageKey {
    pub index: usize,
    pub per_page: usize,
}

impl PageKey {
    pub fn new(index: usize, per_page: usize) -> Self {
        Self { index, per_page }
    }
}

// PageCache keeps unfiltered grid pages in store order for the life of the process.
// Only full pages are stored and nothing is evicted. Callers do get, fetch and put as
// separate steps, so concurrent misses for one page may both read the store.
#[derive(Debug, Default)]
pub(crate) struct PageCache {
    pages: RwLock<HashMap<PageKey, Vec<BookResponse>>>,
}

impl PageCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn get(&self, key: &PageKey) -> Option<Vec<BookResponse>> {
        self.pages.read().await.get(key).cloned()
    }

    // stores the page only when it is full, returns whether it was stored
    pub(crate) async fn put(&self, key: PageKey, page: Vec<BookResponse>) -> bool {
        if page.len() != key.per_page {
            return false;
        }
        self.pages.write().await.insert(key, page);
        true
    }

    // replaces the book in every cached page that holds it, returns how many pages changed
    pub(crate) async fn refresh(&self, book: &BookResponse) -> usize {
        let mut pages = self.pages.write().await;
        let mut changed = 0;
        for page in pages.values_mut() {
            if let Some(existing) = page.iter_mut().find(|b| b.book_id == book.book_id) {
                *existing = book.clone();
                changed += 1;
            }
        }
        changed
    }

    // Legacy invalidation driven by the page index the client was viewing: for each cached
    // page at that index the book is removed and the new projection appended, even when it
    // was never on that page. Other pages keep their stale copy.
    pub(crate) async fn invalidate(&self, page_index: usize, book: &BookResponse) -> usize {
        let mut pages = self.pages.write().await;
        let mut changed = 0;
        for (_, page) in pages.iter_mut().filter(|(key, _)| key.index == page_index) {
            page.retain(|b| b.book_id != book.book_id);
            page.push(book.clone());
            changed += 1;
        }
        changed
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.pages.read().await.len()
    }
}
