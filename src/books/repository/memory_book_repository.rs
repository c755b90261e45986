use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

// MemoryBookRepository keeps books in a BTreeMap keyed by book_id so listings come back in
// id order like the DynamoDB table. `page_reads` counts paged store round trips.
#[derive(Debug, Default)]
pub(crate) struct MemoryBookRepository {
    books: RwLock<BTreeMap<i64, BookEntity>>,
    page_reads: AtomicUsize,
}

impl MemoryBookRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // inserts books with the ids they already carry, used to seed sparse id layouts
    pub(crate) async fn seed(&self, books: Vec<BookEntity>) {
        let mut map = self.books.write().await;
        for book in books {
            map.insert(book.book_id, book);
        }
    }

    pub(crate) fn page_reads(&self) -> usize {
        self.page_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let mut map = self.books.write().await;
        let next_id = map.keys().next_back().map(|id| id + 1).unwrap_or(1);
        let book = entity.clone().with_id(next_id);
        map.insert(next_id, book.clone());
        Ok(book)
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut map = self.books.write().await;
        match map.get_mut(&entity.book_id) {
            Some(existing) => {
                *existing = entity.clone();
                Ok(1)
            }
            None => Err(LibraryError::not_found(format!("book not found for {}", entity.book_id).as_str())),
        }
    }

    async fn find(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        Ok(self.books.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn count(&self) -> LibraryResult<i64> {
        Ok(self.books.read().await.len() as i64)
    }

    async fn take_first(&self, limit: usize) -> LibraryResult<Vec<BookEntity>> {
        self.page_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.books.read().await.values().take(limit).cloned().collect())
    }

    async fn range_from_id(&self, min_id: i64, limit: usize) -> LibraryResult<Vec<BookEntity>> {
        self.page_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.books.read().await.range(min_id..).map(|(_, b)| b.clone()).take(limit).collect())
    }

    async fn skip_take(&self, offset: usize, limit: usize) -> LibraryResult<Vec<BookEntity>> {
        self.page_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.books.read().await.values().skip(offset).take(limit).cloned().collect())
    }

    async fn substring_match(&self, text: &str) -> LibraryResult<Vec<BookEntity>> {
        let needle = text.to_lowercase();
        Ok(self.books.read().await.values().filter(|b| b.matches(needle.as_str())).cloned().collect())
    }

    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>> {
        let isbn = isbn.to_lowercase();
        Ok(self.books.read().await.values().find(|b| b.isbn.to_lowercase() == isbn).cloned())
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.books.read().await.values().cloned().collect())
    }
}

// lets a test keep a handle on the repository it hands to a service
#[async_trait]
impl Repository<BookEntity> for Arc<MemoryBookRepository> {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        (**self).create(entity).await
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        (**self).update(entity).await
    }

    async fn find(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        (**self).find(id).await
    }
}

#[async_trait]
impl BookRepository for Arc<MemoryBookRepository> {
    async fn count(&self) -> LibraryResult<i64> {
        (**self).count().await
    }

    async fn take_first(&self, limit: usize) -> LibraryResult<Vec<BookEntity>> {
        (**self).take_first(limit).await
    }

    async fn range_from_id(&self, min_id: i64, limit: usize) -> LibraryResult<Vec<BookEntity>> {
        (**self).range_from_id(min_id, limit).await
    }

    async fn skip_take(&self, offset: usize, limit: usize) -> LibraryResult<Vec<BookEntity>> {
        (**self).skip_take(offset, limit).await
    }

    async fn substring_match(&self, text: &str) -> LibraryResult<Vec<BookEntity>> {
        (**self).substring_match(text).await
    }

    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>> {
        (**self).find_by_isbn(isbn).await
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        (**self).find_all().await
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    use crate::core::repository::Repository;

    #[tokio::test]
    async fn test_should_assign_dense_ids() {
        let repo = MemoryBookRepository::new();
        for i in 0..5 {
            let book = repo.create(&BookEntity::new(format!("isbn_{}", i).as_str(), "title", "descr"))
                .await.expect("should create book");
            assert_eq!(i + 1, book.book_id);
        }
        assert_eq!(5, repo.count().await.expect("should count"));
    }

    #[tokio::test]
    async fn test_should_range_and_skip() {
        let repo = MemoryBookRepository::new();
        for i in 0..15 {
            let _ = repo.create(&BookEntity::new(format!("isbn_{}", i).as_str(), "title", "descr")).await;
        }
        let range = repo.range_from_id(11, 10).await.expect("should range");
        assert_eq!(vec![11, 12, 13, 14, 15], range.iter().map(|b| b.book_id).collect::<Vec<i64>>());
        let page = repo.skip_take(10, 10).await.expect("should skip");
        assert_eq!(5, page.len());
        assert_eq!(2, repo.page_reads());
    }
}
