pub mod ddb_book_repository;
#[cfg(test)]
pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

// BookRepository is the book store. Every listing returns records in ascending book_id order.
#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    // number of books in the store
    async fn count(&self) -> LibraryResult<i64>;

    // first `limit` books
    async fn take_first(&self, limit: usize) -> LibraryResult<Vec<BookEntity>>;

    // up to `limit` books with book_id >= min_id
    async fn range_from_id(&self, min_id: i64, limit: usize) -> LibraryResult<Vec<BookEntity>>;

    // up to `limit` books after skipping `offset` rows
    async fn skip_take(&self, offset: usize, limit: usize) -> LibraryResult<Vec<BookEntity>>;

    // every book whose title or short description contains `text`, ignoring case
    async fn substring_match(&self, text: &str) -> LibraryResult<Vec<BookEntity>>;

    // first book with the given isbn, ignoring case
    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>>;

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>>;
}
