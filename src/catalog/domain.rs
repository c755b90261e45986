pub mod service;

use async_trait::async_trait;
use crate::books::dto::{BookResponse, NewBookResponse};
use crate::catalog::grid::{GridRequest, GridResponse};
use crate::core::library::LibraryResult;

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn find_books(&self) -> LibraryResult<Vec<BookResponse>>;

    // every book when the filter is empty
    async fn find_filtered_books(&self, filter: &str) -> LibraryResult<Vec<BookResponse>>;

    async fn find_book_by_id(&self, id: i64) -> LibraryResult<BookResponse>;

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookResponse>>;

    // a duplicate isbn is reported in the response, not as an error
    async fn add_book(&self, book: &BookResponse) -> LibraryResult<NewBookResponse>;

    // page_num is the 1-based grid page the client was viewing
    async fn update_book(&self, book: &BookResponse, page_num: i64) -> LibraryResult<bool>;

    async fn get_books_grid(&self, request: Option<&GridRequest>) -> LibraryResult<GridResponse>;

    // one sorted page of the unfiltered listing, served from the page cache when possible
    async fn fetch_page(&self, request: Option<&GridRequest>) -> LibraryResult<Vec<BookResponse>>;

    // match count and one sorted page of the books matching the filter
    async fn fetch_filtered(&self, filter: &str, request: Option<&GridRequest>) -> LibraryResult<(i64, Vec<BookResponse>)>;
}
