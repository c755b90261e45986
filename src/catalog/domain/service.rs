use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, info};
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookResponse, NewBookResponse};
use crate::books::repository::BookRepository;
use crate::catalog::cache::{PageCache, PageKey};
use crate::catalog::domain::CatalogService;
use crate::catalog::grid::{compute_grid, sort_books, GridRequest, GridResponse};
use crate::core::domain::{CacheInvalidation, Configuration, PaginationMode};
use crate::core::library::{LibraryError, LibraryResult};

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
    page_cache: Arc<PageCache>,
    pagination: PaginationMode,
    cache_invalidation: CacheInvalidation,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>,
                      page_cache: Arc<PageCache>) -> Self {
        Self {
            book_repository,
            page_cache,
            pagination: config.pagination,
            cache_invalidation: config.cache_invalidation,
        }
    }

    async fn read_page(&self, page_index: usize, per_page: usize) -> LibraryResult<Vec<BookEntity>> {
        match self.pagination {
            PaginationMode::RowOffset => {
                self.book_repository.skip_take(page_index.saturating_mul(per_page), per_page).await
            }
            PaginationMode::IdOffset if page_index == 0 => {
                self.book_repository.take_first(per_page).await
            }
            PaginationMode::IdOffset => {
                // page n starts at id (n - 2) * per_page + 1, no such id past i64::MAX
                let min_id = (page_index - 1).checked_mul(per_page)
                    .and_then(|n| i64::try_from(n).ok())
                    .and_then(|n| n.checked_add(1));
                match min_id {
                    Some(min_id) => self.book_repository.range_from_id(min_id, per_page).await,
                    None => Ok(vec![]),
                }
            }
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn find_books(&self) -> LibraryResult<Vec<BookResponse>> {
        let books = self.book_repository.find_all().await?;
        Ok(books.iter().map(BookResponse::from).collect())
    }

    async fn find_filtered_books(&self, filter: &str) -> LibraryResult<Vec<BookResponse>> {
        if filter.is_empty() {
            return self.find_books().await;
        }
        let books = self.book_repository.substring_match(filter).await?;
        Ok(books.iter().map(BookResponse::from).collect())
    }

    async fn find_book_by_id(&self, id: i64) -> LibraryResult<BookResponse> {
        match self.book_repository.find(id).await? {
            Some(book) => Ok(BookResponse::from(&book)),
            None => Err(LibraryError::not_found(format!("Invalid Book Id - {}", id).as_str())),
        }
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookResponse>> {
        if isbn.is_empty() {
            return Err(LibraryError::invalid_argument("isbn is empty"));
        }
        let book = self.book_repository.find_by_isbn(isbn).await?;
        Ok(book.as_ref().map(BookResponse::from))
    }

    async fn add_book(&self, book: &BookResponse) -> LibraryResult<NewBookResponse> {
        if self.find_book_by_isbn(book.isbn.as_str()).await?.is_some() {
            info!(isbn = book.isbn.as_str(), "rejected book with duplicate isbn");
            return Ok(NewBookResponse::duplicate());
        }
        let mut entity = BookEntity::from(book);
        entity.book_id = 0;
        let saved = self.book_repository.create(&entity).await?;
        info!(book_id = saved.book_id, "added book");
        Ok(NewBookResponse::added())
    }

    async fn update_book(&self, book: &BookResponse, page_num: i64) -> LibraryResult<bool> {
        let mut entity = match self.book_repository.find(book.book_id).await? {
            Some(entity) => entity,
            None => {
                return Err(LibraryError::not_found(format!("Invalid Book Id - {}", book.book_id).as_str()));
            }
        };
        entity.title = book.title.to_string();
        entity.short_descr = book.descr.to_string();
        entity.published_date = book.published_date.to_string();
        self.book_repository.update(&entity).await?;

        let updated = BookResponse::from(&entity);
        let changed = match self.cache_invalidation {
            CacheInvalidation::Refresh => self.page_cache.refresh(&updated).await,
            CacheInvalidation::ClientPage if page_num > 0 => {
                self.page_cache.invalidate((page_num - 1) as usize, &updated).await
            }
            CacheInvalidation::ClientPage => 0,
        };
        info!(book_id = entity.book_id, cached_pages = changed, "updated book");
        Ok(true)
    }

    async fn get_books_grid(&self, request: Option<&GridRequest>) -> LibraryResult<GridResponse> {
        let Some(request) = request else {
            return Ok(GridResponse::default());
        };
        if let Some(filter) = request.filter_text() {
            let (total, page) = self.fetch_filtered(filter, Some(request)).await?;
            return Ok(GridResponse::new(total, page));
        }

        let total = self.book_repository.count().await?;
        if total <= 0 || request.page_bounds().is_none() {
            return Ok(GridResponse::default());
        }
        let page = self.fetch_page(Some(request)).await?;
        Ok(GridResponse::new(total, page))
    }

    async fn fetch_page(&self, request: Option<&GridRequest>) -> LibraryResult<Vec<BookResponse>> {
        let request = request.ok_or_else(|| LibraryError::invalid_argument("grid request is missing"))?;
        let Some((page_index, per_page)) = request.page_bounds() else {
            return Ok(vec![]);
        };

        let key = PageKey::new(page_index, per_page);
        if let Some(page) = self.page_cache.get(&key).await {
            debug!(page_index, per_page, "grid page served from cache");
            return sort_books(Some(page), Some(request));
        }

        let books = self.read_page(page_index, per_page).await?;
        let page: Vec<BookResponse> = books.iter().map(BookResponse::from).collect();
        if self.page_cache.put(key, page.clone()).await {
            debug!(page_index, per_page, "grid page cached");
        }
        sort_books(Some(page), Some(request))
    }

    async fn fetch_filtered(&self, filter: &str, request: Option<&GridRequest>) -> LibraryResult<(i64, Vec<BookResponse>)> {
        if filter.is_empty() {
            return Err(LibraryError::invalid_argument("filter text is empty"));
        }
        let request = request.ok_or_else(|| LibraryError::invalid_argument("grid request is missing"))?;
        let matches = self.book_repository.substring_match(filter).await?;
        let grid = compute_grid(Some(request), Some(&matches[..]));
        Ok((grid.total_books, grid.book_responses))
    }
}
