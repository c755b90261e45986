use std::sync::Arc;
use crate::books::factory;
use crate::catalog::cache::PageCache;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;

pub(crate) async fn create_catalog_service(config: &Configuration, store: RepositoryStore,
                                           page_cache: Arc<PageCache>) -> Box<dyn CatalogService> {
    let book_repo = factory::create_book_repository(config, store).await;
    Box::new(CatalogServiceImpl::new(config, book_repo, page_cache))
}

// catalog service over an in-memory store seeded with `books`
#[cfg(test)]
pub(crate) async fn create_memory_catalog_service(config: &Configuration,
                                                  books: Vec<crate::books::domain::model::BookEntity>) -> Box<dyn CatalogService> {
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    let book_repo = MemoryBookRepository::new();
    book_repo.seed(books).await;
    Box::new(CatalogServiceImpl::new(config, Box::new(book_repo), Arc::new(PageCache::new())))
}
