use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> i64;
}

// PaginationMode selects how unfiltered grid pages are read from the book store
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum PaginationMode {
    // true row offset in ascending book_id order
    RowOffset,
    // page n > 1 starts at book_id (n - 2) * per_page + 1; only correct for dense,
    // gapless ids and kept for parity with the legacy listing
    IdOffset,
}

// CacheInvalidation selects what a book update does to cached grid pages
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum CacheInvalidation {
    // replace the book in every cached page that holds it
    Refresh,
    // trust the page number sent by the client: drop the book from that page and append it
    ClientPage,
}

// Configuration abstracts config options for the catalog
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub catalog_id: String,
    pub pagination: PaginationMode,
    pub cache_invalidation: CacheInvalidation,
    pub scan_page_size: usize,
}

impl Configuration {
    pub fn new(catalog_id: &str) -> Self {
        Configuration {
            catalog_id: catalog_id.to_string(),
            pagination: PaginationMode::RowOffset,
            cache_invalidation: CacheInvalidation::Refresh,
            scan_page_size: 500,
        }
    }

    // reads TECHLIB_PAGINATION, TECHLIB_CACHE_INVALIDATION and TECHLIB_SCAN_PAGE_SIZE on top
    // of the defaults
    pub fn from_env(catalog_id: &str) -> LibraryResult<Self> {
        let mut config = Configuration::new(catalog_id);
        if let Ok(val) = std::env::var("TECHLIB_PAGINATION") {
            config.pagination = match val.to_lowercase().as_str() {
                "row" => PaginationMode::RowOffset,
                "id" => PaginationMode::IdOffset,
                other => {
                    return Err(LibraryError::validation(
                        format!("unknown pagination mode {}", other).as_str(), None));
                }
            };
        }
        if let Ok(val) = std::env::var("TECHLIB_CACHE_INVALIDATION") {
            config.cache_invalidation = match val.to_lowercase().as_str() {
                "refresh" => CacheInvalidation::Refresh,
                "client" => CacheInvalidation::ClientPage,
                other => {
                    return Err(LibraryError::validation(
                        format!("unknown cache invalidation {}", other).as_str(), None));
                }
            };
        }
        if let Ok(val) = std::env::var("TECHLIB_SCAN_PAGE_SIZE") {
            config.scan_page_size = val.parse::<usize>().ok().filter(|n| *n > 0).ok_or_else(|| {
                LibraryError::validation(format!("invalid scan page size {}", val).as_str(), None)
            })?;
        }
        Ok(config)
    }

    pub fn with_pagination(mut self, pagination: PaginationMode) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_cache_invalidation(mut self, cache_invalidation: CacheInvalidation) -> Self {
        self.cache_invalidation = cache_invalidation;
        self
    }
}
