use std::sync::Arc;
use axum::http::StatusCode;
use tracing::warn;
use crate::catalog::cache::PageCache;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::errorstore::domain::ErrorStoreService;
use crate::errorstore::factory::create_error_store_service;

// AppState is shared by every handler. The page cache lives as long as the process.
#[derive(Debug, Clone)]
pub(crate) struct AppState {
    pub(crate) config: Configuration,
    pub(crate) store: RepositoryStore,
    pub(crate) page_cache: Arc<PageCache>,
}

impl AppState {
    pub fn new(config: Configuration, store: RepositoryStore) -> AppState {
        AppState {
            config,
            store,
            page_cache: Arc::new(PageCache::new()),
        }
    }
}

pub(crate) type ServerError = (StatusCode, String);

// Records the failure together with the request body and answers a bare 400.
pub(crate) async fn reject(state: &AppState, err: &CommandError, body: &str) -> ServerError {
    let error_store = create_error_store_service(state.store).await;
    record_failure(error_store.as_ref(), err, body).await
}

pub(crate) async fn record_failure(error_store: &dyn ErrorStoreService, err: &CommandError, body: &str) -> ServerError {
    warn!(error = err.message(), "request failed");
    if let Err(record_err) = error_store.record_exception(err.message(), format!("{:?}", err).as_str(), body).await {
        warn!(error = %record_err, "failed to record error");
    }
    (StatusCode::BAD_REQUEST, String::new())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use crate::core::command::CommandError;
    use crate::core::controller::{record_failure, AppState};
    use crate::core::domain::Configuration;
    use crate::core::library::{LibraryError, LibraryResult};
    use crate::core::repository::RepositoryStore;
    use crate::errorstore::domain::ErrorStoreService;
    use crate::errorstore::domain::service::ErrorStoreServiceImpl;
    use crate::errorstore::repository::memory_error_repository::MemoryErrorRepository;

    struct UnavailableErrorStore {}

    #[async_trait]
    impl ErrorStoreService for UnavailableErrorStore {
        async fn record_exception(&self, _message: &str, _details: &str, _body: &str) -> LibraryResult<()> {
            Err(LibraryError::unavailable("error store is down", None, true))
        }
    }

    #[tokio::test]
    async fn test_should_record_and_reject() {
        let repo = Arc::new(MemoryErrorRepository::new());
        let error_store = ErrorStoreServiceImpl::new(Box::new(repo.clone()));
        let err = CommandError::from(LibraryError::not_found("Invalid Book Id - 9"));
        let (status, body) = record_failure(&error_store, &err, "{\"bookId\":9}").await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert!(body.is_empty());

        let recorded = repo.recorded().await;
        assert_eq!(1, recorded.len());
        assert_eq!("Invalid Book Id - 9", recorded[0].error_message.as_str());
        assert!(recorded[0].details.starts_with("NotFound"));
        assert_eq!("{\"bookId\":9}", recorded[0].body.as_str());
    }

    #[tokio::test]
    async fn test_should_reject_when_recording_fails() {
        let err = CommandError::from(LibraryError::invalid_argument("grid request is missing"));
        let (status, _) = record_failure(&UnavailableErrorStore {}, &err, "").await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
    }

    #[tokio::test]
    async fn test_should_share_page_cache() {
        let state = AppState::new(Configuration::new("test"), RepositoryStore::LocalDynamoDB);
        let copy = state.clone();
        assert!(Arc::ptr_eq(&state.page_cache, &copy.page_cache));
    }
}
