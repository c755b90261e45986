use async_trait::async_trait;
use tracing::debug;
use crate::core::library::LibraryResult;
use crate::errorstore::domain::ErrorStoreService;
use crate::errorstore::domain::model::ErrorEntity;
use crate::errorstore::repository::ErrorRepository;

pub(crate) struct ErrorStoreServiceImpl {
    error_repository: Box<dyn ErrorRepository>,
}

impl ErrorStoreServiceImpl {
    pub(crate) fn new(error_repository: Box<dyn ErrorRepository>) -> Self {
        Self {
            error_repository,
        }
    }
}

#[async_trait]
impl ErrorStoreService for ErrorStoreServiceImpl {
    async fn record_exception(&self, message: &str, details: &str, body: &str) -> LibraryResult<()> {
        let entity = ErrorEntity::new(message, details, body);
        self.error_repository.create(&entity).await?;
        debug!(error_id = entity.error_id.as_str(), "recorded error");
        Ok(())
    }
}
