use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::core::library::LibraryResult;
use crate::errorstore::domain::model::ErrorEntity;
use crate::errorstore::repository::ErrorRepository;

#[derive(Debug, Default)]
pub(crate) struct MemoryErrorRepository {
    errors: RwLock<Vec<ErrorEntity>>,
}

impl MemoryErrorRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn recorded(&self) -> Vec<ErrorEntity> {
        self.errors.read().await.clone()
    }
}

#[async_trait]
impl ErrorRepository for MemoryErrorRepository {
    async fn create(&self, entity: &ErrorEntity) -> LibraryResult<usize> {
        self.errors.write().await.push(entity.clone());
        Ok(1)
    }
}

// lets a test keep a handle on the repository it hands to a service
#[async_trait]
impl ErrorRepository for Arc<MemoryErrorRepository> {
    async fn create(&self, entity: &ErrorEntity) -> LibraryResult<usize> {
        (**self).create(entity).await
    }
}
