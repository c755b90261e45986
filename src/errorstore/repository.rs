pub mod ddb_error_repository;
#[cfg(test)]
pub mod memory_error_repository;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::errorstore::domain::model::ErrorEntity;

#[async_trait]
pub(crate) trait ErrorRepository: Sync + Send {
    async fn create(&self, entity: &ErrorEntity) -> LibraryResult<usize>;
}
