use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity, returns it with the store-assigned id
    async fn create(&self, entity: &Entity) -> LibraryResult<Entity>;

    // updates an entity
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // find an entity by its id
    async fn find(&self, id: i64) -> LibraryResult<Option<Entity>>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
}
