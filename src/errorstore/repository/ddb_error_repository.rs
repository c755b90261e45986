use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use crate::core::library::{LibraryError, LibraryResult};
use crate::errorstore::domain::model::ErrorEntity;
use crate::errorstore::repository::ErrorRepository;
use crate::utils::ddb::parse_item;

#[derive(Debug)]
pub struct DDBErrorRepository {
    client: Client,
    table_name: String,
}

impl DDBErrorRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl ErrorRepository for DDBErrorRepository {
    async fn create(&self, entity: &ErrorEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(error_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;
    use crate::core::repository::RepositoryStore;
    use crate::errorstore::domain::model::ErrorEntity;
    use crate::errorstore::repository::ddb_error_repository::DDBErrorRepository;
    use crate::errorstore::repository::ErrorRepository;
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "error_store_test").await;
                let _ = create_table(&client, "error_store_test", "error_id", None).await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local"]
    async fn test_should_record_error_in_ddb() {
        let error_repo = DDBErrorRepository::new(CLIENT.get().await.clone(), "error_store_test");
        let err = ErrorEntity::new("book not found", "NotFound", "{}");
        assert_eq!(1, error_repo.create(&err).await.expect("should record error"));
        // error ids are unique
        assert!(error_repo.create(&err).await.is_err());
    }
}
