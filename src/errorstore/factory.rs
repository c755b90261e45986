use crate::core::repository::RepositoryStore;
use crate::errorstore::domain::ErrorStoreService;
use crate::errorstore::domain::service::ErrorStoreServiceImpl;
use crate::errorstore::repository::ErrorRepository;
use crate::errorstore::repository::ddb_error_repository::DDBErrorRepository;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_error_repository(store: RepositoryStore) -> Box<dyn ErrorRepository> {
    let client = build_db_client(store).await;
    if store == RepositoryStore::LocalDynamoDB {
        let _ = create_table(&client, "error_store", "error_id", None).await;
    }
    Box::new(DDBErrorRepository::new(client, "error_store"))
}

pub(crate) async fn create_error_store_service(store: RepositoryStore) -> Box<dyn ErrorStoreService> {
    Box::new(ErrorStoreServiceImpl::new(create_error_repository(store).await))
}
