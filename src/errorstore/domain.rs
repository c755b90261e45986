pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::library::LibraryResult;

// ErrorStoreService keeps failures seen at the request boundary so they can be inspected later
#[async_trait]
pub(crate) trait ErrorStoreService: Sync + Send {
    async fn record_exception(&self, message: &str, details: &str, body: &str) -> LibraryResult<()>;
}
