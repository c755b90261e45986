use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::{BookResponse, UpdateBookRequest};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct UpdateBookCommandRequest {
    pub(crate) request: UpdateBookRequest,
}

impl UpdateBookCommandRequest {
    pub fn new(book: BookResponse, page_num: i64) -> Self {
        Self {
            request: UpdateBookRequest::new(book, page_num),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct UpdateBookCommandResponse {
    pub updated: bool,
}

impl UpdateBookCommandResponse {
    pub fn new(updated: bool) -> Self {
        Self {
            updated,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        self.catalog_service.update_book(&req.request.book, req.request.page_num)
            .await.map_err(CommandError::from).map(UpdateBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::books::dto::BookResponse;
    use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_run_update_book() {
        let books = vec![BookEntity::new("isbn", "test book", "descr").with_id(1)];
        let svc = factory::create_memory_catalog_service(&Configuration::new("test"), books).await;
        let update_cmd = UpdateBookCommand::new(svc);

        let mut book = BookResponse::new("isbn", "new title", "new descr");
        book.book_id = 1;
        let res = update_cmd.execute(UpdateBookCommandRequest::new(book.clone(), 1)).await.expect("should update book");
        assert!(res.updated);
        assert_eq!("true", serde_json::to_string(&res).expect("should serialize"));

        book.book_id = 2;
        let err = update_cmd.execute(UpdateBookCommandRequest::new(book, 1)).await.expect_err("should fail");
        assert!(matches!(err, CommandError::NotFound { .. }));
    }
}
