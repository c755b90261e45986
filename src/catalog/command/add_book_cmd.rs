use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::{BookResponse, NewBookResponse};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) book: BookResponse,
}

impl AddBookCommandRequest {
    pub fn new(isbn: &str, title: &str, descr: &str) -> Self {
        Self {
            book: BookResponse::new(isbn, title, descr),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct AddBookCommandResponse {
    pub result: NewBookResponse,
}

impl AddBookCommandResponse {
    pub fn new(result: NewBookResponse) -> Self {
        Self {
            result,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        self.catalog_service.add_book(&req.book).await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}
