use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::catalog::grid::{GridRequest, GridResponse};
use crate::core::command::{Command, CommandError};

// GetBooksGridCommand answers the paginated, sorted and optionally filtered book grid
pub(crate) struct GetBooksGridCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl GetBooksGridCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct GetBooksGridCommandRequest {
    pub(crate) grid: GridRequest,
}

impl GetBooksGridCommandRequest {
    pub fn new(grid: GridRequest) -> Self {
        Self {
            grid,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct GetBooksGridCommandResponse {
    pub grid: GridResponse,
}

impl GetBooksGridCommandResponse {
    pub fn new(grid: GridResponse) -> Self {
        Self {
            grid,
        }
    }
}

#[async_trait]
impl Command<GetBooksGridCommandRequest, GetBooksGridCommandResponse> for GetBooksGridCommand {
    async fn execute(&self, req: GetBooksGridCommandRequest) -> Result<GetBooksGridCommandResponse, CommandError> {
        self.catalog_service.get_books_grid(Some(&req.grid))
            .await.map_err(CommandError::from).map(GetBooksGridCommandResponse::new)
    }
}
