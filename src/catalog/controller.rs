use axum::extract::{Path, State};
use axum::response::Json;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::info;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::grid_books_cmd::{GetBooksGridCommand, GetBooksGridCommandRequest, GetBooksGridCommandResponse};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest, UpdateBookCommandResponse};
use crate::catalog::domain::CatalogService;
use crate::catalog::factory;
use crate::core::command::{Command, CommandError};
use crate::core::controller::{reject, AppState, ServerError};

async fn build_service(state: &AppState) -> Box<dyn CatalogService> {
    factory::create_catalog_service(&state.config, state.store, state.page_cache.clone()).await
}

// Parses the body, runs the command and turns any failure into a recorded rejection.
async fn run_command<Req, Res, Cmd>(state: &AppState, body: String,
                                    build: fn(Box<dyn CatalogService>) -> Cmd) -> Result<Json<Res>, ServerError>
    where Req: DeserializeOwned + Send + 'static, Res: Serialize + Send, Cmd: Command<Req, Res> + Send + Sync {
    let outcome = match serde_json::from_str::<Req>(body.as_str()) {
        Ok(req) => build(build_service(state).await).execute(req).await,
        Err(err) => Err(CommandError::from(err)),
    };
    match outcome {
        Ok(res) => Ok(Json(res)),
        Err(err) => Err(reject(state, &err, body.as_str()).await),
    }
}

pub(crate) async fn get_books_grid(
    State(state): State<AppState>,
    body: String) -> Result<Json<GetBooksGridCommandResponse>, ServerError> {
    info!("get books grid");
    run_command::<GetBooksGridCommandRequest, _, _>(&state, body, GetBooksGridCommand::new).await
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    body: String) -> Result<Json<AddBookCommandResponse>, ServerError> {
    info!("add a new book");
    run_command::<AddBookCommandRequest, _, _>(&state, body, AddBookCommand::new).await
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    body: String) -> Result<Json<UpdateBookCommandResponse>, ServerError> {
    info!("update book");
    run_command::<UpdateBookCommandRequest, _, _>(&state, body, UpdateBookCommand::new).await
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    info!(book_id = book_id.as_str(), "get book by id");
    // a non-numeric id fails to parse and is recorded like any other bad request
    let body = match book_id.parse::<i64>() {
        Ok(id) => json!({ "bookId": id }),
        Err(_) => json!({ "bookId": book_id }),
    };
    run_command::<GetBookCommandRequest, _, _>(&state, body.to_string(), GetBookCommand::new).await
}
