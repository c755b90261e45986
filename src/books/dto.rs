use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;

// BookResponse is the wire projection of a book used by the grid and the edit form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookResponse {
    #[serde(default)]
    pub book_id: i64,
    pub title: String,
    pub isbn: String,
    #[serde(default)]
    pub published_date: String,
    #[serde(default)]
    pub descr: String,
    #[serde(default)]
    pub thumbnail_url: String,
}

impl BookResponse {
    pub fn new(isbn: &str, title: &str, descr: &str) -> Self {
        Self {
            book_id: 0,
            title: title.to_string(),
            isbn: isbn.to_string(),
            published_date: String::new(),
            descr: descr.to_string(),
            thumbnail_url: String::new(),
        }
    }
}

// NewBookResponse reports whether an add was accepted, is_valid is false for a duplicate isbn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewBookResponse {
    pub is_valid: bool,
    pub is_successful: bool,
}

impl NewBookResponse {
    pub fn duplicate() -> Self {
        Self { is_valid: false, is_successful: false }
    }

    pub fn added() -> Self {
        Self { is_valid: true, is_successful: true }
    }
}

// UpdateBookRequest is an edited book plus the 1-based grid page the client was viewing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateBookRequest {
    #[serde(flatten)]
    pub book: BookResponse,
    #[serde(default)]
    pub page_num: i64,
}

impl UpdateBookRequest {
    pub fn new(book: BookResponse, page_num: i64) -> Self {
        Self { book, page_num }
    }
}

impl Identifiable for BookResponse {
    fn id(&self) -> i64 {
        self.book_id
    }
}

impl Book for BookResponse {
    fn isbn(&self) -> &str {
        self.isbn.as_str()
    }

    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn short_descr(&self) -> &str {
        self.descr.as_str()
    }
}

impl From<&BookEntity> for BookResponse {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id,
            title: other.title.to_string(),
            isbn: other.isbn.to_string(),
            published_date: other.published_date.to_string(),
            descr: other.short_descr.to_string(),
            thumbnail_url: other.thumbnail_url.to_string(),
        }
    }
}

impl From<&BookResponse> for BookEntity {
    fn from(other: &BookResponse) -> Self {
        Self {
            book_id: other.book_id,
            isbn: other.isbn.to_string(),
            title: other.title.to_string(),
            short_descr: other.descr.to_string(),
            long_descr: String::new(),
            published_date: other.published_date.to_string(),
            thumbnail_url: other.thumbnail_url.to_string(),
        }
    }
}
