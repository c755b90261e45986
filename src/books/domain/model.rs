use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;

// BookEntity is a catalog record. book_id is assigned by the store on insert, the isbn is
// the external catalog identifier and is only kept unique by the catalog service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookEntity {
    pub book_id: i64,
    pub isbn: String,
    pub title: String,
    pub short_descr: String,
    pub long_descr: String,
    // free-form, the store does not interpret it as a date
    pub published_date: String,
    pub thumbnail_url: String,
}

impl BookEntity {
    pub fn new(isbn: &str, title: &str, short_descr: &str) -> Self {
        Self {
            book_id: 0,
            isbn: isbn.to_string(),
            title: title.to_string(),
            short_descr: short_descr.to_string(),
            long_descr: String::new(),
            published_date: String::new(),
            thumbnail_url: String::new(),
        }
    }

    pub fn with_id(mut self, book_id: i64) -> Self {
        self.book_id = book_id;
        self
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> i64 {
        self.book_id
    }
}

impl Book for BookEntity {
    fn isbn(&self) -> &str {
        self.isbn.as_str()
    }

    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn short_descr(&self) -> &str {
        self.short_descr.as_str()
    }
}
