use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::dto::BookResponse;
use crate::core::library::{LibraryError, LibraryResult};

// GridRequest carries the pagination, sort and filter parameters sent by the book grid.
// `sort_by` is accepted for wire compatibility but the grid always sorts by isbn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GridRequest {
    #[serde(default)]
    pub current_page: i64,
    #[serde(default)]
    pub per_page: i64,
    #[serde(default)]
    pub sort_by: String,
    #[serde(default)]
    pub sort_desc: bool,
    #[serde(default)]
    pub filter: Option<String>,
}

impl GridRequest {
    #[cfg(test)]
    pub fn new(current_page: i64, per_page: i64) -> Self {
        Self {
            current_page,
            per_page,
            sort_by: "isbn".to_string(),
            sort_desc: false,
            filter: None,
        }
    }

    #[cfg(test)]
    pub fn descending(mut self) -> Self {
        self.sort_desc = true;
        self
    }

    #[cfg(test)]
    pub fn filtered(mut self, filter: &str) -> Self {
        self.filter = Some(filter.to_string());
        self
    }

    // the filter text when it is present and non-empty
    pub fn filter_text(&self) -> Option<&str> {
        self.filter.as_deref().filter(|f| !f.is_empty())
    }

    // zero-based page index and page size, None when either parameter is not positive
    pub fn page_bounds(&self) -> Option<(usize, usize)> {
        if self.per_page <= 0 || self.current_page <= 0 {
            return None;
        }
        Some(((self.current_page - 1) as usize, self.per_page as usize))
    }
}

// GridResponse is one page of the grid. total_books is the unpaginated match count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GridResponse {
    pub total_books: i64,
    pub book_responses: Vec<BookResponse>,
}

impl GridResponse {
    pub fn new(total_books: i64, book_responses: Vec<BookResponse>) -> Self {
        Self {
            total_books,
            book_responses,
        }
    }
}

// Builds a grid page from a collection that is already filtered. Malformed requests and
// empty collections give an empty response instead of an error; a page past the end gives
// an empty page with the full total.
pub(crate) fn compute_grid<T>(request: Option<&GridRequest>, all_books: Option<&[T]>) -> GridResponse
    where T: Book + Clone, BookResponse: for<'a> From<&'a T> {
    let (request, all_books) = match (request, all_books) {
        (Some(request), Some(all_books)) if !all_books.is_empty() => (request, all_books),
        _ => return GridResponse::default(),
    };
    let Some((page_index, per_page)) = request.page_bounds() else {
        return GridResponse::default();
    };

    let selected: Vec<T> = all_books.iter()
        .skip(per_page.saturating_mul(page_index))
        .take(per_page)
        .cloned()
        .collect();

    let ordered = sort_page(selected, request);
    GridResponse::new(all_books.len() as i64, ordered.iter().map(|b| BookResponse::from(b)).collect())
}

// Orders books by isbn, comparing the strings bytewise. The sort is stable in both
// directions so equal isbns keep their input order.
pub(crate) fn sort_books<T: Book>(books: Option<Vec<T>>, request: Option<&GridRequest>) -> LibraryResult<Vec<T>> {
    match (books, request) {
        (Some(books), Some(request)) => Ok(sort_page(books, request)),
        (None, _) => Err(LibraryError::invalid_argument("books to sort are missing")),
        (_, None) => Err(LibraryError::invalid_argument("grid request is missing")),
    }
}

pub(crate) fn sort_page<T: Book>(mut books: Vec<T>, request: &GridRequest) -> Vec<T> {
    if request.sort_desc {
        books.sort_by(|a, b| b.isbn().cmp(a.isbn()));
    } else {
        books.sort_by(|a, b| a.isbn().cmp(b.isbn()));
    }
    books
}
