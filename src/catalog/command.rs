pub mod add_book_cmd;
pub mod get_book_cmd;
pub mod grid_books_cmd;
pub mod update_book_cmd;
