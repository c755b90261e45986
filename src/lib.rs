pub mod books;
pub mod catalog;
pub mod core;
pub mod errorstore;
pub mod utils;
