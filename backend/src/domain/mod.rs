//! Domain primitives, services and ports.
//!
//! Purpose: Define the book log model and the use-cases that operate on it,
//! independent of HTTP, SQL and the metadata service.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure.
//! - ErrorCode (alias to `error::ErrorCode`): failure category.
//! - Book, BookDetails, BookId, Isbn, Rating: the single persisted entity.
//! - BookListQuery, BookSort: list filtering and ordering.
//! - BookLogService: implements the driving ports.
//! - DemoBookSeeder: fills an empty table from the demonstration catalogue.

pub mod book;
pub mod book_list;
pub mod book_log_service;
pub mod demo_books;
pub mod error;
pub mod ports;

pub use self::book::{
    Book, BookDetails, BookId, Isbn, IsbnError, Rating, RatingError, UNKNOWN_AUTHOR,
};
pub use self::book_list::{BookListQuery, BookSort, UnknownSortError};
pub use self::book_log_service::{BookLogService, NOT_FOUND_MESSAGE};
pub use self::demo_books::{DemoBookSeeder, DemoSeedOutcome, DemoSeedingError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
