//! HTTP inbound adapter serving the book pages.

pub mod books;
pub mod error;
pub mod forms;
pub mod state;
pub mod views;

pub use error::ApiResult;
