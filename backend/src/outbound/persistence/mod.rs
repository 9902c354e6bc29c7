//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Implements the book repository port against PostgreSQL via Diesel with
//! async support through `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapter**: the repository only translates between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and the table definition
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures map to
//!   [`BookRepositoryError`](crate::domain::ports::BookRepositoryError).
//!
//! # Example
//!
//! ```no_run
//! use bookbyte::outbound::persistence::{DbPool, DieselBookRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PoolConfig::new("postgres://localhost/books");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselBookRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_book_repository;
mod models;
mod pool;
mod schema;
mod tls;

pub use diesel_book_repository::{DieselBookRepository, map_diesel_error};
pub use pool::{DbPool, PoolConfig, PoolError};
