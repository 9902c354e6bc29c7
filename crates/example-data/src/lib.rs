//! Demonstration book catalogue for seeding an empty book log.
//!
//! This crate owns the fixed demonstration dataset and its JSON format. It is
//! independent of backend domain types so the backend can map entries into
//! its own model without a circular dependency.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading the catalogue bundled with the crate
//! - Parsing alternative catalogues from JSON
//! - Validating titles, authors and ratings before they reach storage
//!
//! # Example
//!
//! ```
//! use example_data::BookCatalogue;
//!
//! let catalogue = BookCatalogue::bundled().expect("bundled catalogue is valid");
//! assert!(!catalogue.books().is_empty());
//! ```

mod error;
mod registry;

pub use error::CatalogueError;
pub use registry::{BookCatalogue, DemoBook};
