//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`BookRepository`], [`BookMetadataSource`]) expose strongly
//! typed errors so adapters map their failures into predictable variants.
//! Driving ports ([`BookLogCommand`], [`BookLogQuery`]) return the
//! transport-agnostic [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod book_log_command;
mod book_log_query;
mod book_metadata_source;
mod book_repository;

#[cfg(test)]
pub use book_log_command::MockBookLogCommand;
pub use book_log_command::{BookEntryInput, BookLogCommand};
#[cfg(test)]
pub use book_log_query::MockBookLogQuery;
pub use book_log_query::BookLogQuery;
#[cfg(test)]
pub use book_metadata_source::MockBookMetadataSource;
pub use book_metadata_source::{BookMetadata, BookMetadataSource, BookMetadataSourceError};
#[cfg(test)]
pub use book_repository::MockBookRepository;
pub use book_repository::{BookRepository, BookRepositoryError, SeedingResult};
