//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{BookLogCommand, BookLogQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub commands: Arc<dyn BookLogCommand>,
    pub queries: Arc<dyn BookLogQuery>,
}

impl HttpState {
    /// Construct state from the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use bookbyte::domain::BookLogService;
    /// use bookbyte::inbound::http::state::HttpState;
    /// use bookbyte::test_support::{InMemoryBookRepository, StubMetadataSource};
    ///
    /// let service = Arc::new(BookLogService::new(
    ///     Arc::new(InMemoryBookRepository::default()),
    ///     Arc::new(StubMetadataSource::default()),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// # let _ = state;
    /// ```
    pub fn new(commands: Arc<dyn BookLogCommand>, queries: Arc<dyn BookLogQuery>) -> Self {
        Self { commands, queries }
    }
}
