//! In-memory adapters for unit and integration tests.
//!
//! Compiled for the crate's own tests and, through the `test-support` feature,
//! for the integration suites under `tests/`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    BookMetadata, BookMetadataSource, BookMetadataSourceError, BookRepository,
    BookRepositoryError, SeedingResult,
};
use crate::domain::{Book, BookDetails, BookId, BookListQuery, BookSort, Isbn};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Settable clock for deterministic `created_at` values.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock fixed at 2024-01-01T00:00:00Z.
    pub fn at_epoch() -> Self {
        Self::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default())
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *lock(&self.0) += TimeDelta::seconds(seconds);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *lock(&self.0)
    }
}

#[derive(Default)]
struct Table {
    rows: Vec<Book>,
    last_id: i32,
}

/// Book repository over a vector, ordering rows like the SQL adapter.
pub struct InMemoryBookRepository {
    table: Mutex<Table>,
    clock: Arc<dyn Clock + Send + Sync>,
    failure: Mutex<Option<BookRepositoryError>>,
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl InMemoryBookRepository {
    /// Repository stamping `created_at` from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            table: Mutex::new(Table::default()),
            clock,
            failure: Mutex::new(None),
        }
    }

    /// Make every subsequent call fail with `error`; `None` clears it.
    pub fn fail_with(&self, error: Option<BookRepositoryError>) {
        *lock(&self.failure) = error;
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        lock(&self.table).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<(), BookRepositoryError> {
        match lock(&self.failure).clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn insert_row(&self, table: &mut Table, details: &BookDetails) -> Book {
        table.last_id += 1;
        let book = Book::new(
            BookId::new(table.last_id),
            details.clone(),
            self.clock.utc(),
        );
        table.rows.push(book.clone());
        book
    }
}

fn sort_books(books: &mut [Book], sort: Option<BookSort>) {
    match sort {
        Some(BookSort::Alpha) => books.sort_by(|a, b| {
            a.title()
                .cmp(b.title())
                .then_with(|| a.id().cmp(&b.id()))
        }),
        Some(BookSort::Rating) => books.sort_by(|a, b| {
            // Descending with unrated rows last.
            let (ra, rb) = (a.details().rating, b.details().rating);
            match (ra, rb) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
            .then_with(|| a.id().cmp(&b.id()))
        }),
        Some(BookSort::Recent) => books.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        }),
        None => books.sort_by_key(Book::id),
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn ensure_schema(&self) -> Result<(), BookRepositoryError> {
        self.check()
    }

    async fn seed_if_empty(
        &self,
        books: &[BookDetails],
    ) -> Result<SeedingResult, BookRepositoryError> {
        self.check()?;
        let mut table = lock(&self.table);
        if !table.rows.is_empty() {
            return Ok(SeedingResult::AlreadySeeded);
        }
        for details in books {
            self.insert_row(&mut table, details);
        }
        Ok(SeedingResult::Applied)
    }

    async fn list(&self, query: &BookListQuery) -> Result<Vec<Book>, BookRepositoryError> {
        self.check()?;
        let mut books: Vec<Book> = lock(&self.table)
            .rows
            .iter()
            .filter(|book| query.matches_title(book.title()))
            .cloned()
            .collect();
        sort_books(&mut books, query.sort());
        Ok(books)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookRepositoryError> {
        self.check()?;
        Ok(lock(&self.table)
            .rows
            .iter()
            .find(|book| book.id() == id)
            .cloned())
    }

    async fn insert(&self, details: &BookDetails) -> Result<Book, BookRepositoryError> {
        self.check()?;
        let mut table = lock(&self.table);
        Ok(self.insert_row(&mut table, details))
    }

    async fn update(
        &self,
        id: BookId,
        details: &BookDetails,
    ) -> Result<Book, BookRepositoryError> {
        self.check()?;
        let mut table = lock(&self.table);
        let row = table
            .rows
            .iter_mut()
            .find(|book| book.id() == id)
            .ok_or_else(|| BookRepositoryError::not_found(id))?;
        *row = Book::new(id, details.clone(), row.created_at());
        Ok(row.clone())
    }

    async fn delete(&self, id: BookId) -> Result<(), BookRepositoryError> {
        self.check()?;
        lock(&self.table).rows.retain(|book| book.id() != id);
        Ok(())
    }
}

/// Metadata source answering from a fixed map; unknown ISBNs are not found.
#[derive(Default)]
pub struct StubMetadataSource {
    answers: Mutex<HashMap<String, Result<BookMetadata, BookMetadataSourceError>>>,
    calls: Mutex<Vec<String>>,
}

impl StubMetadataSource {
    /// Answer `isbn` with `metadata`. The key is normalised like [`Isbn`].
    pub fn with_book(self, isbn: &str, metadata: BookMetadata) -> Self {
        lock(&self.answers).insert(normalise(isbn), Ok(metadata));
        self
    }

    /// Answer `isbn` with `error`.
    pub fn with_error(self, isbn: &str, error: BookMetadataSourceError) -> Self {
        lock(&self.answers).insert(normalise(isbn), Err(error));
        self
    }

    /// ISBNs looked up so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

fn normalise(isbn: &str) -> String {
    isbn.parse::<Isbn>()
        .map(Isbn::into_inner)
        .unwrap_or_else(|_| isbn.to_owned())
}

#[async_trait]
impl BookMetadataSource for StubMetadataSource {
    async fn fetch_metadata(&self, isbn: &Isbn) -> Result<BookMetadata, BookMetadataSourceError> {
        lock(&self.calls).push(isbn.as_str().to_owned());
        lock(&self.answers)
            .get(isbn.as_str())
            .cloned()
            .unwrap_or_else(|| Err(BookMetadataSourceError::not_found(isbn.as_str())))
    }
}

#[cfg(test)]
mod tests {
    //! Checks that the in-memory store orders rows like the SQL adapter.

    use super::*;
    use crate::domain::Rating;
    use rstest::{fixture, rstest};

    fn details(title: &str, rating: Option<i32>) -> BookDetails {
        BookDetails {
            title: title.to_owned(),
            author: "A. Writer".to_owned(),
            isbn: None,
            external_id: None,
            cover_image_id: None,
            rating: rating.and_then(|r| Rating::try_from(r).ok()),
            review: None,
            read_date: None,
        }
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        Arc::new(MutableClock::at_epoch())
    }

    async fn seeded(clock: Arc<MutableClock>) -> InMemoryBookRepository {
        let repo = InMemoryBookRepository::with_clock(clock.clone());
        for (title, rating) in [("Walden", None), ("Dune", Some(3)), ("Emma", Some(5))] {
            repo.insert(&details(title, rating)).await.expect("insert");
            clock.advance_seconds(1);
        }
        repo
    }

    fn titles(books: &[Book]) -> Vec<&str> {
        books.iter().map(Book::title).collect()
    }

    #[rstest]
    #[case(None, vec!["Walden", "Dune", "Emma"])]
    #[case(Some(BookSort::Alpha), vec!["Dune", "Emma", "Walden"])]
    #[case(Some(BookSort::Rating), vec!["Emma", "Dune", "Walden"])]
    #[case(Some(BookSort::Recent), vec!["Emma", "Dune", "Walden"])]
    #[tokio::test]
    async fn list_orders_rows(
        clock: Arc<MutableClock>,
        #[case] sort: Option<BookSort>,
        #[case] expected: Vec<&str>,
    ) {
        let repo = seeded(clock).await;
        let books = repo
            .list(&BookListQuery::new(None, sort))
            .await
            .expect("list");
        assert_eq!(titles(&books), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_creation_time_and_reports_missing_rows(clock: Arc<MutableClock>) {
        let repo = seeded(clock.clone()).await;
        let before = repo
            .find_by_id(BookId::new(1))
            .await
            .expect("find")
            .expect("row");
        clock.advance_seconds(60);

        let updated = repo
            .update(BookId::new(1), &details("Walden Two", Some(2)))
            .await
            .expect("update");
        let missing = repo
            .update(BookId::new(99), &details("Nope", None))
            .await
            .expect_err("missing row");

        assert_eq!(updated.created_at(), before.created_at());
        assert_eq!(updated.title(), "Walden Two");
        assert_eq!(missing, BookRepositoryError::not_found(BookId::new(99)));
    }

    #[rstest]
    #[tokio::test]
    async fn stub_normalises_isbn_keys_and_records_calls() {
        let stub = StubMetadataSource::default().with_book(
            "0-451-52493-4",
            BookMetadata {
                title: "1984".to_owned(),
                author: "George Orwell".to_owned(),
                external_id: None,
                cover_image_id: None,
            },
        );
        let isbn: Isbn = "0451524934".parse().expect("isbn");
        let other: Isbn = "123".parse().expect("isbn");

        assert!(stub.fetch_metadata(&isbn).await.is_ok());
        let miss = stub.fetch_metadata(&other).await.expect_err("unknown isbn");

        assert!(matches!(miss, BookMetadataSourceError::NotFound { .. }));
        assert_eq!(stub.calls(), vec!["0451524934".to_owned(), "123".to_owned()]);
    }
}
