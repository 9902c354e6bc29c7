//! PostgreSQL-backed book repository.
//!
//! Owns the `books` table: idempotent DDL at startup, seeding an empty table
//! under an exclusive lock, and plain CRUD for the request handlers.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{BookRepository, BookRepositoryError, SeedingResult};
use crate::domain::{Book, BookDetails, BookId, BookListQuery, BookSort};

use super::models::{BookChangeset, BookRow, NewBookRow};
use super::pool::{DbPool, PoolError};
use super::schema::books;

const CREATE_BOOKS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS books (
    id SERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    isbn TEXT,
    external_id TEXT,
    cover_image_id BIGINT,
    rating INTEGER CONSTRAINT books_rating_check CHECK (rating BETWEEN 1 AND 5),
    review TEXT,
    read_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

const LOCK_BOOKS_TABLE: &str = "LOCK TABLE books IN EXCLUSIVE MODE";

/// Diesel-backed implementation of the book repository port.
#[derive(Clone)]
pub struct DieselBookRepository {
    pool: DbPool,
}

impl DieselBookRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use bookbyte::outbound::persistence::{DbPool, DieselBookRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/books")).await?;
    /// let repository = DieselBookRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain persistence errors.
fn map_pool_error(error: PoolError) -> BookRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            BookRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain persistence errors.
///
/// Check, not-null and unique violations become
/// [`BookRepositoryError::ConstraintViolation`] carrying the server message,
/// which names the violated constraint.
pub fn map_diesel_error(error: diesel::result::Error) -> BookRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    let error_message = error.to_string();
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            error = %error_message,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::UniqueViolation,
            info,
        ) => BookRepositoryError::constraint_violation(info.message().to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            BookRepositoryError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => BookRepositoryError::query(info.message().to_owned()),
        _ => BookRepositoryError::query(error_message),
    }
}

fn map_rows(rows: Vec<BookRow>) -> Result<Vec<Book>, BookRepositoryError> {
    rows.into_iter()
        .map(BookRow::into_domain)
        .collect::<Result<Vec<_>, _>>()
        .map_err(BookRepositoryError::query)
}

/// Escape `LIKE` metacharacters so the filter matches them literally.
fn escape_like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl BookRepository for DieselBookRepository {
    async fn ensure_schema(&self) -> Result<(), BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::sql_query(CREATE_BOOKS_TABLE)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn seed_if_empty(
        &self,
        seed_books: &[BookDetails],
    ) -> Result<SeedingResult, BookRepositoryError> {
        let rows: Vec<NewBookRow<'_>> = seed_books.iter().map(NewBookRow::from).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                // Concurrent seeders serialise here; the loser sees a non-empty table.
                diesel::sql_query(LOCK_BOOKS_TABLE).execute(conn).await?;

                let existing: i64 = books::table
                    .select(diesel::dsl::count_star())
                    .get_result(conn)
                    .await?;
                if existing > 0 {
                    return Ok(SeedingResult::AlreadySeeded);
                }

                if !rows.is_empty() {
                    diesel::insert_into(books::table)
                        .values(&rows)
                        .execute(conn)
                        .await?;
                }
                Ok(SeedingResult::Applied)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn list(&self, query: &BookListQuery) -> Result<Vec<Book>, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = books::table.select(BookRow::as_select()).into_boxed();
        if let Some(title) = query.title_contains() {
            statement = statement.filter(books::title.ilike(escape_like_pattern(title)));
        }
        statement = match query.sort() {
            Some(BookSort::Alpha) => statement.order((books::title.asc(), books::id.asc())),
            Some(BookSort::Rating) => {
                statement.order((books::rating.desc().nulls_last(), books::id.asc()))
            }
            Some(BookSort::Recent) => {
                statement.order((books::created_at.desc(), books::id.asc()))
            }
            None => statement.order(books::id.asc()),
        };

        let rows = statement
            .load::<BookRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        map_rows(rows)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = books::table
            .find(id.value())
            .select(BookRow::as_select())
            .first::<BookRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(BookRow::into_domain)
            .transpose()
            .map_err(BookRepositoryError::query)
    }

    async fn insert(&self, details: &BookDetails) -> Result<Book, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(books::table)
            .values(NewBookRow::from(details))
            .returning(BookRow::as_returning())
            .get_result::<BookRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row.into_domain().map_err(BookRepositoryError::query)
    }

    async fn update(&self, id: BookId, details: &BookDetails) -> Result<Book, BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(books::table.find(id.value()))
            .set(BookChangeset::from(details))
            .returning(BookRow::as_returning())
            .get_result::<BookRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .ok_or_else(|| BookRepositoryError::not_found(id))?;
        row.into_domain().map_err(BookRepositoryError::query)
    }

    async fn delete(&self, id: BookId) -> Result<(), BookRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(books::table.find(id.value()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if removed == 0 {
            debug!(%id, "delete matched no book");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for book repository error mapping.
    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    struct StubInfo(&'static str);

    impl DatabaseErrorInformation for StubInfo {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("books")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, message: &'static str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(StubInfo(message)))
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let persistence_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(
            persistence_err,
            BookRepositoryError::Connection { .. }
        ));
        assert!(persistence_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn check_violation_maps_to_constraint_violation() {
        let err = map_diesel_error(database_error(
            DatabaseErrorKind::CheckViolation,
            "new row for relation \"books\" violates check constraint \"books_rating_check\"",
        ));

        assert!(matches!(err, BookRepositoryError::ConstraintViolation { .. }));
        assert!(err.to_string().contains("books_rating_check"));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let err = map_diesel_error(database_error(
            DatabaseErrorKind::ClosedConnection,
            "server closed the connection",
        ));
        assert!(matches!(err, BookRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn other_errors_map_to_query_error() {
        let err = map_diesel_error(DieselError::NotFound);
        assert!(matches!(err, BookRepositoryError::Query { .. }));
    }

    #[rstest]
    #[case("great", "%great%")]
    #[case("100%", "%100\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("back\\slash", "%back\\\\slash%")]
    fn like_pattern_escapes_metacharacters(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_like_pattern(input), expected);
    }
}
