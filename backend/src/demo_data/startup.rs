//! Startup seeding orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use example_data::{BookCatalogue, CatalogueError};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{BookRepository, SeedingResult};
use crate::domain::{DemoBookSeeder, DemoSeedOutcome, DemoSeedingError};
use crate::settings::SeedSettings;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Catalogue file could not be read.
    #[error("failed to read catalogue at {path}: {source}")]
    CatalogueRead {
        /// Path to the catalogue file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Catalogue parsing failed.
    #[error("catalogue parse error: {0}")]
    Catalogue(#[from] CatalogueError),
    /// Conversion or persistence failed.
    #[error("demo book seeding error: {0}")]
    Seeding(#[from] DemoSeedingError),
}

/// Seed an empty book table on startup when enabled.
///
/// Returns `None` when seeding is disabled.
///
/// # Errors
///
/// Returns [`StartupSeedingError`] when the catalogue cannot be loaded or the
/// repository rejects the write.
pub async fn seed_demo_books_on_startup<R>(
    repository: Arc<R>,
    settings: &SeedSettings,
) -> Result<Option<DemoSeedOutcome>, StartupSeedingError>
where
    R: BookRepository,
{
    if !settings.enabled {
        info!(reason = "disabled", "demo book seeding skipped");
        return Ok(None);
    }

    let catalogue = match &settings.catalogue_path {
        Some(path) => load_catalogue(path)?,
        None => BookCatalogue::bundled()?,
    };

    let outcome = DemoBookSeeder::new(repository)
        .seed_from_catalogue(&catalogue)
        .await?;

    match outcome.result {
        SeedingResult::Applied => {
            info!(book_count = outcome.book_count, "demo books seeded");
        }
        SeedingResult::AlreadySeeded => {
            info!(
                book_count = outcome.book_count,
                "book table not empty; demo seeding skipped"
            );
        }
    }

    Ok(Some(outcome))
}

fn load_catalogue(path: &Path) -> Result<BookCatalogue, StartupSeedingError> {
    let read_error = |source| StartupSeedingError::CatalogueRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "catalogue path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    Ok(BookCatalogue::from_json(&contents)?)
}

#[cfg(test)]
mod tests {
    //! Unit tests for startup seeding.

    use super::*;
    use crate::domain::BookListQuery;
    use crate::test_support::InMemoryBookRepository;
    use rstest::rstest;

    fn settings(enabled: bool, catalogue_path: Option<PathBuf>) -> SeedSettings {
        SeedSettings {
            enabled,
            catalogue_path,
        }
    }

    fn write_catalogue(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let handle =
            Dir::open_ambient_dir(dir.path(), ambient_authority()).expect("open temp dir");
        handle
            .write("books.json", contents)
            .expect("write catalogue");
        dir.path().join("books.json")
    }

    #[rstest]
    #[tokio::test]
    async fn disabled_seeding_writes_nothing() {
        let repo = Arc::new(InMemoryBookRepository::default());

        let outcome = seed_demo_books_on_startup(repo.clone(), &settings(false, None))
            .await
            .expect("disabled seeding succeeds");

        assert!(outcome.is_none());
        let books = repo
            .list(&BookListQuery::default())
            .await
            .expect("list books");
        assert!(books.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn bundled_catalogue_seeds_once() {
        let repo = Arc::new(InMemoryBookRepository::default());

        let first = seed_demo_books_on_startup(repo.clone(), &settings(true, None))
            .await
            .expect("first seed")
            .expect("enabled");
        let count_after_first = repo
            .list(&BookListQuery::default())
            .await
            .expect("list books")
            .len();
        let second = seed_demo_books_on_startup(repo.clone(), &settings(true, None))
            .await
            .expect("second seed")
            .expect("enabled");
        let count_after_second = repo
            .list(&BookListQuery::default())
            .await
            .expect("list books")
            .len();

        assert_eq!(first.result, SeedingResult::Applied);
        assert_eq!(second.result, SeedingResult::AlreadySeeded);
        assert_eq!(count_after_first, first.book_count);
        assert_eq!(count_after_first, count_after_second);
    }

    #[rstest]
    #[tokio::test]
    async fn catalogue_path_overrides_bundled_set() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_catalogue(
            &dir,
            r#"{"version": 1, "books": [{"title": "Emma", "author": "Jane Austen"}]}"#,
        );
        let repo = Arc::new(InMemoryBookRepository::default());

        let outcome = seed_demo_books_on_startup(repo.clone(), &settings(true, Some(path)))
            .await
            .expect("seed")
            .expect("enabled");

        assert_eq!(outcome.book_count, 1);
        let books = repo
            .list(&BookListQuery::default())
            .await
            .expect("list books");
        assert_eq!(books.first().map(|b| b.title()), Some("Emma"));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_catalogue_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.json");
        let repo = Arc::new(InMemoryBookRepository::default());

        let error = seed_demo_books_on_startup(repo, &settings(true, Some(path.clone())))
            .await
            .expect_err("missing file");

        assert!(
            matches!(error, StartupSeedingError::CatalogueRead { path: ref p, .. } if *p == path)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_catalogue_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_catalogue(&dir, "{not json");
        let repo = Arc::new(InMemoryBookRepository::default());

        let error = seed_demo_books_on_startup(repo, &settings(true, Some(path)))
            .await
            .expect_err("malformed file");

        assert!(matches!(error, StartupSeedingError::Catalogue(_)));
    }
}
