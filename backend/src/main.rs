#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]
//! Backend entry-point: reads settings, prepares the store and serves the
//! book pages.

mod server;

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bookbyte::demo_data::seed_demo_books_on_startup;
use bookbyte::domain::BookLogService;
use bookbyte::domain::ports::BookRepository;
use bookbyte::inbound::http::state::HttpState;
use bookbyte::outbound::openlibrary::OpenLibrarySource;
use bookbyte::outbound::persistence::{DbPool, DieselBookRepository, PoolConfig};
use bookbyte::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::from_env(&DefaultEnv::new()).wrap_err("invalid configuration")?;

    let database_url = settings.database.database_url()?;
    let pool = DbPool::new(
        PoolConfig::new(database_url.as_str())
            .with_max_size(settings.database.pool_max_size)
            .with_invalid_certs_allowed(settings.database.allow_invalid_certs),
    )
    .await
    .wrap_err("create database pool")?;

    let repository = Arc::new(DieselBookRepository::new(pool));
    repository
        .ensure_schema()
        .await
        .wrap_err("create books table")?;
    seed_demo_books_on_startup(repository.clone(), &settings.seed)
        .await
        .wrap_err("seed demo books")?;

    let metadata = Arc::new(
        OpenLibrarySource::new(
            settings.metadata.base_url.clone(),
            settings.metadata.timeout,
        )
        .wrap_err("build metadata client")?,
    );
    let service = Arc::new(BookLogService::new(repository.clone(), metadata));
    let http_state = HttpState::new(service.clone(), service);

    create_server(ServerConfig::new(settings.bind_addr, http_state))?.await?;

    // Release the pool only after the listener has stopped.
    drop(repository);
    info!("server stopped");
    Ok(())
}
