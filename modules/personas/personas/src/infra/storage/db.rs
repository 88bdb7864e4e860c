//! Connection setup and database error conversion helpers.

use std::fmt::Display;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use sea_orm_migration::MigratorTrait;

use super::migrations::Migrator;
use crate::config::DatabaseConfig;
use crate::domain::error::DomainError;

/// Convert any displayable error into a `DomainError::Database`.
#[must_use]
pub fn db_err(e: impl Display) -> DomainError {
    DomainError::database(e.to_string())
}

/// Map a failed insert/update: a UNIQUE violation on `dni` becomes
/// `DniAlreadyExists`, everything else is a database error.
#[must_use]
pub fn write_err(e: &DbErr, dni: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::dni_already_exists(dni),
        _ => db_err(e),
    }
}

/// Open a connection pool for the configured DSN.
///
/// In-memory `SQLite` lives inside a single connection, so the pool is
/// pinned to exactly one.
///
/// # Errors
/// Returns an error if the database cannot be reached.
pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(cfg.dsn.clone());

    if cfg.is_in_memory() {
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(cfg.max_conns);
    }
    opts.acquire_timeout(Duration::from_millis(cfg.acquire_timeout_ms))
        .sqlx_logging(cfg.sqlx_logging);

    tracing::info!(dsn = %cfg.redacted_dsn(), "Connecting to database");
    Database::connect(opts).await
}

/// Apply every pending migration.
///
/// # Errors
/// Returns an error if a migration fails.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Connect and migrate in one step.
///
/// # Errors
/// Returns an error if connecting or migrating fails.
pub async fn connect_and_migrate(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let db = connect(cfg).await?;
    migrate(&db).await?;
    Ok(db)
}
