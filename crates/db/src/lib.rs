//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the treasury schema
//! - Repository abstractions for data access
//!
//! Migrations are managed outside this tree; the repositories assume the
//! schema documented in the entity modules is already in place.

pub mod entities;
pub mod repositories;

pub use repositories::{
    ChurchRepository, FundRepository, MonthlyLedgerRepository, ReportRepository,
    TransactionRepository,
};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tesoreria_shared::config::DatabaseConfig;

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a pooled connection using the application configuration.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections);

    Database::connect(options).await
}
