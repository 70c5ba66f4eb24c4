use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;

use crate::config::CONFIG;
use crate::error::Result;
use crate::migrations::Migrator;

pub type DbConn = DatabaseConnection;

/// Create a database handle from config
pub async fn connect() -> Result<DbConn> {
    connect_with_url(&CONFIG.database.database_url(), CONFIG.database.auto_migrate).await
}

/// Create a database handle for a specific URL.
///
/// The pool connects lazily, so an unreachable datastore is only noticed on
/// the first query. Migrations, when requested, force a connection.
pub async fn connect_with_url(database_url: &str, auto_migrate: bool) -> Result<DbConn> {
    tracing::info!("Configuring database pool...");

    let mut opts = ConnectOptions::new(database_url);
    opts.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .connect_lazy(true)
        .sqlx_logging(false);

    let db = Database::connect(opts).await?;

    if auto_migrate {
        run_migrations(&db).await?;
    }

    Ok(db)
}

/// Apply the schema migration
pub async fn run_migrations(db: &DbConn) -> Result<()> {
    tracing::info!("Running database migrations...");
    Migrator::up(db, None).await?;
    tracing::info!("Database migrations completed");
    Ok(())
}
