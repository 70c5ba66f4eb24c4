//! Test helpers and utilities for unit testing.
//!
//! Provides in-memory datastores, including ones that refuse writes, so the
//! persistence path can be exercised without a running Postgres.

use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::migrations::Migrator;

/// Create an in-memory SQLite database with the schema applied
pub async fn create_test_db() -> DatabaseConnection {
    let db = create_unmigrated_db().await;

    Migrator::up(&db, None)
        .await
        .expect("Failed to run test migrations");

    db
}

/// Create an in-memory SQLite database with no tables at all
pub async fn create_unmigrated_db() -> DatabaseConnection {
    // Use simple in-memory SQLite - each connection gets its own database
    Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database")
}

/// Make every insert into `customer_status` abort, as an unavailable
/// datastore would
pub async fn reject_status_inserts(db: &DatabaseConnection) {
    db.execute_unprepared(
        "CREATE TRIGGER reject_status_insert BEFORE INSERT ON customer_status
         BEGIN
             SELECT RAISE(ABORT, 'datastore unavailable');
         END;",
    )
    .await
    .expect("Failed to install insert trigger");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::prelude::*;
    use sea_orm::{EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn test_create_test_db() {
        let db = create_test_db().await;
        assert!(db.ping().await.is_ok());
        assert_eq!(CustomerStatus::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unmigrated_db_has_no_table() {
        let db = create_unmigrated_db().await;
        assert!(CustomerStatus::find().count(&db).await.is_err());
    }
}
