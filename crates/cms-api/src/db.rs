use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::debug;

use crate::repositories::StoreError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Opens a connection and brings the schema up to date.
pub fn establish_connection(database_url: &str) -> Result<SqliteConnection, StoreError> {
    let mut connection = SqliteConnection::establish(database_url)?;

    diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut connection)?;

    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| StoreError::Database(err.to_string()))?;
    debug!(count = applied.len(), "Applied pending migrations");

    Ok(connection)
}
