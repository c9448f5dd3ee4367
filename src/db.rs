// Database related types and functions

use anyhow::Result;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

pub mod locations;
pub mod stats;

/// Cheaply clonable handle to the SQLite pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Apply the embedded migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(self.pool()).await?;
        Ok(())
    }
}

pub fn prepare_sqlite_url(url: &str) -> String {
    if url.starts_with("sqlite:") && !url.contains("mode=") && !url.contains(":memory:") {
        if url.contains('?') {
            format!("{url}&mode=rwc")
        } else {
            format!("{url}?mode=rwc")
        }
    } else {
        url.to_string()
    }
}

pub async fn connect_db(db_url: &str, max_connections: u32) -> Result<Database> {
    tracing::debug!(db_url = %db_url, max_connections, "Connecting to database");
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(db_url)
        .await?;
    Ok(Database::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_sqlite_url_basic() {
        assert_eq!(
            prepare_sqlite_url("sqlite:travelbot.db"),
            "sqlite:travelbot.db?mode=rwc"
        );
    }

    #[test]
    fn prepare_sqlite_url_keeps_explicit_mode() {
        assert_eq!(
            prepare_sqlite_url("sqlite:travelbot.db?mode=ro"),
            "sqlite:travelbot.db?mode=ro"
        );
        assert_eq!(prepare_sqlite_url("sqlite::memory:"), "sqlite::memory:");
    }
}
