//! Schema bootstrap, run once per engine open
//!
//! Every statement is `IF NOT EXISTS`, so this is safe on every start.

use sqlx::SqlitePool;
use tracing::info;

use super::error::DbError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT
);

CREATE INDEX IF NOT EXISTS ix_items_name ON items (name);
"#;

/// Create the `items` table and its index if they are missing.
pub async fn ensure(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;

    info!("database schema ensured");
    Ok(())
}
