//! Per-request unit of work
//!
//! A [`Session`] begins a transaction lazily on first use. Every exit path
//! releases it:
//!
//! - `commit()` / `rollback()` / `close()` end the open transaction explicitly
//! - dropping the session (error return, panic, or the request future being
//!   cancelled) rolls back whatever is uncommitted and returns the connection
//!   to the pool

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::debug;

use super::error::DbError;

/// Isolated unit of work bound to the engine's pool.
///
/// Never shared between requests; acquire a new one per request.
pub struct Session {
    pool: SqlitePool,
    tx: Option<Transaction<'static, Sqlite>>,
    _token: SessionToken,
}

impl Session {
    pub(crate) fn new(pool: SqlitePool, token: SessionToken) -> Self {
        Self {
            pool,
            tx: None,
            _token: token,
        }
    }

    /// Connection inside the current transaction, beginning one if needed.
    pub async fn conn(&mut self) -> Result<&mut SqliteConnection, DbError> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => self.pool.begin().await?,
        };
        Ok(&mut **self.tx.insert(tx))
    }

    pub fn in_transaction(&self) -> bool {
        self.tx.is_some()
    }

    /// Commit the open transaction, if any. Later use begins a new one.
    pub async fn commit(&mut self) -> Result<(), DbError> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
        }
        Ok(())
    }

    /// Roll back the open transaction, if any.
    pub async fn rollback(&mut self) -> Result<(), DbError> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await?;
        }
        Ok(())
    }

    /// End the session, discarding anything uncommitted.
    pub async fn close(mut self) -> Result<(), DbError> {
        self.rollback().await
    }
}

/// Counts a live session against the engine until dropped.
pub(crate) struct SessionToken(Arc<AtomicUsize>);

impl SessionToken {
    pub(crate) fn acquire(active: &Arc<AtomicUsize>) -> Self {
        active.fetch_add(1, Ordering::AcqRel);
        Self(Arc::clone(active))
    }
}

impl Drop for SessionToken {
    fn drop(&mut self) {
        let remaining = self.0.fetch_sub(1, Ordering::AcqRel) - 1;
        debug!(active = remaining, "session released");
    }
}
