//! Database engine lifecycle
//!
//! The engine owns the one shared SQLite pool. It moves strictly forward
//! through `Uninitialized -> Ready -> Draining -> Disposed`:
//!
//! - `open()` connects and ensures the schema. The server must not bind its
//!   listener until this succeeds.
//! - `session()` hands out per-request units of work, only while `Ready`.
//! - `close()` stops admitting sessions, waits for every checked-out
//!   connection to come back, then closes the pool.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::error::DbError;
use super::schema;
use super::session::{Session, SessionToken};
use crate::config::DatabaseConfig;

/// Lifecycle state of an [`Engine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Ready,
    Draining,
    Disposed,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
            Self::Draining => "draining",
            Self::Disposed => "disposed",
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owned handle to the shared connection pool.
///
/// Shared through application state, never through a global.
pub struct Engine {
    config: DatabaseConfig,
    state: Mutex<EngineState>,
    /// Serializes `open` and `close`; never held by `session`.
    lifecycle: tokio::sync::Mutex<()>,
    pool: OnceLock<SqlitePool>,
    active: Arc<AtomicUsize>,
}

impl Engine {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            state: Mutex::new(EngineState::Uninitialized),
            lifecycle: tokio::sync::Mutex::new(()),
            pool: OnceLock::new(),
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        *self.lock_state()
    }

    /// Number of sessions handed out and not yet dropped.
    pub fn active_sessions(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Open the pool and ensure the schema exists.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the engine is `Uninitialized`, or the
    /// underlying error if connecting or creating the schema fails. A failed
    /// open leaves the engine `Uninitialized`.
    pub async fn open(&self) -> Result<(), DbError> {
        let _lifecycle = self.lifecycle.lock().await;

        let current = self.state();
        if current != EngineState::Uninitialized {
            return Err(DbError::InvalidTransition {
                from: current,
                to: EngineState::Ready,
            });
        }

        let pool = connect(&self.config).await?;
        if let Err(err) = schema::ensure(&pool).await {
            pool.close().await;
            return Err(err);
        }

        if let Err(pool) = self.pool.set(pool) {
            pool.close().await;
            return Err(DbError::InvalidTransition {
                from: current,
                to: EngineState::Ready,
            });
        }

        *self.lock_state() = EngineState::Ready;
        info!(url = %self.config.url, "database engine ready");
        Ok(())
    }

    /// Hand out a fresh session bound to the pool.
    ///
    /// The session does not hold a connection until it is first used.
    pub fn session(&self) -> Result<Session, DbError> {
        // Held across the counter increment so `close` observes every
        // admitted session.
        let state = self.lock_state();
        if *state != EngineState::Ready {
            return Err(DbError::NotReady(*state));
        }

        let pool = self.pool.get().ok_or(DbError::NotReady(*state))?;
        debug!(active = self.active_sessions() + 1, "session acquired");
        Ok(Session::new(pool.clone(), SessionToken::acquire(&self.active)))
    }

    /// Drain and dispose the pool.
    ///
    /// Waits for every checked-out connection to be returned. Closing an
    /// engine that is already draining or disposed is a logged no-op.
    pub async fn close(&self) {
        let _lifecycle = self.lifecycle.lock().await;

        {
            let mut state = self.lock_state();
            match *state {
                EngineState::Ready => *state = EngineState::Draining,
                EngineState::Uninitialized => {
                    *state = EngineState::Disposed;
                    info!("database engine disposed before open");
                    return;
                }
                EngineState::Draining | EngineState::Disposed => {
                    warn!(state = %*state, "database engine already closed, ignoring");
                    return;
                }
            }
        }

        info!(in_flight = self.active_sessions(), "draining database engine");
        if let Some(pool) = self.pool.get() {
            pool.close().await;
        }

        *self.lock_state() = EngineState::Disposed;
        info!("database engine disposed");
    }

    fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.busy_timeout()) // Writers queue instead of failing with SQLITE_BUSY
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true);

    let pool_options = SqlitePoolOptions::new().acquire_timeout(config.acquire_timeout());

    // Each in-memory connection is its own database, and it vanishes when
    // the connection closes.
    let pool_options = if config.is_in_memory() {
        pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(config.max_connections.max(1))
    };

    Ok(pool_options.connect_with(options).await?)
}
