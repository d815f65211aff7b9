//! Database error type

use super::engine::EngineState;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// The engine is not in the `Ready` state, so no session can be handed out
    #[error("database engine is {0}, not accepting sessions")]
    NotReady(EngineState),

    #[error("invalid engine transition: {from} -> {to}")]
    InvalidTransition { from: EngineState, to: EngineState },
}

impl DbError {
    /// True when the store is unavailable rather than failing.
    ///
    /// Covers sessions requested outside `Ready` and a pool that closed
    /// between admission and first use.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::NotReady(_) | Self::Sqlx(sqlx::Error::PoolClosed)
        )
    }
}
