//! Axum server setup
//!
//! Startup order: open the engine (connect + schema), then accept traffic.
//! Shutdown order: stop accepting, let in-flight requests finish, then close
//! the engine exactly once.

use std::future::Future;
use std::sync::Arc;

use axum::http::{HeaderValue, StatusCode};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use super::routes;
use crate::config::ServerConfig;
use crate::db::{DbError, Engine};
use crate::state::AppState;

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database startup failed: {0}")]
    Database(#[from] DbError),
}

/// Build the application router with all routes.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = if config.cors_permissive {
        warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        // Localhost only, any port
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(
                |origin: &HeaderValue, _request| is_local_origin(origin),
            ))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Middleware stack, outermost first
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(timeout_layer(config))
        .layer(cors);

    Router::new()
        .merge(routes::root::router())
        .merge(routes::items::router())
        .layer(middleware)
        .with_state(state)
}

/// A timed-out request is answered with 408 and its handler future dropped.
fn timeout_layer(config: &ServerConfig) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, config.request_timeout())
}

fn is_local_origin(origin: &HeaderValue) -> bool {
    let origin = origin.as_bytes();
    [&b"http://localhost"[..], &b"http://127.0.0.1"[..]]
        .iter()
        .any(|prefix| {
            origin.starts_with(prefix)
                && matches!(origin.get(prefix.len()), None | Some(b':'))
        })
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
///
/// The database engine is opened before the listener is bound; if that
/// fails, no traffic is ever accepted.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let engine = Arc::new(Engine::new(config.database.clone()));
    engine.open().await?;
    info!(url = %engine.config().url, "database opened");

    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            engine.close().await;
            return Err(err.into());
        }
    };

    serve_engine(engine, listener, config, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves.
///
/// Opens the engine first and disposes it after the last request completes.
pub async fn serve<F>(
    listener: TcpListener,
    config: ServerConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let engine = Arc::new(Engine::new(config.database.clone()));
    engine.open().await?;

    serve_engine(engine, listener, config, shutdown).await
}

async fn serve_engine<F>(
    engine: Arc<Engine>,
    listener: TcpListener,
    config: ServerConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(AppState::new(Arc::clone(&engine)), &config);
    info!("Server listening on {}", listener.local_addr()?);

    // Graceful shutdown resolves only after in-flight requests finish
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    engine.close().await;
    served?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
