//! HTTP API (driving side).
//!
//! All routes are `GET` and answer JSON. Cached routes set `X-Cache` and
//! `Cache-Control`; projection routes also set `X-History` to `full` when
//! built from block 0 and `window` otherwise.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

use tokio::net::TcpListener;
use tracing::info;

pub use error::ApiError;
pub use router::create_router;
pub use state::AppState;

use crate::error::Result;

/// Serve the API on `bind` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve<F>(bind: &str, state: AppState, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
