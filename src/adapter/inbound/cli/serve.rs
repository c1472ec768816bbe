//! `marketlens serve`.

use tracing::info;

use super::command::ServeArgs;
use crate::adapter::inbound::http::{self, AppState};
use crate::error::Result;
use crate::infrastructure::bootstrap::build_analytics;
use crate::infrastructure::config::Config;

/// Load configuration, wire the service and serve until Ctrl-C.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let mut config = Config::load(&args.config.config)?;
    if let Some(bind) = &args.bind {
        config.server.bind.clone_from(bind);
        config.validate()?;
    }
    config.init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "marketlens starting");

    let analytics = build_analytics(&config)?;
    http::serve(&config.server.bind, AppState::new(analytics), shutdown_signal()).await?;

    info!("marketlens stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
