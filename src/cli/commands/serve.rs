//! Serve command implementation
//!
//! Opens the dataset, verifies its schema and runs the HTTP API until the
//! cancellation token fires.

use super::shared::{load_serve_configuration, open_verified_store, setup_logging};
use crate::app::http::router;
use crate::app::services::query_service::QueryService;
use crate::cli::args::ServeArgs;
use crate::{Error, Result};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Serve command runner
///
/// Returns once the server has drained in-flight requests after `shutdown`
/// is cancelled.
pub async fn run_serve(args: ServeArgs, shutdown: CancellationToken) -> Result<()> {
    setup_logging(&args.log)?;

    info!("Starting climate API");
    debug!("Serve arguments: {:?}", args);

    args.validate()?;
    let config = load_serve_configuration(&args)?;

    let (store, _schema) = open_verified_store(&config).await?;
    let app = router(QueryService::new(store.clone()));

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| Error::io(format!("cannot bind {}", address), e))?;
    let local_addr = listener.local_addr()?;

    info!(
        "Serving {} on http://{}",
        config.database.path.display(),
        local_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| Error::io("HTTP server failed", e))?;

    store.close().await;
    info!("Server stopped");
    Ok(())
}
