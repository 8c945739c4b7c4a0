//! Connection acceptance and process lifecycle
//!
//! The acceptor owns the listener, hands each accepted connection to its own
//! task, and stops when the shutdown handle fires or accepting fails.

pub mod listener;
pub mod shutdown;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::ServerError;
use crate::http::connection::{Connection, Handler};

pub use listener::Listener;
pub use shutdown::{Shutdown, ShutdownReason, ShutdownReport};

/// Accepts connections until `shutdown` fires.
///
/// Each connection is served by a spawned task that owns it outright; a
/// failing task is logged and forgotten. An accept failure ends the loop with
/// [`ServerError::Accept`]. Either way the listener is closed on return.
pub async fn serve(
    listener: Listener,
    handler: Arc<Handler>,
    shutdown: Shutdown,
) -> Result<ShutdownReport, ServerError> {
    let reason = loop {
        tokio::select! {
            biased;

            _ = shutdown.triggered() => break ShutdownReason::Interrupted,

            accepted = listener.accept() => {
                let (socket, peer) = accepted?;
                info!("Accepted connection from {}", peer);

                let handler = Arc::clone(&handler);
                tokio::spawn(async move {
                    match Connection::new(socket, handler).run().await {
                        Ok(()) => debug!(peer = %peer, "request handled"),
                        Err(e) => warn!(peer = %peer, error = %e, "connection failed"),
                    }
                });
            }
        }
    };

    let socket_error = listener.close();
    Ok(ShutdownReport {
        reason,
        socket_error,
    })
}

/// Binds the configured address and serves until interrupted.
pub async fn run(cfg: &Config, shutdown: Shutdown) -> Result<ShutdownReport, ServerError> {
    let listener = Listener::bind(&cfg.listen_addr()).await?;
    let handler = Arc::new(Handler::new(cfg));
    serve(listener, handler, shutdown).await
}
