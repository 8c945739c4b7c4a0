use std::sync::Arc;

use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::ServerError;

/// Why the acceptor stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupted,
}

/// What the acceptor hands back once it has stopped.
#[derive(Debug)]
pub struct ShutdownReport {
    pub reason: ShutdownReason,
    /// Error left pending on the listening socket when it was closed
    pub socket_error: Option<std::io::Error>,
}

/// Cancellation handle shared by the signal listener and the acceptor.
///
/// Triggering is one-way; once set it stays set.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once [`Shutdown::trigger`] has been called.
    pub async fn triggered(&self) {
        let mut rx = self.rx.clone();
        // The sender lives as long as `self`, so this only ends on a trigger.
        let _ = rx.wait_for(|stopped| *stopped).await;
    }

    /// Installs the interrupt handler. Call once, before serving.
    ///
    /// The handler is registered before this returns, so an interrupt that
    /// arrives any time afterwards triggers shutdown instead of killing the
    /// process. Must be called from within a tokio runtime.
    pub fn listen_for_signals(&self) -> Result<JoinHandle<()>, ServerError> {
        let mut interrupts =
            signal(SignalKind::interrupt()).map_err(|source| ServerError::Setup {
                context: "failed to install the interrupt handler".to_string(),
                source,
            })?;

        let shutdown = self.clone();
        Ok(tokio::spawn(async move {
            match interrupts.recv().await {
                Some(()) => {
                    info!("Shutdown signal received");
                    shutdown.trigger();
                }
                None => error!("interrupt signal stream ended"),
            }
        }))
    }
}
