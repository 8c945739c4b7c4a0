use thiserror::Error;

use crate::http::parser::ParseError;

/// Errors produced while serving.
///
/// `Setup` and `Accept` end the whole process. `Io` and `MalformedRequest`
/// only ever end the worker handling one connection.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{context}: {source}")]
    Setup {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to accept connection: {0}")]
    Accept(#[source] std::io::Error),

    #[error("connection I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed request: {0}")]
    MalformedRequest(#[from] ParseError),
}
