//! Error types used across the stock client.
//!
//! The `ClientError` enum separates transport failures from failures the server
//! reported, and keeps the server's domain error so retry decisions can be made on
//! its kind rather than on message text.
use stock_common::{ErrorKind, StockError};
use thiserror::Error;

/// Unified error type for the application.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection, TLS, or body decoding failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Server responded {status}: {source}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Domain error rebuilt from the response body.
        #[source]
        source: StockError,
    },
}

impl ClientError {
    /// Kind of the server-side failure, if the server answered at all.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ClientError::Remote { source, .. } => Some(source.kind()),
            ClientError::Http(_) => None,
        }
    }

    /// Only injected generation failures are worth repeating.
    pub fn is_retryable(&self) -> bool {
        self.kind() == Some(ErrorKind::GenerationFailure)
    }
}
