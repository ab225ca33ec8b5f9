//! Error types shared between the server, the client, and the series core.
//!
//! The `StockError` enum unifies the domain failures of series generation with the
//! ambient failures of I/O and configuration, allowing crates to
//! propagate a single error type. Callers branch on [`StockError::kind`] rather than
//! on message text; the `Display` output of the two domain variants is part of the
//! HTTP contract and must not change.
use std::io;

use thiserror::Error;

/// Message returned when the fault policy trips during generation.
pub const GENERATION_FAILURE_MESSAGE: &str = "Failed to generate stock data";
/// Prefix of the message returned for an unknown symbol.
pub const UNKNOWN_STOCK_PREFIX: &str = "Unknown stock: ";

/// Unified error type shared by client, server, and core.
#[derive(Error, Debug)]
pub enum StockError {
    /// The requested symbol is not present in the registry.
    #[error("Unknown stock: {0}")]
    UnknownSymbol(String),

    /// Transient synthetic-source failure for an otherwise valid symbol.
    #[error("Failed to generate stock data")]
    GenerationFailure,

    /// Unexpected failure (date arithmetic overflow, malformed as-of input, ...).
    #[error("Internal error: {0}")]
    Internal(String),

    /// Rejected configuration value (empty symbol, invalid failure rate, ...).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error while parsing a symbols file into a registry.
    #[error("Parse symbols file error: {0}")]
    ParseSymbolsFile(String),

    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Coarse classification used by transports to pick a status code and by clients
/// to pick a recovery strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied a symbol the registry does not know. Not retryable.
    UnknownSymbol,
    /// Injected transient fault. Retrying the same call may succeed.
    GenerationFailure,
    /// Anything else. Never exposed in detail to remote callers.
    Internal,
}

impl StockError {
    /// Returns the discriminant callers should branch on.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StockError::UnknownSymbol(_) => ErrorKind::UnknownSymbol,
            StockError::GenerationFailure => ErrorKind::GenerationFailure,
            _ => ErrorKind::Internal,
        }
    }

    /// Rebuilds a domain error from the message text a remote server sent back.
    ///
    /// Remote clients only see the rendered message, so this is the inverse of the
    /// `Display` output for the two domain variants. Any other text becomes `Internal`.
    pub fn from_remote_message(message: &str) -> Self {
        if message == GENERATION_FAILURE_MESSAGE {
            StockError::GenerationFailure
        } else if let Some(symbol) = message.strip_prefix(UNKNOWN_STOCK_PREFIX) {
            StockError::UnknownSymbol(symbol.to_string())
        } else {
            StockError::Internal(message.to_string())
        }
    }
}
