//! Error types for transports and connector queries.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::address::AddressError;
use crate::request::JsonRpcError;
use crate::units::QuantityError;

/// Errors that can occur while talking to an upstream RPC endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, non-2xx status, etc.).
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON-RPC protocol-level error returned by the node.
    #[error("RPC error {}: {}", .0.code, .0.message)]
    Rpc(JsonRpcError),

    /// Request timed out after the configured duration.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// Response could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// An unexpected error.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Timeout error for `elapsed`, saturating at `u64::MAX` milliseconds.
    pub fn timeout(elapsed: Duration) -> Self {
        Self::Timeout {
            ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Returns `true` if the failure happened on the wire rather than in the
    /// shape or content of the node's answer.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Timeout { .. })
    }
}

/// Coarse classification of a [`QueryError`], used by the HTTP layer to pick
/// a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No endpoint passed its liveness check during `connect`.
    NotConnected,
    /// Caller-supplied input is malformed.
    Validation,
    /// Network failure, timeout or connection reset.
    Transport,
    /// The node answered, but not with what the query expects.
    Protocol,
}

impl ErrorKind {
    /// Returns `true` when the caller is at fault (maps to a 4xx response).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not_connected"),
            Self::Validation => write!(f, "validation"),
            Self::Transport => write!(f, "transport"),
            Self::Protocol => write!(f, "protocol"),
        }
    }
}

/// Failure result of a connector query.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("not connected to an Ethereum node")]
    NotConnected,

    #[error("invalid Ethereum address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("network request failed: {0}")]
    Transport(String),

    #[error("unexpected response from node: {0}")]
    Protocol(String),
}

impl QueryError {
    /// The error kind tag for this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotConnected => ErrorKind::NotConnected,
            Self::InvalidAddress(_) => ErrorKind::Validation,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Protocol(_) => ErrorKind::Protocol,
        }
    }
}

impl From<TransportError> for QueryError {
    fn from(e: TransportError) -> Self {
        if e.is_transient() {
            Self::Transport(e.to_string())
        } else {
            Self::Protocol(e.to_string())
        }
    }
}

impl From<QuantityError> for QueryError {
    fn from(e: QuantityError) -> Self {
        Self::Protocol(e.to_string())
    }
}
