//! Error types for the callback listener.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors from the listener lifecycle (bind, serve, configuration).
#[derive(thiserror::Error, Debug)]
pub enum ListenerError {
    /// The listening socket could not be acquired (port in use, permission denied, ...)
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address the listener tried to bind
        addr: SocketAddr,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The accept loop failed after a successful bind
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("Invalid configuration for '{field}': {message}")]
    Config {
        /// Offending setting
        field: String,
        /// What is wrong with it
        message: String,
    },
}

impl ListenerError {
    /// Create a bind error.
    #[must_use]
    pub fn bind(addr: SocketAddr, source: std::io::Error) -> Self {
        Self::Bind { addr, source }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config { field: field.into(), message: message.into() }
    }

    /// Returns true if the port was already taken by another process.
    #[must_use]
    pub fn is_addr_in_use(&self) -> bool {
        matches!(self, Self::Bind { source, .. } if source.kind() == std::io::ErrorKind::AddrInUse)
    }
}

/// Errors produced while handling a single callback request.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CallbackError {
    /// The request carried no value for the named parameter
    #[error("missing '{0}' query parameter")]
    MissingParameter(&'static str),
}

impl CallbackError {
    /// Status code returned to the browser for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Result type alias for listener operations.
pub type ListenerResult<T> = Result<T, ListenerError>;
