//! Error types for scrollfeed.
//!
//! A single error type with explicit variants for argument validation,
//! store availability, write failures, transport and protocol errors.
//! Every variant has a stable wire code (see [`Error::code`]) so the HTTP
//! layer can carry it across the network and the client can map it back.

use std::fmt;
use thiserror::Error;

/// The unified error type for scrollfeed operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request was rejected before touching the store.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgumentError),

    /// The backing store could not serve the request.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// A write was not committed. The caller's pending input is still valid.
    #[error("write failed: {reason}")]
    WriteFailed { reason: String },

    /// Network transport errors (connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Unexpected response from a remote feed server.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl Error {
    /// Wire code for `InvalidArgument`.
    pub const INVALID_ARGUMENT: &'static str = "InvalidArgument";
    /// Wire code for `StoreUnavailable`.
    pub const STORE_UNAVAILABLE: &'static str = "StoreUnavailable";
    /// Wire code for `WriteFailed`.
    pub const WRITE_FAILED: &'static str = "WriteFailed";

    /// Create a write failure with the given reason.
    pub fn write_failed(reason: impl Into<String>) -> Self {
        Error::WriteFailed {
            reason: reason.into(),
        }
    }

    /// Returns the stable code used to report this error over the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidArgument(_) => Self::INVALID_ARGUMENT,
            Error::StoreUnavailable(_) => Self::STORE_UNAVAILABLE,
            Error::WriteFailed { .. } => Self::WRITE_FAILED,
            Error::Transport(_) => "TransportError",
            Error::Protocol(_) => "ProtocolError",
        }
    }

    /// Rebuild an error from a code and message reported by a remote server.
    ///
    /// Unknown codes are kept as a [`ProtocolError`].
    pub fn from_wire(status: u16, code: Option<&str>, message: Option<String>) -> Self {
        let text = message.clone().unwrap_or_default();
        match code {
            Some(Self::INVALID_ARGUMENT) => {
                InvalidArgumentError::Remote { message: text }.into()
            }
            Some(Self::STORE_UNAVAILABLE) => StoreError::Unavailable { message: text }.into(),
            Some(Self::WRITE_FAILED) => Error::write_failed(text),
            _ => ProtocolError::new(status, code.map(str::to_string), message).into(),
        }
    }

    /// Returns true if retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::StoreUnavailable(StoreError::Unavailable { .. })
                | Error::StoreUnavailable(StoreError::Io { .. })
                | Error::WriteFailed { .. }
                | Error::Transport(_)
        )
    }
}

/// Argument validation errors. Raised before any store access.
#[derive(Debug, Error)]
pub enum InvalidArgumentError {
    /// Page size outside the accepted range.
    #[error("limit {value} is outside {min}..={max}")]
    Limit { value: i64, min: u8, max: u8 },

    /// Comment content was empty after trimming whitespace.
    #[error("comment content must not be empty")]
    EmptyContent,

    /// A cursor token that could not be decoded.
    #[error("invalid cursor '{value}': {reason}")]
    Cursor { value: String, reason: String },

    /// Invalid feed backend URL.
    #[error("invalid feed URL '{value}': {reason}")]
    Url { value: String, reason: String },

    /// Validation failure reported by a remote server.
    #[error("{message}")]
    Remote { message: String },

    /// Generic invalid input.
    #[error("{message}")]
    Other { message: String },
}

/// Backing store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem or device error.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Stored data could not be decoded.
    #[error("corrupt record at {location}: {message}")]
    Corrupt { location: String, message: String },

    /// The store refused the operation (e.g. a constraint failed).
    #[error("rejected: {message}")]
    Rejected { message: String },

    /// The store is temporarily unavailable.
    #[error("{message}")]
    Unavailable { message: String },
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StoreUnavailable(StoreError::from(err))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Unexpected response from a feed server.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error code from the response body (if present).
    pub error: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }
}
