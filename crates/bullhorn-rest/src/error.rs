//! Error types for the bullhorn-rest library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, server-status, handshake-precondition, and
//! input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for bullhorn-rest operations.
///
/// Callers can branch on the variant rather than matching message strings:
/// a [`Precondition`](Error::Precondition) failure means a handshake stage
/// ran out of order and no network call was attempted, while the other
/// variants describe what the wire or the identity provider did.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, TLS, timeout, redirect loop).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The identity provider rejected credentials, a code, or a token.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A non-2xx HTTP status from any endpoint.
    #[error("server error: {0}")]
    Server(#[from] ServerError),

    /// A handshake stage was invoked without its prerequisite state.
    #[error("precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    /// Input validation errors (URL format, missing configuration).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Server(e) => Some(e.status),
            Error::Auth(AuthError::Rejected(e)) => Some(e.status),
            _ => None,
        }
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

    /// The redirect policy gave up before the chain terminated.
    #[error("redirect chain did not terminate: {message}")]
    Redirect { message: String },

    /// The request could not be constructed.
    #[error("request could not be built: {message}")]
    Builder { message: String },

    /// Generic HTTP error, including response body decode failures.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_redirect() {
            TransportError::Redirect {
                message: err.to_string(),
            }
        } else if err.is_builder() {
            TransportError::Builder {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors raised during the handshake.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity provider answered a handshake request with a
    /// non-transient rejection. The underlying status error is carried
    /// verbatim.
    #[error("rejected by identity provider: {0}")]
    Rejected(ServerError),

    /// The authorization redirect failed before a final URL was reached.
    #[error("authorization redirect failed: {message}")]
    Redirect { message: String },

    /// The REST login answered 2xx but one of the session fields was
    /// empty or absent, so no usable session exists.
    #[error("login response missing {field}")]
    IncompleteSession { field: &'static str },
}

/// A non-2xx HTTP status, with whatever error detail the body carried.
#[derive(Debug)]
pub struct ServerError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code (the OAuth `error` field).
    pub error: Option<String>,
    /// Human-readable message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ServerError {
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

impl std::error::Error for ServerError {}

impl ServerError {
    /// Create a new server error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check whether this status is transient under the default retry
    /// classification (429, 500, 503).
    pub fn is_transient(&self) -> bool {
        matches!(self.status, 429 | 500 | 503)
    }
}

/// Handshake ordering violations. These are raised before any network
/// call is attempted and are always recoverable by completing the
/// missing prior stage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreconditionError {
    /// Stage 2 was invoked without a non-empty authorization code.
    #[error("no auth code present")]
    MissingAuthCode,

    /// Stage 3 was invoked without a non-empty access token.
    #[error("no access token present")]
    MissingAccessToken,

    /// An entity or query operation was invoked without a session.
    #[error("missing rest session data; re-auth required")]
    MissingSession,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL format.
    #[error("invalid base URL '{value}': {reason}")]
    Url { value: String, reason: String },

    /// A required environment variable is unset or empty.
    #[error("missing environment variable {name}")]
    Environment { name: &'static str },
}
