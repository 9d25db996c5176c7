//! Authentication endpoint error types.

use thiserror::Error;

/// Errors surfaced by the authentication endpoint.
///
/// These are propagated unchanged to the UI caller, which owns the
/// user-visible messaging. The state engine never generates them itself.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Wrong username or password (HTTP 401).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Authenticated but not allowed (HTTP 403).
    #[error("access forbidden")]
    Forbidden,

    /// The server failed (HTTP 5xx).
    #[error("server error (status {0})")]
    Server(u16),

    /// The server could not be reached at all.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response body was not the expected shape.
    #[error("malformed response: {0}")]
    Parse(#[source] reqwest::Error),

    /// Any other non-success status.
    #[error("unexpected status {0}")]
    Unexpected(u16),
}
