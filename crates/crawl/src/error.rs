//! Crawl Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A crawl error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for crawl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The HTTP client itself could not be constructed.
    #[display("failed to build HTTP client")]
    Client,
    /// The session handshake did not complete; nothing else will work
    /// without the session cookies, so this aborts the run.
    #[display("failed to establish session")]
    Session,
    /// A single request could not be sent or its body read.
    #[display("request failed: {_0}")]
    Request(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Session | Self::Request(_))
    }
}
