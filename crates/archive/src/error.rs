//! Archive Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use ljarc_crawl::error::Error as CrawlError;
use ljarc_extract::error::{Error as ExtractError, ErrorKind as ExtractErrorKind};

/// An archive error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
/// Everything except output-directory creation is a per-post skip reason.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The post page could not be fetched.
    #[display("failed to fetch post: {_0}")]
    Fetch(#[error(not(source))] String),
    /// The post page was fetched but its content could not be extracted.
    #[display("failed to extract post: {_0}")]
    Extract(ExtractErrorKind),
    /// The archive file could not be written.
    #[display("failed to write archive file")]
    Io,
    /// The published timestamp could not be rendered into a filename or
    /// header line.
    #[display("failed to format timestamp")]
    Format,
    /// The file's timestamps could not be changed. Cosmetic; callers log
    /// this and keep the archived file.
    #[display("could not set file timestamps")]
    Timestamps,
}

impl ErrorKind {
    /// Convert a fetch error into an archive error, preserving the crawl
    /// crate's `Exn` frame as a child in its own error tree.
    #[track_caller]
    pub fn fetch(err: CrawlError) -> Error {
        err.raise(ErrorKind::Fetch("request failed".to_string()))
    }

    /// Convert an extraction error into an archive error, preserving the
    /// extract crate's `Exn` frame as a child in its own error tree.
    #[track_caller]
    pub fn extract(err: ExtractError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Extract(inner))
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Io | Self::Timestamps)
    }
}
