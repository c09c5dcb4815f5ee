//! Blocking HTTP client with LiveJournal session bootstrap.

use exn::ResultExt;
use ljarc_config::Config;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// A fetched page: HTTP status plus decoded body text.
#[derive(Debug, Clone)]
pub struct Page {
    pub status: u16,
    pub body: String,
}

impl Page {
    /// Returns `true` for 2xx responses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The seam between components that need pages and the network.
///
/// The crawler and archiver only ever see this trait; tests substitute an
/// in-memory implementation with canned responses.
pub trait Fetch {
    /// Performs a GET request and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport failures (connection refused,
    /// decode failure); non-success HTTP statuses are returned as a [`Page`]
    /// for the caller to interpret.
    fn get(&self, url: &str) -> Result<Page>;
}

/// Shared authenticated session for every request in a run.
///
/// Holds a cookie store so that the readability-mode cookie obtained during
/// [`connect`](Self::connect) is propagated to all subsequent fetches.
pub struct Client {
    http: reqwest::blocking::Client,
}

impl Client {
    /// Builds the client and performs the one-time session handshake.
    ///
    /// POSTs the readability-mode form so that post pages are served with
    /// the predictable single-post markup the extractor relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Session`] if the handshake request fails or
    /// comes back non-2xx. Callers should treat this as fatal to the run.
    #[instrument(skip(config))]
    pub fn connect(config: &Config) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .build()
            .or_raise(|| ErrorKind::Client)?;
        let response = http
            .post(&config.readability_url)
            .form(&[
                ("Widget[StyleAlwaysMine]_readability", "on"),
                ("Widget[StyleAlwaysMine]_user", ""),
            ])
            .send()
            .or_raise(|| ErrorKind::Session)?;
        if !response.status().is_success() {
            exn::bail!(ErrorKind::Session);
        }
        Ok(Self { http })
    }
}

impl Fetch for Client {
    fn get(&self, url: &str) -> Result<Page> {
        let response = self.http.get(url).send().or_raise(|| ErrorKind::Request(url.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().or_raise(|| ErrorKind::Request(url.to_string()))?;
        Ok(Page { status, body })
    }
}
