//! Permalink discovery and HTTP session handling.
//!
//! The [`Fetch`] trait is the only way the rest of the workspace talks to
//! the network; [`Client`] is its real implementation, carrying the session
//! cookies established by the one-time readability handshake.

mod client;
mod consts;
mod crawl;
pub mod error;
mod site;

pub use crate::client::{Client, Fetch, Page};
pub use crate::crawl::permalinks;
pub use crate::site::Site;
