//! URL shaping for one account's blog.

use url::Url;

/// The addressing scheme for a single account: where its listing pages live
/// and which URLs count as its posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    host: String,
}

impl Site {
    pub fn new(account: &str, domain: &str) -> Self {
        Self { host: format!("{account}.{domain}") }
    }

    /// Listing page URL at the given pagination offset.
    pub fn listing_url(&self, skip: u32) -> String {
        format!("https://{}/?skip={skip}", self.host)
    }

    /// Canonicalizes an anchor target into a post permalink.
    ///
    /// Accepts only URLs that belong to this account's host and whose path
    /// ends in the post-page suffix (which also excludes the site root).
    /// The query string is stripped so that pagination parameters never
    /// produce duplicate permalinks; fragments are kept, since comment
    /// anchors are filtered out later by the run driver.
    pub fn permalink(&self, href: &str) -> Option<String> {
        let mut url = Url::parse(href).ok()?;
        if url.host_str() != Some(self.host.as_str()) || !url.path().ends_with(".html") {
            return None;
        }
        url.set_query(None);
        Some(url.to_string())
    }
}
