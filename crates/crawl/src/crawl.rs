//! Permalink discovery over a paginated listing.

use std::collections::HashSet;

use scraper::Html;
use tracing::{debug, instrument, warn};

use crate::client::Fetch;
use crate::consts;
use crate::site::Site;

/// Walks an account's listing pages and accumulates every post permalink.
///
/// The listing exposes no total count, so the loop advances a `skip` offset
/// by `step` per page and stops on convergence: a page that yields no
/// permalinks, or only permalinks already seen, ends the crawl. The subset
/// check is what keeps the loop bounded on listings whose last page repeats
/// earlier content instead of coming back empty.
///
/// A failed listing fetch (transport error or non-2xx status) is treated as
/// the end of pagination, not as a fatal error; it is logged and the links
/// gathered so far are returned.
#[instrument(skip(fetch))]
pub fn permalinks(fetch: &dyn Fetch, site: &Site, step: u32) -> HashSet<String> {
    let mut all = HashSet::new();
    let mut skip = 0;
    loop {
        let url = site.listing_url(skip);
        let page = match fetch.get(&url) {
            Ok(page) if page.is_success() => page,
            Ok(page) => {
                warn!(url = %url, status = page.status, "failed to fetch listing page, stopping pagination");
                break;
            },
            Err(error) => {
                warn!(url = %url, %error, "failed to fetch listing page, stopping pagination");
                break;
            },
        };
        let found = listing_permalinks(&page.body, site);
        if found.is_empty() || found.is_subset(&all) {
            debug!(skip, "listing converged");
            break;
        }
        all.extend(found);
        skip += step;
    }
    all
}

/// Extracts this account's post permalinks from one listing page.
fn listing_permalinks(html: &str, site: &Site) -> HashSet<String> {
    let document = Html::parse_document(html);
    document
        .select(&consts::ANCHOR_SELECTOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| site.permalink(href))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Page;
    use crate::error::{ErrorKind, Result};
    use std::collections::HashMap;

    struct StubFetch {
        pages: HashMap<String, Page>,
    }
    impl StubFetch {
        fn new<const N: usize>(pages: [(&str, &str); N]) -> Self {
            Self {
                pages: pages
                    .into_iter()
                    .map(|(url, body)| (url.to_string(), Page { status: 200, body: body.to_string() }))
                    .collect(),
            }
        }
    }
    impl Fetch for StubFetch {
        fn get(&self, url: &str) -> Result<Page> {
            match self.pages.get(url) {
                Some(page) => Ok(page.clone()),
                None => exn::bail!(ErrorKind::Request(url.to_string())),
            }
        }
    }

    fn site() -> Site {
        Site::new("alice", "livejournal.com")
    }

    fn listing(links: &[&str]) -> String {
        let anchors: String = links.iter().map(|href| format!("<a href=\"{href}\">post</a>")).collect();
        format!("<html><body>{anchors}</body></html>")
    }

    #[test]
    fn collects_links_across_pages() {
        let fetch = StubFetch::new([
            (
                "https://alice.livejournal.com/?skip=0",
                &listing(&["https://alice.livejournal.com/1.html", "https://alice.livejournal.com/2.html"]),
            ),
            ("https://alice.livejournal.com/?skip=10", &listing(&["https://alice.livejournal.com/3.html"])),
            ("https://alice.livejournal.com/?skip=20", &listing(&[])),
        ]);
        let links = permalinks(&fetch, &site(), 10);
        assert_eq!(links.len(), 3);
        assert!(links.contains("https://alice.livejournal.com/3.html"));
    }

    #[test]
    fn page_step_does_not_change_the_result() {
        // Same three pages exposed at step-5 offsets.
        let fetch = StubFetch::new([
            (
                "https://alice.livejournal.com/?skip=0",
                &listing(&["https://alice.livejournal.com/1.html", "https://alice.livejournal.com/2.html"]),
            ),
            ("https://alice.livejournal.com/?skip=5", &listing(&["https://alice.livejournal.com/3.html"])),
            ("https://alice.livejournal.com/?skip=10", &listing(&[])),
        ]);
        let links = permalinks(&fetch, &site(), 5);
        assert_eq!(links.len(), 3);
    }

    #[test]
    fn terminates_when_last_page_repeats_prior_content() {
        // Every page past the first serves the same links; without the
        // subset check this would loop forever.
        let first = listing(&["https://alice.livejournal.com/1.html", "https://alice.livejournal.com/2.html"]);
        let repeat = listing(&["https://alice.livejournal.com/2.html"]);
        let fetch = StubFetch::new([
            ("https://alice.livejournal.com/?skip=0", first.as_str()),
            ("https://alice.livejournal.com/?skip=10", repeat.as_str()),
        ]);
        let links = permalinks(&fetch, &site(), 10);
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn fetch_failure_ends_pagination_with_partial_results() {
        // Only the first page exists; the stub errors on skip=10.
        let fetch = StubFetch::new([(
            "https://alice.livejournal.com/?skip=0",
            &listing(&["https://alice.livejournal.com/1.html"]),
        )]);
        let links = permalinks(&fetch, &site(), 10);
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn duplicate_and_foreign_links_are_ignored() {
        let fetch = StubFetch::new([
            (
                "https://alice.livejournal.com/?skip=0",
                &listing(&[
                    "https://alice.livejournal.com/1.html",
                    "https://alice.livejournal.com/1.html?thread=4",
                    "https://www.livejournal.com/news.html",
                    "https://alice.livejournal.com/",
                ]),
            ),
            ("https://alice.livejournal.com/?skip=10", &listing(&[])),
        ]);
        let links = permalinks(&fetch, &site(), 10);
        assert_eq!(links, HashSet::from(["https://alice.livejournal.com/1.html".to_string()]));
    }
}
