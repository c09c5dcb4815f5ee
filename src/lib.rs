//! Run driver: discover an account's permalinks, then archive each post.
//!
//! The crawl runs to completion before any post is archived, so there is no
//! overlap between the two phases; exactly one post is in flight at a time.

use ljarc_archive::error::Result;
use ljarc_archive::{Archiver, TimestampSetter};
use ljarc_config::Config;
use ljarc_crawl::{Fetch, Site, permalinks};
use tracing::{info, instrument, warn};

/// Outcome counts for one archiving run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub archived: usize,
    pub skipped: usize,
}

/// Crawls the account's listing and archives every discovered post.
///
/// Per-post failures are logged and counted as skips; they never abort the
/// run. Permalinks are processed in sorted order so progress output is
/// stable between runs.
///
/// # Errors
///
/// Returns an error only if the output directory cannot be created.
#[instrument(skip(fetch, timestamps, config))]
pub fn run(
    fetch: &dyn Fetch,
    timestamps: &dyn TimestampSetter,
    config: &Config,
    account: &str,
) -> Result<RunReport> {
    let site = Site::new(account, &config.domain);
    let links = permalinks(fetch, &site, config.page_step);
    // Comment anchors point at a sub-section of a post, not the post itself.
    let mut links: Vec<String> = links.into_iter().filter(|link| !link.contains("#comments")).collect();
    links.sort();
    info!(posts = links.len(), account, "crawl finished, archiving");

    let archiver = Archiver::new(&config.output_dir, timestamps);
    archiver.ensure_output_dir()?;
    let mut report = RunReport { archived: 0, skipped: 0 };
    for link in &links {
        match archiver.archive_post(fetch, link) {
            Ok(path) => {
                report.archived += 1;
                info!(path = %path.display(), "archived");
            },
            Err(error) => {
                report.skipped += 1;
                warn!(url = %link, %error, "skipping post");
            },
        }
    }
    Ok(report)
}
