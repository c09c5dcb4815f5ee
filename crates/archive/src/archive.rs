//! Archiving a single post to a Markdown file.

use std::fs;
use std::path::{Path, PathBuf};

use exn::ResultExt;
use ljarc_crawl::Fetch;
use ljarc_extract::{Extractor, convert};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::{instrument, warn};

use crate::error::{ErrorKind, Result};
use crate::mtime::TimestampSetter;
use crate::sanitize::sanitize_title;

/// Filename date prefix, `2021_07_04` style.
const FILE_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]_[month]_[day]");
/// Header timestamp, matching the format the date was extracted in.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Characters of converted body used as the title when a post has none.
const DERIVED_TITLE_CHARS: usize = 15;

/// Writes posts into an output directory, one file per post.
///
/// Files are named deterministically from the publish date and sanitized
/// title; re-running an archive overwrites same-named files. Nothing is ever
/// updated or deleted.
pub struct Archiver<'a> {
    output_dir: &'a Path,
    timestamps: &'a dyn TimestampSetter,
}

impl<'a> Archiver<'a> {
    pub fn new(output_dir: &'a Path, timestamps: &'a dyn TimestampSetter) -> Self {
        Self { output_dir, timestamps }
    }

    /// Creates the output directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Io`]; unlike everything else in this crate this
    /// is fatal to the run, since no post can be written without it.
    pub fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(self.output_dir).or_raise(|| ErrorKind::Io)
    }

    /// Fetches one permalink and archives it as a Markdown file.
    ///
    /// The file contains the title heading, a bold publish timestamp, the
    /// converted body, and a trailing link back to the source. After the
    /// write, the file's timestamps are set to the publish date; a failure
    /// there is logged and ignored.
    ///
    /// # Errors
    ///
    /// Every error returned here is a skip reason for this one post: a
    /// failed or non-2xx fetch, missing body or date, an unparseable date,
    /// or a failed file write. Callers log the reason and move on to the
    /// next permalink.
    #[instrument(skip(self, fetch))]
    pub fn archive_post(&self, fetch: &dyn Fetch, url: &str) -> Result<PathBuf> {
        let page = fetch.get(url).map_err(ErrorKind::fetch)?;
        if !page.is_success() {
            exn::bail!(ErrorKind::Fetch(format!("status {}", page.status)));
        }
        let post = Extractor::new(&page.body, url).post().map_err(ErrorKind::extract)?;
        let body = convert(&post.body_html);
        let title = post.title.unwrap_or_else(|| body.chars().take(DERIVED_TITLE_CHARS).collect());

        let date = post.published.format(&FILE_DATE_FORMAT).or_raise(|| ErrorKind::Format)?;
        let path = self.output_dir.join(format!("{date}_{}.md", sanitize_title(&title)));
        let timestamp = post.published.format(&TIMESTAMP_FORMAT).or_raise(|| ErrorKind::Format)?;
        let contents = format!("# {title}\n\n**{timestamp}**\n\n{body}\n\n[Original Post]({url})");
        fs::write(&path, contents).or_raise(|| ErrorKind::Io)?;

        if let Err(error) = self.timestamps.set_times(&path, post.published) {
            warn!(path = %path.display(), %error, "could not set file timestamps");
        }
        Ok(path)
    }
}
