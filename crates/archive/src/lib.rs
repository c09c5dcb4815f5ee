//! Post archiving: one Markdown file per post, timestamped to match the
//! original publish date.

mod archive;
pub mod error;
mod mtime;
mod sanitize;

pub use crate::archive::Archiver;
pub use crate::mtime::{FileTimestamps, NoopTimestamps, TimestampSetter};
pub use crate::sanitize::sanitize_title;
