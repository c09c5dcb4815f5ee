//! File timestamp capability.
//!
//! Setting a file's timestamps to the original publish date is a cosmetic
//! step; callers treat a failure here as best-effort and keep the archived
//! file. The capability lives behind a trait so that tests and platforms
//! without timestamp support can substitute a no-op.

use std::path::Path;

use exn::ResultExt;
use filetime::FileTime;
use time::PrimitiveDateTime;

use crate::error::{ErrorKind, Result};

/// Sets a file's timestamps to a given moment.
pub trait TimestampSetter {
    /// Sets the timestamps of `path` to `moment`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Timestamps`] if the underlying platform call
    /// fails; callers are expected to log and continue.
    fn set_times(&self, path: &Path, moment: PrimitiveDateTime) -> Result<()>;
}

/// Real implementation backed by the `filetime` crate.
///
/// Sets the accessed and modified times. Creation time is not portably
/// settable (Unix filesystems do not expose it for writing), which is
/// within the capability's best-effort contract.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTimestamps;

impl TimestampSetter for FileTimestamps {
    fn set_times(&self, path: &Path, moment: PrimitiveDateTime) -> Result<()> {
        let instant = FileTime::from_unix_time(moment.assume_utc().unix_timestamp(), 0);
        filetime::set_file_times(path, instant, instant).or_raise(|| ErrorKind::Timestamps)
    }
}

/// No-op implementation for tests and unsupported platforms.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTimestamps;

impl TimestampSetter for NoopTimestamps {
    fn set_times(&self, _path: &Path, _moment: PrimitiveDateTime) -> Result<()> {
        Ok(())
    }
}
