//! Configuration loading for ljarc.
//!
//! Every component takes an explicit [`Config`] value at construction; there
//! is no process-wide mutable state. Values are merged from three sources in
//! increasing priority: built-in defaults, an optional TOML file, and
//! `LJARC_*` environment variables.

pub mod error;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// Environment variable prefix for configuration overrides.
const ENV_PREFIX: &str = "LJARC_";

/// Runtime configuration for an archiving run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory that archived Markdown files are written into.
    pub output_dir: PathBuf,
    /// Base domain that account subdomains hang off of.
    pub domain: String,
    /// Endpoint POSTed to once per run to force the readability style,
    /// so post pages come back in a predictable markup.
    pub readability_url: String,
    /// Browser-identifying User-Agent sent with every request.
    pub user_agent: String,
    /// Pagination cursor increment per listing fetch.
    pub page_step: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./MD"),
            domain: "livejournal.com".to_string(),
            readability_url: "https://www.livejournal.com/tools/setstylemine.bml".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/93.0.4577.63 Safari/537.36"
                .to_string(),
            page_step: 10,
        }
    }
}

impl Config {
    /// Loads configuration from defaults, an optional TOML file, and the
    /// environment.
    ///
    /// When `file` is `None`, the per-user configuration file is used if it
    /// exists (and silently skipped otherwise). An explicitly passed path is
    /// always merged, so typos in `--config` surface as errors instead of
    /// falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if any source fails to parse or the merged values
    /// cannot be deserialized into [`Config`].
    #[instrument]
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        match file {
            Some(path) => figment = figment.merge(Toml::file_exact(path)),
            None => {
                if let Some(path) = Self::default_file()
                    && path.exists()
                {
                    figment = figment.merge(Toml::file(path));
                }
            },
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .or_raise(|| ErrorKind::Invalid("could not merge configuration sources".to_string()))
    }

    /// Per-user configuration file location, if a home directory exists.
    pub fn default_file() -> Option<PathBuf> {
        ProjectDirs::from("", "", "ljarc").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn defaults_are_complete() {
        let config = Config::default();
        assert_eq!(config.page_step, 10);
        assert_eq!(config.domain, "livejournal.com");
        assert_eq!(config.output_dir, PathBuf::from("./MD"));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "output_dir = \"/tmp/archive\"\npage_step = 25").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/archive"));
        assert_eq!(config.page_step, 25);
        // Untouched keys keep their defaults.
        assert_eq!(config.domain, "livejournal.com");
    }

    #[rstest]
    #[case("page_step = \"lots\"")]
    #[case("page_step = -1")]
    #[case("output_dir = 5")]
    #[case("domain = [\"livejournal.com\"]")]
    fn invalid_file_is_an_error(#[case] line: &str) {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "{line}").unwrap();
        assert!(Config::load(Some(file.path())).is_err());
    }
}
