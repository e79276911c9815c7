//! Configuration loaded from `callnav.toml`.
//!
//! Every field has a default, so an empty file (or no file at all) is valid.
//! Unknown keys are rejected to catch typos early.
//!
//! ```toml
//! cache_capacity = 1000
//! expansion_limit = 60
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default number of distinct call texts kept in the argument cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Default ceiling on `select-more` steps while probing an expansion.
pub const DEFAULT_EXPANSION_LIMIT: usize = 60;

/// Tunables for the resolver cache and the expansion driver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum number of `(call text, keywords-only)` entries kept in the
    /// argument cache. Values below 1 are treated as 1.
    pub cache_capacity: usize,

    /// Maximum number of selection enlargements attempted by the
    /// expand-selection commands.
    pub expansion_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            expansion_limit: DEFAULT_EXPANSION_LIMIT,
        }
    }
}

impl Config {
    /// Parse a configuration from TOML source. `origin` is only used in the
    /// error message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the TOML is malformed or has unknown keys.
    pub fn from_toml(source: &str, origin: &Path) -> Result<Self> {
        toml::from_str(source).map_err(|source| Error::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&source, path)
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.cache_capacity, 1000);
        assert_eq!(config.expansion_limit, 60);
    }

    #[test]
    fn empty_toml_is_default() {
        let config = Config::from_toml("", Path::new("callnav.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = Config::from_toml("cache_capacity = 8\n", Path::new("x.toml")).unwrap();
        assert_eq!(config.cache_capacity, 8);
        assert_eq!(config.expansion_limit, DEFAULT_EXPANSION_LIMIT);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = Config::from_toml("cache_size = 8\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "expansion_limit = 5").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.expansion_limit, 5);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn load_or_default_without_path() {
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }
}
