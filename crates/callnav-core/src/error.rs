//! Error type for the fallible setup paths.
//!
//! Navigation itself never fails: unresolvable calls, unbalanced parentheses,
//! and out-of-range jumps all come back as "nothing to do". Only loading the
//! grammar, reading configuration, and file I/O can produce an [`Error`].

use std::io;
use std::path::PathBuf;

/// Errors surfaced by `callnav-core`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The bundled Python grammar is incompatible with the linked
    /// tree-sitter runtime.
    #[error("failed to load the Python grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// A configuration file could not be parsed.
    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Shorthand result type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
