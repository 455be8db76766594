//! Where an export document comes from.
//!
//! A run reads its export either from a live wiki (the base URL, to which
//! `/system/export.json` is appended) or from a previously saved file.
//!
//! # Example
//!
//! ```rust
//! use fedwiki_export::source::ExportSource;
//!
//! assert!(ExportSource::detect("http://fed.wiki.org").is_remote());
//! assert!(!ExportSource::detect("backup/export.json").is_remote());
//! ```

use std::fs;
use std::path::PathBuf;

use crate::config::FetchConfig;
use crate::error::Result;
use crate::fetch::is_remote;

/// A location an export can be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSource {
    /// Base URL of a live wiki
    Remote(String),

    /// Path to a saved `export.json`
    Local(PathBuf),
}

impl ExportSource {
    /// Classifies a user-supplied location.
    ///
    /// Anything starting with `http://` or `https://` is remote; everything
    /// else is treated as a file path.
    pub fn detect(input: &str) -> Self {
        if is_remote(input) {
            ExportSource::Remote(input.trim().to_string())
        } else {
            ExportSource::Local(PathBuf::from(input))
        }
    }

    /// Returns `true` for a live wiki.
    pub fn is_remote(&self) -> bool {
        matches!(self, ExportSource::Remote(_))
    }

    /// Loads the raw export bytes.
    #[allow(unused_variables)]
    pub fn load(&self, config: &FetchConfig) -> Result<Vec<u8>> {
        match self {
            #[cfg(feature = "fetch")]
            ExportSource::Remote(base) => crate::fetch::Fetcher::new(config.clone())?.fetch(base),
            #[cfg(not(feature = "fetch"))]
            ExportSource::Remote(base) => Err(crate::error::ExportError::fetch_disabled(base)),
            ExportSource::Local(path) => Ok(fs::read(path)?),
        }
    }
}

impl std::fmt::Display for ExportSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportSource::Remote(base) => write!(f, "{}", base),
            ExportSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}
