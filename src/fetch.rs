//! Document fetcher.
//!
//! Downloads a wiki's full export from `<base>/system/export.json`. The
//! fetcher makes exactly one request: it neither retries nor caches.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "fetch")]
//! # fn main() -> fedwiki_export::Result<()> {
//! use fedwiki_export::config::FetchConfig;
//! use fedwiki_export::fetch::Fetcher;
//! use fedwiki_export::Transformer;
//!
//! let fetcher = Fetcher::new(FetchConfig::new())?;
//! let bytes = fetcher.fetch("http://fed.wiki.org")?;
//! let export = Transformer::new().transform(&bytes)?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "fetch"))]
//! # fn main() {}
//! ```

use crate::error::{ExportError, Result};

#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use tracing::{debug, info};

#[cfg(feature = "fetch")]
use crate::config::FetchConfig;

/// Path of the full-site export, relative to the wiki base.
pub const EXPORT_PATH: &str = "/system/export.json";

/// Builds the export URL for a wiki base location.
///
/// Trailing slashes on the base are dropped. A base that already points at
/// the export is returned unchanged.
///
/// # Example
///
/// ```rust
/// use fedwiki_export::fetch::export_url;
///
/// assert_eq!(
///     export_url("http://fed.wiki.org/").unwrap(),
///     "http://fed.wiki.org/system/export.json"
/// );
/// assert!(export_url("fed.wiki.org").is_err());
/// ```
pub fn export_url(base: &str) -> Result<String> {
    let trimmed = base.trim().trim_end_matches('/');

    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    if host.is_none_or(str::is_empty) {
        return Err(ExportError::invalid_url(base));
    }

    if trimmed.ends_with(EXPORT_PATH) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}{EXPORT_PATH}"))
    }
}

/// Returns `true` if `input` looks like an http(s) location.
pub fn is_remote(input: &str) -> bool {
    let input = input.trim();
    input.starts_with("http://") || input.starts_with("https://")
}

/// Blocking HTTP fetcher for export documents.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::blocking::Client,
    config: FetchConfig,
}

#[cfg(feature = "fetch")]
impl Fetcher {
    /// Creates a fetcher with its own HTTP client.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ExportError::fetch_transport("<client>", e))?;

        Ok(Self { client, config })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Downloads the raw export bytes for the wiki at `base`.
    ///
    /// Fails on any transport error and on every non-2xx status.
    pub fn fetch(&self, base: &str) -> Result<Vec<u8>> {
        let url = export_url(base)?;
        info!(%url, "fetching export");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ExportError::fetch_transport(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::fetch_status(url, status.as_u16()));
        }

        let bytes = response
            .bytes()
            .map_err(|e| ExportError::fetch_transport(&url, e))?;
        debug!(%url, bytes = bytes.len(), "export downloaded");

        Ok(bytes.to_vec())
    }
}
