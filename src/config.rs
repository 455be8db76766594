//! Configuration types for transforming, fetching and writing.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`TransformConfig`] - how page records are derived from the export
//! - [`FetchConfig`] - HTTP settings for the document fetcher
//! - [`BatchPolicy`] - what the materializer does when a write fails
//!
//! # Example
//!
//! ```rust
//! use fedwiki_export::config::{CreatedPolicy, TransformConfig};
//! use fedwiki_export::Transformer;
//!
//! let config = TransformConfig::new().with_created_policy(CreatedPolicy::FirstCreateOrFork);
//! let transformer = Transformer::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// How a page's creation time is chosen from its journal.
///
/// Journals are not guaranteed to be in chronological order and carry
/// heterogeneous event types, so the choice matters.
///
/// # Example
///
/// ```rust
/// use fedwiki_export::config::CreatedPolicy;
/// use std::str::FromStr;
///
/// let policy = CreatedPolicy::from_str("first-create").unwrap();
/// assert_eq!(policy, CreatedPolicy::FirstCreateOrFork);
/// assert_eq!(CreatedPolicy::default(), CreatedPolicy::LatestJournalDate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreatedPolicy {
    /// Maximum `date` across every journal entry, whatever its type.
    ///
    /// A page edited after it was created or forked gets the date of
    /// that later edit.
    #[default]
    #[serde(alias = "latest")]
    LatestJournalDate,

    /// Date of the first `create` or `fork` entry in journal order.
    ///
    /// Entries without a date are passed over. Pages whose journal has no
    /// dated create/fork entry have no creation time under this policy.
    #[serde(alias = "first-create")]
    FirstCreateOrFork,
}

impl CreatedPolicy {
    /// Returns all policy names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &[
            "latest",
            "latest-journal-date",
            "first-create",
            "first-create-or-fork",
        ]
    }

    /// Returns `true` if a journal entry of this type can mark creation.
    pub fn is_creation_event(kind: &str) -> bool {
        matches!(kind, "create" | "fork")
    }
}

impl std::fmt::Display for CreatedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreatedPolicy::LatestJournalDate => write!(f, "latest"),
            CreatedPolicy::FirstCreateOrFork => write!(f, "first-create"),
        }
    }
}

impl std::str::FromStr for CreatedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "latest" | "latest-journal-date" => Ok(CreatedPolicy::LatestJournalDate),
            "first-create" | "first-create-or-fork" => Ok(CreatedPolicy::FirstCreateOrFork),
            _ => Err(format!(
                "Unknown creation policy: '{}'. Expected one of: {}",
                s,
                CreatedPolicy::all_names().join(", ")
            )),
        }
    }
}

/// Configuration for the export transformer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Creation-time policy (default: [`CreatedPolicy::LatestJournalDate`])
    pub created_policy: CreatedPolicy,
}

impl TransformConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the creation-time policy.
    #[must_use]
    pub fn with_created_policy(mut self, policy: CreatedPolicy) -> Self {
        self.created_policy = policy;
        self
    }
}

/// Configuration for the document fetcher.
///
/// # Example
///
/// ```rust
/// use fedwiki_export::config::FetchConfig;
///
/// let config = FetchConfig::new().with_timeout_secs(5);
/// assert_eq!(config.timeout_secs, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// User-Agent header sent with the request
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("fedwiki-export/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets the User-Agent header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// What to do when one page fails to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchPolicy {
    /// Stop at the first failure
    #[default]
    Abort,

    /// Keep writing the remaining pages and report failures at the end
    Continue,
}
