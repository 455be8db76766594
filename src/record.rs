//! The page record produced by the transformer.
//!
//! A [`Record`] is the only thing that leaves the core: a page's slug, its
//! reconstructed body text and its resolved creation time.
//!
//! # Example
//!
//! ```
//! use fedwiki_export::Record;
//! use chrono::DateTime;
//!
//! let created = DateTime::from_timestamp_millis(500).unwrap();
//! let record = Record::new("hello-world", "Hi\n", created);
//!
//! assert_eq!(record.file_name(), "hello-world.md");
//! assert_eq!(record.created_millis(), 500);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File extension used for materialized pages.
pub const PAGE_EXTENSION: &str = "md";

/// One page of the export, ready to be written.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `slug` | `String` | Page identifier, verbatim from the export key |
/// | `content` | `String` | Story texts joined by blank lines, with a trailing newline |
/// | `created` | `DateTime<Utc>` | Creation time resolved from the journal |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Page identifier, taken verbatim from the export document key.
    pub slug: String,

    /// Reconstructed page body.
    ///
    /// Always ends with exactly one `\n` appended after the last fragment.
    pub content: String,

    /// Creation time of the page.
    pub created: DateTime<Utc>,
}

impl Record {
    /// Creates a new record.
    pub fn new(slug: impl Into<String>, content: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            slug: slug.into(),
            content: content.into(),
            created,
        }
    }

    /// Returns the page slug.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the page body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the creation time.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Returns the creation time as milliseconds since the Unix epoch.
    pub fn created_millis(&self) -> i64 {
        self.created.timestamp_millis()
    }

    /// Returns the output file name, `<slug>.md`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.slug, PAGE_EXTENSION)
    }

    /// Returns `true` if the page has no body text.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
