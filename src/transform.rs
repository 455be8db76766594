//! The export transformer.
//!
//! [`Transformer`] turns the raw bytes of a federated-wiki `export.json` into
//! an [`Export`]: one [`Record`] per page, plus a report of the pages that
//! could not be converted.
//!
//! The transformation is a pure function of its input. It reads no clock and
//! touches no shared state, so a `Transformer` can be shared freely across
//! threads.
//!
//! # Example
//!
//! ```rust
//! use fedwiki_export::Transformer;
//!
//! let json = r#"{
//!     "hello-world": {
//!         "story": [{"text": "Hi"}],
//!         "journal": [{"type": "create", "date": 0}, {"type": "fork", "date": 500}]
//!     }
//! }"#;
//!
//! let export = Transformer::new().transform_str(json)?;
//! assert_eq!(export.records.len(), 1);
//! assert_eq!(export.records[0].content, "Hi\n");
//! assert_eq!(export.records[0].created_millis(), 500);
//! # Ok::<(), fedwiki_export::ExportError>(())
//! ```
//!
//! # Failure policy
//!
//! - Bytes that are not JSON, or JSON whose root is not an object, fail the
//!   whole call with [`ExportError::Parse`].
//! - A page that cannot be converted (not an object, wrong `story`/`journal`
//!   shape, no usable creation date) is recorded in [`Export::skipped`] and
//!   the remaining pages are still transformed.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::Record;
use crate::config::{CreatedPolicy, TransformConfig};
use crate::error::{ExportError, PageExtractionError, Result};
use crate::parsing::{json_type_name, parse_page};

/// A page that was left out of the export, and why.
#[derive(Debug)]
pub struct SkippedPage {
    /// The page identifier
    pub slug: String,
    /// Why no record was produced
    pub reason: PageExtractionError,
}

impl SkippedPage {
    /// Converts the skip into a crate-level error.
    pub fn into_error(self) -> ExportError {
        ExportError::page(self.slug, self.reason)
    }
}

impl std::fmt::Display for SkippedPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.slug, self.reason)
    }
}

/// Result of transforming one export document.
///
/// Records keep the key order of the source document.
#[derive(Debug, Default)]
pub struct Export {
    /// Successfully converted pages
    pub records: Vec<Record>,
    /// Pages that produced no record
    pub skipped: Vec<SkippedPage>,
}

impl Export {
    /// Number of pages in the source document.
    pub fn page_count(&self) -> usize {
        self.records.len() + self.skipped.len()
    }

    /// Returns `true` if every page produced a record.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Looks up a record by slug.
    pub fn get(&self, slug: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.slug == slug)
    }

    /// Consumes the export, returning only the records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Fails with the first skipped page, if any.
    ///
    /// For callers that want an all-or-nothing transformation.
    pub fn into_strict(mut self) -> Result<Vec<Record>> {
        if self.skipped.is_empty() {
            Ok(self.records)
        } else {
            Err(self.skipped.swap_remove(0).into_error())
        }
    }
}

/// Converts export documents into page records.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transformer {
    config: TransformConfig,
}

impl Transformer {
    /// Creates a transformer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transformer with a custom configuration.
    pub fn with_config(config: TransformConfig) -> Self {
        Self { config }
    }

    /// Creates a transformer using the given creation-time policy.
    pub fn with_policy(policy: CreatedPolicy) -> Self {
        Self::with_config(TransformConfig::new().with_created_policy(policy))
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Transforms raw export bytes.
    pub fn transform(&self, bytes: &[u8]) -> Result<Export> {
        self.transform_document(bytes, None)
    }

    /// Transforms an export already held as a string.
    pub fn transform_str(&self, content: &str) -> Result<Export> {
        self.transform_document(content.as_bytes(), None)
    }

    /// Transforms raw bytes, naming their origin in parse errors.
    pub fn transform_labeled(&self, bytes: &[u8], origin: &str) -> Result<Export> {
        self.transform_document(bytes, Some(origin.to_string()))
    }

    /// Reads and transforms a local `export.json`.
    pub fn transform_file(&self, path: &Path) -> Result<Export> {
        let bytes = fs::read(path)?;
        self.transform_document(&bytes, Some(path.display().to_string()))
    }

    fn transform_document(&self, bytes: &[u8], origin: Option<String>) -> Result<Export> {
        let document: Value =
            serde_json::from_slice(bytes).map_err(|e| ExportError::parse_json(e, origin.clone()))?;

        let pages = match document {
            Value::Object(pages) => pages,
            other => return Err(ExportError::not_an_object(json_type_name(&other), origin)),
        };

        let policy = self.config.created_policy;
        let mut export = Export {
            records: Vec::with_capacity(pages.len()),
            skipped: Vec::new(),
        };

        for (slug, page) in pages {
            match parse_page(&slug, page, policy) {
                Ok(record) => {
                    debug!(slug = %record.slug, created = %record.created, "page transformed");
                    export.records.push(record);
                }
                Err(reason) => {
                    warn!(%slug, %reason, "skipping page");
                    export.skipped.push(SkippedPage { slug, reason });
                }
            }
        }

        debug!(
            records = export.records.len(),
            skipped = export.skipped.len(),
            "export transformed"
        );
        Ok(export)
    }
}

/// Transforms raw export bytes with the default configuration.
pub fn transform(bytes: &[u8]) -> Result<Export> {
    Transformer::new().transform(bytes)
}
