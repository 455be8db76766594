//! Unified error types for fedwiki-export.
//!
//! This module provides a single [`ExportError`] enum that covers every stage
//! of a run: fetching the export, parsing it, extracting pages and writing
//! files. Each variant knows which [`stage`](ExportError::stage) it belongs to
//! so the binary can report where a run stopped.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::CreatedPolicy;

/// A specialized [`Result`] type for fedwiki-export operations.
///
/// # Example
///
/// ```rust
/// use fedwiki_export::error::Result;
/// use fedwiki_export::Record;
///
/// fn my_function() -> Result<Vec<Record>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ExportError>;

/// The error type for all fedwiki-export operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// An I/O error occurred while reading a local export.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export document could not be retrieved.
    ///
    /// Covers transport failures, non-success HTTP statuses and malformed
    /// base URLs.
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        /// The URL (or base location) that was requested
        url: String,
        /// What went wrong
        #[source]
        source: FetchErrorKind,
    },

    /// The export document is not a JSON object.
    ///
    /// Fatal to the whole run: there is nothing to transform.
    #[error("Failed to parse export document{}: {source}", origin.as_ref().map(|o| format!(" (from: {})", o)).unwrap_or_default())]
    Parse {
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// Where the document came from, if known
        origin: Option<String>,
    },

    /// A single page could not be turned into a record.
    ///
    /// The transformer reports these as skipped pages rather than failing;
    /// this variant exists for callers that want to escalate them.
    #[error("Page '{slug}': {source}")]
    PageExtraction {
        /// The page identifier
        slug: String,
        /// Why extraction failed
        #[source]
        source: PageExtractionError,
    },

    /// The output directory could not be created.
    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        /// The directory that was requested
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A page file could not be written or stamped.
    #[error("Failed to write page '{slug}' to {}: {source}", path.display())]
    Write {
        /// The page identifier
        slug: String,
        /// Target file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The slug cannot be used as a file name inside the output directory.
    ///
    /// Slugs are never rewritten, so a slug containing a path separator
    /// (or one of `.`, `..`, the empty string) is refused instead.
    #[error("Refusing to write page with unsafe slug '{slug}'")]
    InvalidSlug {
        /// The offending page identifier
        slug: String,
    },

    /// Some pages failed to write in best-effort mode.
    #[error("{failed} of {total} pages could not be written")]
    Incomplete {
        /// Number of failed pages
        failed: usize,
        /// Number of pages attempted
        total: usize,
    },

    /// The manifest file could not be written.
    #[error("Failed to write manifest {}: {source}", path.display())]
    ManifestWrite {
        /// Target manifest path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The manifest path has an extension we don't write.
    #[error("Unknown manifest extension '.{extension}'. Expected one of: json, jsonl, ndjson")]
    UnknownManifestFormat {
        /// The extension that was found
        extension: String,
    },

    /// JSON serialization error (manifest output).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kinds of fetch errors.
#[derive(Debug, Error)]
pub enum FetchErrorKind {
    /// Transport-level failure (DNS, TLS, connection, timeout, body read)
    #[cfg(feature = "fetch")]
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("server responded with HTTP {0}")]
    Status(u16),
    /// The base location is not an http(s) URL
    #[error("not an http(s) URL")]
    InvalidUrl,
    /// The crate was built without HTTP support
    #[error("built without the `fetch` feature")]
    Disabled,
}

/// Kinds of document-level parse errors.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// The bytes are not valid JSON
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// Valid JSON, but the root is not an object
    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),
}

/// Why a single page was skipped.
#[derive(Debug, Error)]
pub enum PageExtractionError {
    /// The page value is not a JSON object
    #[error("page is not a JSON object (found {0})")]
    NotAnObject(&'static str),

    /// `story` or `journal` has the wrong shape
    #[error("malformed page: {0}")]
    Malformed(#[source] serde_json::Error),

    /// No journal entry yields a creation date under the active policy
    #[error("journal has no usable date for the '{policy}' creation policy")]
    NoCreationDate {
        /// The policy that was applied
        policy: CreatedPolicy,
    },

    /// The resolved date cannot be represented as a timestamp
    #[error("journal date {0} ms is outside the representable range")]
    DateOutOfRange(i64),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ExportError {
    /// Creates a fetch error for a non-success HTTP status.
    pub fn fetch_status(url: impl Into<String>, status: u16) -> Self {
        ExportError::Fetch {
            url: url.into(),
            source: FetchErrorKind::Status(status),
        }
    }

    /// Creates a fetch error for a transport failure.
    #[cfg(feature = "fetch")]
    pub fn fetch_transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        ExportError::Fetch {
            url: url.into(),
            source: FetchErrorKind::Transport(source),
        }
    }

    /// Creates a fetch error for a base location that is not an http(s) URL.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        ExportError::Fetch {
            url: url.into(),
            source: FetchErrorKind::InvalidUrl,
        }
    }

    /// Creates a fetch error for builds without HTTP support.
    pub fn fetch_disabled(url: impl Into<String>) -> Self {
        ExportError::Fetch {
            url: url.into(),
            source: FetchErrorKind::Disabled,
        }
    }

    /// Creates a parse error for invalid JSON.
    pub fn parse_json(source: serde_json::Error, origin: Option<String>) -> Self {
        ExportError::Parse {
            source: ParseErrorKind::Json(source),
            origin,
        }
    }

    /// Creates a parse error for a non-object root.
    pub fn not_an_object(found: &'static str, origin: Option<String>) -> Self {
        ExportError::Parse {
            source: ParseErrorKind::NotAnObject(found),
            origin,
        }
    }

    /// Wraps a page extraction error with its slug.
    pub fn page(slug: impl Into<String>, source: PageExtractionError) -> Self {
        ExportError::PageExtraction {
            slug: slug.into(),
            source,
        }
    }

    /// Creates a write error for a page file.
    pub fn write(slug: impl Into<String>, path: &Path, source: io::Error) -> Self {
        ExportError::Write {
            slug: slug.into(),
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates an output directory error.
    pub fn output_dir(path: &Path, source: io::Error) -> Self {
        ExportError::OutputDir {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a manifest write error.
    pub fn manifest_write(path: &Path, source: io::Error) -> Self {
        ExportError::ManifestWrite {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates an unsafe slug error.
    pub fn invalid_slug(slug: impl Into<String>) -> Self {
        ExportError::InvalidSlug { slug: slug.into() }
    }

    /// Returns the run stage this error belongs to.
    ///
    /// One of `"read"`, `"fetch"`, `"parse"`, `"transform"`, `"write"` or
    /// `"manifest"`.
    pub fn stage(&self) -> &'static str {
        match self {
            ExportError::Io(_) => "read",
            ExportError::Fetch { .. } => "fetch",
            ExportError::Parse { .. } => "parse",
            ExportError::PageExtraction { .. } => "transform",
            ExportError::OutputDir { .. }
            | ExportError::Write { .. }
            | ExportError::InvalidSlug { .. }
            | ExportError::Incomplete { .. } => "write",
            ExportError::ManifestWrite { .. }
            | ExportError::UnknownManifestFormat { .. }
            | ExportError::Json(_) => "manifest",
        }
    }

    /// Returns the offending page identifier, if the error concerns one page.
    pub fn slug(&self) -> Option<&str> {
        match self {
            ExportError::PageExtraction { slug, .. }
            | ExportError::Write { slug, .. }
            | ExportError::InvalidSlug { slug } => Some(slug),
            _ => None,
        }
    }

    /// Returns `true` if this is a fetch error.
    pub fn is_fetch(&self) -> bool {
        matches!(self, ExportError::Fetch { .. })
    }

    /// Returns `true` if this is a document parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ExportError::Parse { .. })
    }

    /// Returns `true` if this error happened while writing output.
    pub fn is_write(&self) -> bool {
        self.stage() == "write"
    }

    /// Returns `true` if this is a page extraction error.
    pub fn is_page_extraction(&self) -> bool {
        matches!(self, ExportError::PageExtraction { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
