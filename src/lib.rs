//! # fedwiki-export
//!
//! A Rust library and CLI for mirroring a federated-wiki site into plain
//! files: one Markdown file per page, each with its modification time set to
//! the page's creation time.
//!
//! ## Overview
//!
//! A federated wiki publishes its whole site at `/system/export.json`: a JSON
//! object mapping every page slug to the page, its `story` (body fragments)
//! and its `journal` (edit history). The crate works in three steps:
//!
//! 1. **Fetch** the export over HTTP ([`fetch`]) or read a saved copy
//!    ([`source`])
//! 2. **Transform** it into [`Record`]s ([`transform`]), the pure core of
//!    the crate
//! 3. **Materialize** each record as `<slug>.md` ([`output`])
//!
//! ## Quick Start
//!
//! ```rust
//! use fedwiki_export::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let json = r#"{
//!         "hello-world": {
//!             "story": [{"text": "Hi"}],
//!             "journal": [{"type": "create", "date": 0}, {"type": "fork", "date": 500}]
//!         }
//!     }"#;
//!
//!     let export = Transformer::new().transform_str(json)?;
//!     let record = &export.records[0];
//!
//!     assert_eq!(record.slug, "hello-world");
//!     assert_eq!(record.content, "Hi\n");
//!     assert_eq!(record.created_millis(), 500);
//!     Ok(())
//! }
//! ```
//!
//! ## Creation time
//!
//! By default a page's creation time is the **latest** date in its journal
//! ([`CreatedPolicy::LatestJournalDate`](config::CreatedPolicy)). The
//! alternative, [`CreatedPolicy::FirstCreateOrFork`](config::CreatedPolicy),
//! uses the first `create` or `fork` event instead. The two differ for any
//! page edited after it was created. Pages with no usable journal date are
//! reported in [`Export::skipped`] rather than given a made-up timestamp.
//!
//! ## Module Structure
//!
//! - [`transform`] - [`Transformer`], [`Export`], [`SkippedPage`]
//! - [`parsing`] - raw page model and per-page extraction
//! - [`record`] - the [`Record`] type
//! - [`fetch`] - [`export_url`](fetch::export_url) and the HTTP `Fetcher`
//! - [`source`] - [`ExportSource`](source::ExportSource): URL or local file
//! - [`output`] - [`MarkdownWriter`](output::MarkdownWriter) and manifests
//! - [`config`] - configuration types
//! - [`error`] - [`ExportError`], [`Result`]
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parsing;
pub mod record;
pub mod source;
pub mod transform;

// Re-export the main types at the crate root for convenience
pub use error::{ExportError, Result};
pub use record::Record;
pub use transform::{Export, SkippedPage, Transformer, transform};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use fedwiki_export::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Record;

    pub use crate::error::{ExportError, Result};

    pub use crate::transform::{Export, SkippedPage, Transformer, transform};

    pub use crate::config::{BatchPolicy, CreatedPolicy, FetchConfig, TransformConfig};

    pub use crate::output::{ManifestFormat, MarkdownWriter, WriteSummary, write_manifest};

    pub use crate::source::ExportSource;

    #[cfg(feature = "fetch")]
    pub use crate::fetch::Fetcher;
}
