//! Output writers.
//!
//! - [`MarkdownWriter`] - the record materializer: one `<slug>.md` per page,
//!   stamped with the page's creation time
//! - [`write_manifest`] / [`to_manifest_jsonl`] / [`to_manifest_json`] - an
//!   index of the exported pages
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> fedwiki_export::Result<()> {
//! use fedwiki_export::config::BatchPolicy;
//! use fedwiki_export::output::MarkdownWriter;
//! use fedwiki_export::Transformer;
//!
//! let export = Transformer::new().transform_file("export.json".as_ref())?;
//!
//! let writer = MarkdownWriter::new("pages");
//! writer.prepare()?;
//! let summary = writer.write_all(&export.records, BatchPolicy::Abort)?;
//! println!("wrote {} pages", summary.written.len());
//! # Ok(())
//! # }
//! ```

mod manifest;
mod markdown;

pub use manifest::{ManifestFormat, to_manifest_json, to_manifest_jsonl, write_manifest};
pub use markdown::{MarkdownWriter, WriteSummary, is_safe_slug};
