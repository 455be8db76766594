//! Manifest output: an index of the pages in an export.
//!
//! Each entry names the page file and carries its creation time, which makes
//! it easy to diff two mirrors of the same wiki or to feed the pages into
//! another tool without walking the directory.
//!
//! ```jsonl
//! {"slug":"hello-world","file":"hello-world.md","created":"1970-01-01T00:00:00.500Z","created_ms":500,"bytes":3}
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::Record;
use crate::error::{ExportError, Result};

/// Manifest file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    /// JSON array of entries
    Json,

    /// JSON Lines, one entry per line
    #[default]
    Jsonl,
}

impl ManifestFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ManifestFormat::Json => "json",
            ManifestFormat::Jsonl => "jsonl",
        }
    }

    /// Detects the format from a file extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fedwiki_export::output::ManifestFormat;
    /// use std::path::Path;
    ///
    /// let format = ManifestFormat::from_path(Path::new("pages.ndjson")).unwrap();
    /// assert_eq!(format, ManifestFormat::Jsonl);
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();

        match ext.as_str() {
            "json" => Ok(ManifestFormat::Json),
            "jsonl" | "ndjson" => Ok(ManifestFormat::Jsonl),
            _ => Err(ExportError::UnknownManifestFormat { extension: ext }),
        }
    }
}

impl std::fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestFormat::Json => write!(f, "JSON"),
            ManifestFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

/// One manifest line.
#[derive(Debug, Serialize)]
struct ManifestEntry<'a> {
    slug: &'a str,
    file: String,
    created: String,
    created_ms: i64,
    bytes: usize,
}

impl<'a> ManifestEntry<'a> {
    fn from_record(record: &'a Record) -> Self {
        Self {
            slug: &record.slug,
            file: record.file_name(),
            created: record.created.to_rfc3339_opts(SecondsFormat::Millis, true),
            created_ms: record.created_millis(),
            bytes: record.content.len(),
        }
    }
}

/// Converts records to a pretty-printed JSON array.
pub fn to_manifest_json(records: &[Record]) -> Result<String> {
    let entries: Vec<ManifestEntry<'_>> = records.iter().map(ManifestEntry::from_record).collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Converts records to JSON Lines.
pub fn to_manifest_jsonl(records: &[Record]) -> Result<String> {
    let mut output = String::new();
    for record in records {
        output.push_str(&serde_json::to_string(&ManifestEntry::from_record(record))?);
        output.push('\n');
    }
    Ok(output)
}

/// Writes a manifest for `records` to `path`.
pub fn write_manifest(records: &[Record], path: &Path, format: ManifestFormat) -> Result<()> {
    let body = match format {
        ManifestFormat::Json => to_manifest_json(records)?,
        ManifestFormat::Jsonl => to_manifest_jsonl(records)?,
    };

    let file = File::create(path).map_err(|e| ExportError::manifest_write(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(body.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| ExportError::manifest_write(path, e))
}
