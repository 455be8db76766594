//! Record materializer: one Markdown file per page.

use std::fs::{self, File, FileTimes};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use crate::Record;
use crate::config::BatchPolicy;
use crate::error::{ExportError, Result};

/// Writes records as `<slug>.md` files and stamps them with their creation
/// time.
#[derive(Debug, Clone)]
pub struct MarkdownWriter {
    dir: PathBuf,
}

/// Outcome of a batch write.
#[derive(Debug, Default)]
pub struct WriteSummary {
    /// Files written, in record order
    pub written: Vec<PathBuf>,
    /// Failures, one per page (only filled under [`BatchPolicy::Continue`])
    pub failed: Vec<ExportError>,
}

impl WriteSummary {
    /// Number of pages attempted.
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }

    /// Returns `true` if every page was written.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Turns a partial result into [`ExportError::Incomplete`].
    pub fn into_result(self) -> Result<Vec<PathBuf>> {
        if self.failed.is_empty() {
            Ok(self.written)
        } else {
            Err(ExportError::Incomplete {
                failed: self.failed.len(),
                total: self.total(),
            })
        }
    }
}

/// Returns `true` if `slug` names a file directly inside the output directory.
///
/// Slugs are used verbatim, so anything that could resolve elsewhere is
/// refused rather than rewritten.
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0'])
}

impl MarkdownWriter {
    /// Creates a writer targeting `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the output directory and its parents if needed.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| ExportError::output_dir(&self.dir, e))
    }

    /// Returns the target path for a record.
    pub fn path_for(&self, record: &Record) -> Result<PathBuf> {
        if !is_safe_slug(&record.slug) {
            return Err(ExportError::invalid_slug(&record.slug));
        }
        Ok(self.dir.join(record.file_name()))
    }

    /// Writes one record and sets its access and modification times to
    /// `record.created`.
    ///
    /// An existing file with the same name is overwritten.
    pub fn write(&self, record: &Record) -> Result<PathBuf> {
        let path = self.path_for(record)?;

        let mut file =
            File::create(&path).map_err(|e| ExportError::write(&record.slug, &path, e))?;
        file.write_all(record.content.as_bytes())
            .map_err(|e| ExportError::write(&record.slug, &path, e))?;

        let stamp = SystemTime::from(record.created);
        file.set_times(FileTimes::new().set_accessed(stamp).set_modified(stamp))
            .map_err(|e| ExportError::write(&record.slug, &path, e))?;

        debug!(path = %path.display(), "wrote page");
        Ok(path)
    }

    /// Writes every record.
    ///
    /// With [`BatchPolicy::Abort`] the first failure is returned as the
    /// error. With [`BatchPolicy::Continue`] failures are collected in the
    /// summary and the call itself succeeds.
    pub fn write_all(&self, records: &[Record], policy: BatchPolicy) -> Result<WriteSummary> {
        let mut summary = WriteSummary {
            written: Vec::with_capacity(records.len()),
            failed: Vec::new(),
        };

        for record in records {
            match self.write(record) {
                Ok(path) => summary.written.push(path),
                Err(e) => match policy {
                    BatchPolicy::Abort => return Err(e),
                    BatchPolicy::Continue => {
                        warn!(slug = %record.slug, error = %e, "page not written");
                        summary.failed.push(e);
                    }
                },
            }
        }

        Ok(summary)
    }
}
