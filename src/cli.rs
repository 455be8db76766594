//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`CreatedArg`] - creation-time policy as a CLI value

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{BatchPolicy, CreatedPolicy, FetchConfig, TransformConfig};

/// Mirror a federated wiki into one Markdown file per page, each stamped
/// with the page's creation time.
#[derive(Parser, Debug, Clone)]
#[command(name = "fedwiki-export")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    fedwiki-export http://fed.wiki.org pages/
    fedwiki-export https://wiki.example.org out --created first-create
    fedwiki-export saved/export.json out --manifest out/pages.jsonl
    fedwiki-export http://fed.wiki.org out --keep-going")]
pub struct Args {
    /// Wiki base URL (http/https) or path to a saved export.json
    pub source: String,

    /// Directory to write pages into (created if missing)
    #[arg(default_value = ".")]
    pub output_dir: PathBuf,

    /// How each page's creation time is chosen from its journal
    #[arg(long, value_enum, default_value = "latest")]
    pub created: CreatedArg,

    /// Keep writing after a page fails, then report all failures
    #[arg(short = 'k', long)]
    pub keep_going: bool,

    /// Also write a page index (.json or .jsonl)
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Transform and report, but write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Transformer settings selected on the command line.
    pub fn transform_config(&self) -> TransformConfig {
        TransformConfig::new().with_created_policy(self.created.into())
    }

    /// Fetcher settings selected on the command line.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::new().with_timeout_secs(self.timeout)
    }

    /// Batch policy selected on the command line.
    pub fn batch_policy(&self) -> BatchPolicy {
        if self.keep_going {
            BatchPolicy::Continue
        } else {
            BatchPolicy::Abort
        }
    }
}

/// Creation-time policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum CreatedArg {
    /// Latest date in the journal, whatever the event type
    #[default]
    #[value(alias = "latest-journal-date")]
    Latest,

    /// Date of the first create or fork event
    #[value(alias = "first-create-or-fork")]
    FirstCreate,
}

impl From<CreatedArg> for CreatedPolicy {
    fn from(arg: CreatedArg) -> CreatedPolicy {
        match arg {
            CreatedArg::Latest => CreatedPolicy::LatestJournalDate,
            CreatedArg::FirstCreate => CreatedPolicy::FirstCreateOrFork,
        }
    }
}
