//! # fedwiki-export CLI
//!
//! Command-line interface for the fedwiki-export library.

use std::fmt;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use fedwiki_export::ExportError;
use fedwiki_export::cli::Args;
use fedwiki_export::output::{ManifestFormat, MarkdownWriter, write_manifest};
use fedwiki_export::source::ExportSource;
use fedwiki_export::transform::Transformer;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        match e.slug() {
            Some(slug) => eprintln!("❌ Error ({} stage, page '{}'): {}", e.stage(), slug, e),
            None => eprintln!("❌ Error ({} stage): {}", e.stage(), e),
        }
        process::exit(1);
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Progress output on stdout, silenced by `--quiet`.
struct Console {
    quiet: bool,
}

impl Console {
    fn line(&self, args: fmt::Arguments<'_>) {
        if !self.quiet {
            println!("{}", args);
        }
    }
}

fn run() -> Result<(), ExportError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    let out = Console { quiet: args.quiet };

    let source = ExportSource::detect(&args.source);
    let transform_config = args.transform_config();

    // Resolve the manifest format up front so a bad extension fails fast
    let manifest = match &args.manifest {
        Some(path) => Some((path.clone(), ManifestFormat::from_path(path)?)),
        None => None,
    };

    // Print header
    out.line(format_args!("📦 fedwiki-export v{}", env!("CARGO_PKG_VERSION")));
    out.line(format_args!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"));
    out.line(format_args!("📖 Source:  {}", source));
    out.line(format_args!("📂 Output:  {}", args.output_dir.display()));
    out.line(format_args!("🕰️  Created: {}", transform_config.created_policy));
    if args.dry_run {
        out.line(format_args!("🧪 Mode:    Dry run"));
    }
    out.line(format_args!(""));

    // Step 1: Load
    if source.is_remote() {
        out.line(format_args!("⏳ Fetching export..."));
    } else {
        out.line(format_args!("⏳ Reading export..."));
    }
    let load_start = Instant::now();
    let bytes = source.load(&args.fetch_config())?;
    out.line(format_args!(
        "   {} bytes ({:.2}s)",
        bytes.len(),
        load_start.elapsed().as_secs_f64()
    ));

    // Step 2: Transform
    out.line(format_args!("🔄 Transforming pages..."));
    let transform_start = Instant::now();
    let export =
        Transformer::with_config(transform_config).transform_labeled(&bytes, &source.to_string())?;
    out.line(format_args!(
        "   {} pages, {} records ({:.2}s)",
        export.page_count(),
        export.records.len(),
        transform_start.elapsed().as_secs_f64()
    ));
    for skipped in &export.skipped {
        out.line(format_args!("   ⚠️  Skipped {}", skipped));
    }
    let blank = export.records.iter().filter(|record| record.is_blank()).count();
    if blank > 0 {
        out.line(format_args!("   {} pages have no body text", blank));
    }

    if args.dry_run {
        out.line(format_args!(""));
        out.line(format_args!("⏭️  Dry run, nothing written"));
        return Ok(());
    }

    // Step 3: Materialize
    out.line(format_args!("💾 Writing pages..."));
    let write_start = Instant::now();
    let writer = MarkdownWriter::new(&args.output_dir);
    writer.prepare()?;
    let summary = writer.write_all(&export.records, args.batch_policy())?;
    out.line(format_args!(
        "   {} files written ({:.2}s)",
        summary.written.len(),
        write_start.elapsed().as_secs_f64()
    ));
    for failure in &summary.failed {
        eprintln!("   ❌ {}", failure);
    }

    // Step 4: Manifest
    if let Some((path, format)) = &manifest {
        out.line(format_args!("🗂️  Writing {} manifest...", format));
        write_manifest(&export.records, path, *format)?;
    }

    let total_time = total_start.elapsed();

    // Summary
    out.line(format_args!(""));
    out.line(format_args!("📊 Summary:"));
    out.line(format_args!("   Pages:    {}", export.page_count()));
    out.line(format_args!("   Written:  {}", summary.written.len()));
    if !export.skipped.is_empty() {
        out.line(format_args!("   Skipped:  {}", export.skipped.len()));
    }
    if !summary.failed.is_empty() {
        out.line(format_args!("   Failed:   {}", summary.failed.len()));
    }
    out.line(format_args!("   Time:     {:.2}s", total_time.as_secs_f64()));

    summary.into_result()?;

    out.line(format_args!(""));
    out.line(format_args!("✅ Done! Pages saved to {}", args.output_dir.display()));

    Ok(())
}
