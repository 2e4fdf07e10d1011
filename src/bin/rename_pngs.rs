use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use shotname::{
    mask::{MAX_SCALE, MIN_SCALE},
    ColorRange, FileOutcome, Mode, RenameSummary, RenamerBuilder,
};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Rename screenshots after the colored text they contain.
///
/// Without --execute nothing is renamed; the planned renames are only printed.
#[derive(Parser)]
#[command(
    name = "rename_pngs",
    after_help = "Examples:\n  rename_pngs /path/to/screenshots\n  rename_pngs /path/to/screenshots --execute"
)]
struct Cli {
    /// Folder containing the PNG screenshots
    folder_path: PathBuf,
    /// Actually rename files (default is a dry run)
    #[arg(long)]
    execute: bool,
    /// Lowest RGB value counted as text color
    #[arg(long, value_parser = parse_rgb, default_value = "150,90,70")]
    lower: [u8; 3],
    /// Highest RGB value counted as text color
    #[arg(long, value_parser = parse_rgb, default_value = "255,180,140")]
    upper: [u8; 3],
    /// Tesseract page segmentation mode
    #[arg(long, default_value_t = 6)]
    psm: i32,
    /// Tesseract language
    #[arg(long, default_value = "eng")]
    lang: String,
    /// Tesseract OCR engine mode
    #[arg(long, default_value_t = 3)]
    oem: i32,
    /// Resolution hint passed to tesseract
    #[arg(long)]
    dpi: Option<i32>,
    /// Extra tesseract variable, e.g. tessedit_char_whitelist=ABC (repeatable)
    #[arg(long = "config", value_parser = parse_variable)]
    config_variables: Vec<(String, String)>,
    /// Upscale factor applied to the color mask before OCR (0.1 to 8)
    #[arg(long, value_parser = parse_scale, default_value = "1.0")]
    scale: f32,
}

const EXTENSION: &str = "png";

fn parse_scale(s: &str) -> Result<f32, String> {
    let factor: f32 = s.trim().parse().map_err(|e| format!("{s:?}: {e}"))?;
    if (MIN_SCALE..=MAX_SCALE).contains(&factor) {
        Ok(factor)
    } else {
        Err(format!("scale must be between {MIN_SCALE} and {MAX_SCALE}"))
    }
}

fn parse_variable(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got {s:?}")),
    }
}

fn parse_rgb(s: &str) -> Result<[u8; 3], String> {
    let channels = s
        .split(',')
        .map(|it| it.trim().parse::<u8>().map_err(|e| format!("{it:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    channels
        .try_into()
        .map_err(|_| format!("expected three comma separated values, got {s:?}"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let mode = if cli.execute {
        Mode::Execute
    } else {
        Mode::DryRun
    };

    match mode {
        Mode::DryRun => {
            println!("🔍 DRY RUN MODE - No files will be renamed");
            println!("    Add --execute to actually rename files\n");
        }
        Mode::Execute => println!("⚠️  EXECUTE MODE - Files will be renamed!\n"),
    }

    let mut builder = RenamerBuilder::new()
        .extension(EXTENSION)
        .color_range(ColorRange::new(cli.lower, cli.upper))
        .psm(cli.psm)
        .oem(cli.oem)
        .dpi(cli.dpi)
        .lang(cli.lang)
        .scale_factor(cli.scale);
    for (key, value) in cli.config_variables {
        builder = builder.config_variable(key, value);
    }

    let files = builder
        .files(&cli.folder_path)
        .with_context(|| format!("cannot read folder '{}'", cli.folder_path.display()))?;
    if files.is_empty() {
        println!(
            "No {} files found in '{}'",
            EXTENSION.to_uppercase(),
            cli.folder_path.display()
        );
        return Ok(());
    }

    println!("Found {} {} file(s)", files.len(), EXTENSION.to_uppercase());
    println!("{}", "-".repeat(60));

    let renamer = builder.build().context("failed to start OCR engine")?;
    let summary = renamer.process_files(&files, mode, report);
    print_summary(&summary);
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|it| it.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn report(path: &Path, outcome: &FileOutcome) {
    println!("\nProcessing: {}", file_name(path));
    match outcome {
        FileOutcome::Renamed { to } => println!("  ✓ Renamed to: {}", file_name(to)),
        FileOutcome::WouldRename { to } => println!("  ✓ Would rename to: {}", file_name(to)),
        FileOutcome::Unchanged => println!("  = Already named after its text"),
        FileOutcome::NoText => println!("  ✗ Could not extract text"),
        FileOutcome::Collision { target } => {
            println!("  ⚠️  Warning: '{}' already exists, skipping...", file_name(target))
        }
        FileOutcome::ProcessingFailed(error) => println!("  ✗ Error processing: {error}"),
        FileOutcome::RenameFailed { error, .. } => println!("  ✗ Failed to rename: {error}"),
    }
}

fn print_summary(summary: &RenameSummary) {
    println!("\n{}", "=".repeat(60));
    match summary.mode {
        Mode::DryRun => {
            println!("DRY RUN - No files were actually renamed");
            println!("Would rename: {} file(s)", summary.renamed);
        }
        Mode::Execute => println!("Successfully renamed: {} file(s)", summary.renamed),
    }
    if summary.unchanged > 0 {
        println!("Already named: {} file(s)", summary.unchanged);
    }
    println!("Failed/Skipped: {} file(s)", summary.failed);
    println!("{}", "=".repeat(60));
}
