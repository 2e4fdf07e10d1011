use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use shotname::listing::{self, ListingOptions};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Write the names of the images in a folder to a JSON file.
#[derive(Parser)]
#[command(name = "generate_images_list")]
struct Cli {
    /// Folder to scan
    #[arg(long, default_value = "images")]
    dir: PathBuf,
    /// JSON file to (over)write
    #[arg(short, long, default_value = "images.json")]
    output: PathBuf,
    /// File extension to keep, compared case-insensitively
    #[arg(short, long, default_value = "png")]
    extension: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let options = ListingOptions {
        dir: cli.dir,
        output: cli.output,
        extension: cli.extension,
    };

    let names = listing::generate(&options)
        .with_context(|| format!("failed to list images in {}", options.dir.display()))?;

    println!(
        "✓ Generated {} with {} images",
        options.output.display(),
        names.len()
    );
    println!("Images: {names:?}");
    Ok(())
}
