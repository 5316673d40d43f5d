use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fashion_core::ingest::open_path;
use fashion_core::io::image_io::save_png;
use fashion_core::preprocess::preprocess;
use tracing::debug;

use super::resolve_config;

#[derive(Args)]
pub struct PreprocessArgs {
    /// Input image
    pub file: PathBuf,

    /// Classifier config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "processed.png")]
    pub output: PathBuf,
}

pub fn run(args: &PreprocessArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref())?;

    let source = open_path(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let result = preprocess(&source.image, &config.preprocess)?;
    save_png(&result.buffer, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    debug!(output = %args.output.display(), "Saved preprocessed buffer");

    println!("Source:      {} ({}x{})", source.name, source.width(), source.height());
    println!("Grayscale:   {}", config.preprocess.grayscale);
    println!("Mean:        {:.4}", result.mean);
    println!("Inverted:    {}", if result.inverted { "yes" } else { "no" });
    println!("Buffer mean: {:.4}", result.buffer.mean());
    println!("Saved to {}", args.output.display());

    Ok(())
}
