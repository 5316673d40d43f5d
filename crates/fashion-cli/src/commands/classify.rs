use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use fashion_core::ingest::{display_name, has_image_extension};
use fashion_core::io::image_io::save_png;
use fashion_core::model::ModelStatus;
use fashion_core::pipeline::{PipelineStage, ProgressReporter};
use fashion_core::view::ClassifierView;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use super::resolve_config;
use crate::summary::print_predictions;

#[derive(Args)]
pub struct ClassifyArgs {
    /// Input image
    pub file: PathBuf,

    /// Path to model.json (overrides the config)
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Classifier config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also save the preprocessed 28x28 buffer as PNG
    #[arg(long)]
    pub processed: Option<PathBuf>,
}

struct SpinnerReporter {
    pb: ProgressBar,
}

impl ProgressReporter for SpinnerReporter {
    fn begin_stage(&self, stage: PipelineStage) {
        self.pb.set_message(stage.to_string());
    }
}

pub fn run(args: &ClassifyArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref())?;
    let mut view = ClassifierView::new(config);
    if let Some(ref model) = args.model {
        view.set_model_path(model);
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Loading model");

    if view.load_model() != ModelStatus::Ready {
        pb.finish_and_clear();
        anyhow::bail!(
            "Failed to load model {}: {}",
            view.config().model.display(),
            view.model_state().failure().unwrap_or("unknown error")
        );
    }

    if !has_image_extension(&args.file) {
        warn!(file = %args.file.display(), "Unrecognised image extension, trying anyway");
    }
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let ticket = view.begin_upload(display_name(&args.file));
    let reporter = SpinnerReporter { pb: pb.clone() };
    let result = ticket.run_bytes(&bytes, &reporter);
    view.complete_upload(ticket.token, result);
    pb.finish_and_clear();

    let display = view.display();
    if let Some(error) = &display.error {
        anyhow::bail!("{}: {}", error.message(), error.detail);
    }
    let Some(classification) = display.classification() else {
        anyhow::bail!("No result for {}", args.file.display());
    };

    print_predictions(classification);

    if let Some(ref out) = args.processed {
        save_png(&classification.processed.preprocessed.buffer, out)
            .with_context(|| format!("Failed to write {}", out.display()))?;
        println!("\nProcessed image saved to {}", out.display());
    }

    Ok(())
}
