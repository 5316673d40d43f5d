mod app;
mod convert;
mod messages;
mod panels;
mod progress;
mod state;
mod workers;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fashion_core::config::{load_config, ClassifierConfig};

#[derive(Parser, Debug)]
#[command(name = "fashion-gui", about = "Fashion-MNIST classifier window")]
#[command(version)]
struct Args {
    /// Classifier config file (TOML)
    config: Option<PathBuf>,

    /// Path to model.json, overrides the config
    #[arg(short, long)]
    model: Option<PathBuf>,
}

/// Build the startup config from the command line.
fn initial_config(args: &Args) -> anyhow::Result<ClassifierConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => ClassifierConfig::default(),
    };
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    Ok(config)
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = initial_config(&args).unwrap_or_else(|e| {
        tracing::warn!("{e:#}; using defaults");
        ClassifierConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([600.0, 480.0])
            .with_title("Fashion MNIST Classifier"),
        ..Default::default()
    };

    eframe::run_native(
        "FashionClassifier",
        options,
        Box::new(|cc| Ok(Box::new(app::FashionApp::new(&cc.egui_ctx, config)))),
    )
}
