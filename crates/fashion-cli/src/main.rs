mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fashion", about = "Fashion-MNIST image classifier")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an image and print one confidence per class
    Classify(commands::classify::ClassifyArgs),
    /// Write the 28x28 buffer the model would see
    Preprocess(commands::preprocess::PreprocessArgs),
    /// Show the layers of a model.json
    Model(commands::model::ModelArgs),
    /// Print or save the default config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Preprocess(args) => commands::preprocess::run(args),
        Commands::Model(args) => commands::model::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
