use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fashion_core::model::{load_model, InferenceModel, Layer};

#[derive(Args)]
pub struct ModelArgs {
    /// Path to model.json
    #[arg(default_value = "model.json")]
    pub file: PathBuf,
}

pub fn run(args: &ModelArgs) -> Result<()> {
    let model = load_model(&args.file)
        .with_context(|| format!("Failed to load model {}", args.file.display()))?;

    println!("Model:       {}", model.name());
    println!("Input:       {:?}", model.input_shape());
    println!("Outputs:     {}", model.num_outputs());
    println!();
    println!("{:<16}  {:<8}  {:>10}  {:>10}  {:<8}", "Layer", "Type", "Shape", "Params", "Activation");
    println!("{}", "-".repeat(62));

    for layer in model.layers() {
        let (shape, activation) = match layer {
            Layer::Dense {
                kernel, activation, ..
            } => (
                format!("{}x{}", kernel.nrows(), kernel.ncols()),
                activation.to_string(),
            ),
            _ => ("-".to_string(), "-".to_string()),
        };
        println!(
            "{:<16}  {:<8}  {:>10}  {:>10}  {:<8}",
            layer.name(),
            layer.kind(),
            shape,
            layer.param_count(),
            activation
        );
    }

    println!("\nTotal params: {}", model.param_count());
    Ok(())
}
