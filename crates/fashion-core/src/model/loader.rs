use std::path::Path;

use tracing::info;

use crate::error::ModelLoadError;

use super::descriptor::ModelDescriptor;
use super::layers::LayersModel;
use super::weights::WeightStore;

/// Load `model.json` and its weight shards (resolved next to it).
pub fn load_model(path: &Path) -> Result<LayersModel, ModelLoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));

    let model = parse_model(&json, |shard| {
        let shard_path = base.join(shard);
        std::fs::read(&shard_path).map_err(|source| ModelLoadError::Io {
            path: shard_path.display().to_string(),
            source,
        })
    })?;

    info!(
        path = %path.display(),
        layers = model.layers().len(),
        params = model.param_count(),
        "Model loaded"
    );
    Ok(model)
}

/// Build a model from descriptor text; `read_shard` supplies shard bytes by
/// manifest path.
pub fn parse_model<F>(json: &str, read_shard: F) -> Result<LayersModel, ModelLoadError>
where
    F: FnMut(&str) -> Result<Vec<u8>, ModelLoadError>,
{
    let descriptor: ModelDescriptor = serde_json::from_str(json)?;
    if let Some(ref format) = descriptor.format {
        if format != "layers-model" {
            return Err(ModelLoadError::Topology(format!(
                "expected a layers-model, got '{format}'"
            )));
        }
    }
    let store = WeightStore::decode(&descriptor.weights_manifest, read_shard)?;
    LayersModel::from_descriptor(&descriptor, store)
}
