use serde::Deserialize;

/// Top level of a TensorFlow.js layers-model `model.json`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub generated_by: Option<String>,
    #[serde(default)]
    pub converted_by: Option<String>,
    pub model_topology: Topology,
    #[serde(default)]
    pub weights_manifest: Vec<WeightGroup>,
}

/// Either `{model_config: {...}, training_config: ...}` or the model config itself.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Topology {
    Wrapped { model_config: ModelConfig },
    Bare(ModelConfig),
}

impl Topology {
    pub fn model_config(&self) -> &ModelConfig {
        match self {
            Self::Wrapped { model_config } => model_config,
            Self::Bare(config) => config,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ModelConfig {
    pub class_name: String,
    pub config: SequentialConfig,
}

/// Keras 2 writes `{name, layers}`; very old exports write the bare list.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum SequentialConfig {
    Named {
        #[serde(default)]
        name: Option<String>,
        layers: Vec<LayerSpec>,
    },
    List(Vec<LayerSpec>),
}

impl SequentialConfig {
    pub fn layers(&self) -> &[LayerSpec] {
        match self {
            Self::Named { layers, .. } => layers,
            Self::List(layers) => layers,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LayerSpec {
    pub class_name: String,
    #[serde(default)]
    pub config: LayerConfig,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LayerConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub units: Option<usize>,
    #[serde(default)]
    pub activation: Option<String>,
    #[serde(default)]
    pub use_bias: Option<bool>,
    /// Declared input shape including the (null) batch axis.
    #[serde(default, alias = "batch_shape")]
    pub batch_input_shape: Option<Vec<Option<usize>>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WeightGroup {
    pub paths: Vec<String>,
    pub weights: Vec<WeightSpec>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WeightSpec {
    pub name: String,
    pub shape: Vec<usize>,
    #[serde(default = "default_dtype")]
    pub dtype: String,
    #[serde(default)]
    pub quantization: Option<serde_json::Value>,
}

fn default_dtype() -> String {
    "float32".to_string()
}

impl WeightSpec {
    /// Product of the declared dimensions, or `None` if it overflows.
    pub fn element_count(&self) -> Option<usize> {
        checked_product(&self.shape)
    }
}

/// Product of a list of dimensions, or `None` on overflow.
pub(super) fn checked_product(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}
