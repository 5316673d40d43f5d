use ndarray::{Array1, Array2, Array3, ArrayD, Axis, Ix1, Ix2};
use tracing::{debug, warn};

use crate::consts::INPUT_SIZE;
use crate::error::{InferenceError, ModelLoadError};

use super::descriptor::{checked_product, LayerSpec, ModelDescriptor};
use super::weights::WeightStore;
use super::InferenceModel;

/// Element-wise (or row-wise, for softmax) output activation of a dense layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    Linear,
    Relu,
    Sigmoid,
    Tanh,
    Softmax,
}

impl Activation {
    pub fn parse(name: Option<&str>) -> Result<Self, ModelLoadError> {
        match name.unwrap_or("linear") {
            "linear" => Ok(Self::Linear),
            "relu" => Ok(Self::Relu),
            "sigmoid" => Ok(Self::Sigmoid),
            "tanh" => Ok(Self::Tanh),
            "softmax" => Ok(Self::Softmax),
            other => Err(ModelLoadError::UnsupportedActivation(other.to_string())),
        }
    }

    fn apply(self, z: &mut Array2<f32>) {
        match self {
            Self::Linear => {}
            Self::Relu => z.mapv_inplace(|v| v.max(0.0)),
            Self::Sigmoid => z.mapv_inplace(|v| 1.0 / (1.0 + (-v).exp())),
            Self::Tanh => z.mapv_inplace(f32::tanh),
            Self::Softmax => {
                for mut row in z.axis_iter_mut(Axis(0)) {
                    let max = row.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
                    row.mapv_inplace(|v| (v - max).exp());
                    let sum = row.sum();
                    if sum > 0.0 {
                        row.mapv_inplace(|v| v / sum);
                    }
                }
            }
        }
    }
}

impl std::fmt::Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Relu => write!(f, "relu"),
            Self::Sigmoid => write!(f, "sigmoid"),
            Self::Tanh => write!(f, "tanh"),
            Self::Softmax => write!(f, "softmax"),
        }
    }
}

/// One evaluated layer of a sequential model.
#[derive(Clone, Debug)]
pub enum Layer {
    Flatten {
        name: String,
    },
    Dense {
        name: String,
        kernel: Array2<f32>,
        bias: Option<Array1<f32>>,
        activation: Activation,
    },
    /// Inference-time identity.
    Dropout {
        name: String,
    },
}

impl Layer {
    pub fn name(&self) -> &str {
        match self {
            Self::Flatten { name } | Self::Dense { name, .. } | Self::Dropout { name } => name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Flatten { .. } => "Flatten",
            Self::Dense { .. } => "Dense",
            Self::Dropout { .. } => "Dropout",
        }
    }

    pub fn param_count(&self) -> usize {
        match self {
            Self::Dense { kernel, bias, .. } => {
                kernel.len() + bias.as_ref().map_or(0, |b| b.len())
            }
            _ => 0,
        }
    }

    fn forward(&self, x: ArrayD<f32>) -> Result<ArrayD<f32>, InferenceError> {
        match self {
            Self::Flatten { name } => {
                let batch = x.shape()[0];
                let features: usize = x.shape()[1..].iter().product();
                let flat: Vec<f32> = x.iter().copied().collect();
                let actual = flat.len();
                Array2::from_shape_vec((batch, features), flat)
                    .map(|a| a.into_dyn())
                    .map_err(|_| InferenceError::FeatureCount {
                        layer: name.clone(),
                        expected: batch * features,
                        actual,
                    })
            }
            Self::Dense {
                name,
                kernel,
                bias,
                activation,
            } => {
                let rank = x.ndim();
                let x = x
                    .into_dimensionality::<Ix2>()
                    .map_err(|_| InferenceError::Rank {
                        layer: name.clone(),
                        rank,
                    })?;
                if x.ncols() != kernel.nrows() {
                    return Err(InferenceError::FeatureCount {
                        layer: name.clone(),
                        expected: kernel.nrows(),
                        actual: x.ncols(),
                    });
                }
                let mut z = x.dot(kernel);
                if let Some(b) = bias {
                    z += b;
                }
                activation.apply(&mut z);
                Ok(z.into_dyn())
            }
            Self::Dropout { .. } => Ok(x),
        }
    }
}

/// A sequential feed-forward model read from a TensorFlow.js layers-model.
#[derive(Clone, Debug)]
pub struct LayersModel {
    name: String,
    input_shape: Vec<usize>,
    output_len: usize,
    layers: Vec<Layer>,
}

impl LayersModel {
    /// Build the layer stack, taking each layer's weights out of `store`.
    pub(super) fn from_descriptor(
        descriptor: &ModelDescriptor,
        mut store: WeightStore,
    ) -> Result<Self, ModelLoadError> {
        let model_config = descriptor.model_topology.model_config();
        if model_config.class_name != "Sequential" {
            return Err(ModelLoadError::Topology(format!(
                "only Sequential models are supported, got '{}'",
                model_config.class_name
            )));
        }

        let specs = model_config.config.layers();
        if specs.is_empty() {
            return Err(ModelLoadError::EmptyModel);
        }

        let input_shape = declared_input_shape(specs);
        // Running shape of one sample (no batch axis).
        let mut shape = input_shape.clone();
        let mut layers = Vec::with_capacity(specs.len());

        for (index, spec) in specs.iter().enumerate() {
            let name = spec
                .config
                .name
                .clone()
                .unwrap_or_else(|| format!("{}_{index}", spec.class_name.to_lowercase()));

            match spec.class_name.as_str() {
                "InputLayer" => {}
                "Flatten" => {
                    let features = checked_product(&shape).ok_or_else(|| {
                        ModelLoadError::Topology(format!(
                            "Flatten layer '{name}' input shape {shape:?} is too large"
                        ))
                    })?;
                    shape = vec![features];
                    layers.push(Layer::Flatten { name });
                }
                "Dropout" => layers.push(Layer::Dropout { name }),
                "Dense" => {
                    let [features] = shape[..] else {
                        return Err(ModelLoadError::Topology(format!(
                            "Dense layer '{name}' needs a flat input, got shape {shape:?}"
                        )));
                    };
                    let units = spec.config.units.ok_or_else(|| {
                        ModelLoadError::Topology(format!("Dense layer '{name}' has no units"))
                    })?;
                    let activation = Activation::parse(spec.config.activation.as_deref())?;

                    let kernel = store
                        .take(&name, "kernel")
                        .ok_or_else(|| ModelLoadError::MissingWeight(format!("{name}/kernel")))?;
                    let kernel = checked_weight::<Ix2>(&name, "kernel", kernel, &[features, units])?;

                    let bias = if spec.config.use_bias.unwrap_or(true) {
                        let bias = store
                            .take(&name, "bias")
                            .ok_or_else(|| ModelLoadError::MissingWeight(format!("{name}/bias")))?;
                        Some(checked_weight::<Ix1>(&name, "bias", bias, &[units])?)
                    } else {
                        None
                    };

                    shape = vec![units];
                    layers.push(Layer::Dense {
                        name,
                        kernel,
                        bias,
                        activation,
                    });
                }
                other => return Err(ModelLoadError::UnsupportedLayer(other.to_string())),
            }
        }

        let [output_len] = shape[..] else {
            return Err(ModelLoadError::Topology(format!(
                "model output must be flat, got shape {shape:?}"
            )));
        };

        if store.len() > 0 {
            warn!(unused = store.len(), "Weights manifest has entries no layer consumed");
        }

        let name = match &model_config.config {
            super::descriptor::SequentialConfig::Named { name: Some(n), .. } => n.clone(),
            _ => "sequential".to_string(),
        };

        debug!(
            name = %name,
            layers = layers.len(),
            input = ?input_shape,
            output_len,
            "Built layers model"
        );

        Ok(Self {
            name,
            input_shape,
            output_len,
            layers,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn param_count(&self) -> usize {
        self.layers.iter().map(Layer::param_count).sum()
    }
}

impl InferenceModel for LayersModel {
    fn input_shape(&self) -> &[usize] {
        &self.input_shape
    }

    fn num_outputs(&self) -> usize {
        self.output_len
    }

    fn predict(&self, input: &Array3<f32>) -> Result<Array2<f32>, InferenceError> {
        if input.shape()[1..] != self.input_shape[..] {
            return Err(InferenceError::InputShape {
                expected: self.input_shape.clone(),
                actual: input.shape()[1..].to_vec(),
            });
        }

        let mut x = input.clone().into_dyn();
        for layer in &self.layers {
            x = layer.forward(x)?;
        }

        let rank = x.ndim();
        x.into_dimensionality::<Ix2>()
            .map_err(|_| InferenceError::Rank {
                layer: "output".into(),
                rank,
            })
    }
}

/// Input shape from the first layer that declares one, minus the batch axis.
/// A trailing unit channel (`[28, 28, 1]`) is dropped; undeclared means 28x28.
fn declared_input_shape(specs: &[LayerSpec]) -> Vec<usize> {
    let declared = specs
        .iter()
        .find_map(|s| s.config.batch_input_shape.as_ref())
        .map(|dims| dims.iter().skip(1).map(|d| d.unwrap_or(0)).collect::<Vec<_>>());

    match declared {
        Some(mut dims) if !dims.is_empty() => {
            if dims.len() == 3 && dims[2] == 1 {
                dims.pop();
            }
            dims
        }
        _ => vec![INPUT_SIZE, INPUT_SIZE],
    }
}

fn checked_weight<D: ndarray::Dimension>(
    layer: &str,
    kind: &str,
    tensor: ArrayD<f32>,
    expected: &[usize],
) -> Result<ndarray::Array<f32, D>, ModelLoadError> {
    if tensor.shape() != expected {
        return Err(ModelLoadError::WeightShape {
            name: format!("{layer}/{kind}"),
            expected: expected.to_vec(),
            actual: tensor.shape().to_vec(),
        });
    }
    tensor
        .into_dimensionality::<D>()
        .map_err(|_| ModelLoadError::WeightShape {
            name: format!("{layer}/{kind}"),
            expected: expected.to_vec(),
            actual: vec![],
        })
}
