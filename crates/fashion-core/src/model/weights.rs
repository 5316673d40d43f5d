use std::collections::HashMap;

use byteorder::{ByteOrder, LittleEndian};
use ndarray::ArrayD;
use tracing::debug;

use crate::error::ModelLoadError;

use super::descriptor::WeightGroup;

const FLOAT32_BYTES: usize = 4;

/// Decoded weight tensors keyed by manifest name.
#[derive(Debug, Default)]
pub(super) struct WeightStore {
    tensors: HashMap<String, ArrayD<f32>>,
}

impl WeightStore {
    /// Decode every group. `read_shard` returns the bytes of one shard path.
    pub(super) fn decode<F>(groups: &[WeightGroup], mut read_shard: F) -> Result<Self, ModelLoadError>
    where
        F: FnMut(&str) -> Result<Vec<u8>, ModelLoadError>,
    {
        let mut tensors = HashMap::new();

        for group in groups {
            let mut bytes = Vec::new();
            for path in &group.paths {
                bytes.extend_from_slice(&read_shard(path)?);
            }

            for spec in &group.weights {
                if spec.dtype != "float32" || spec.quantization.is_some() {
                    let dtype = if spec.quantization.is_some() {
                        format!("{} (quantized)", spec.dtype)
                    } else {
                        spec.dtype.clone()
                    };
                    return Err(ModelLoadError::UnsupportedDtype {
                        name: spec.name.clone(),
                        dtype,
                    });
                }
            }

            let mut counts = Vec::with_capacity(group.weights.len());
            let mut expected = 0usize;
            for spec in &group.weights {
                let count = spec
                    .element_count()
                    .ok_or_else(|| too_large(&spec.name, &spec.shape))?;
                expected = count
                    .checked_mul(FLOAT32_BYTES)
                    .and_then(|b| expected.checked_add(b))
                    .ok_or_else(|| too_large(&spec.name, &spec.shape))?;
                counts.push(count);
            }
            if bytes.len() != expected {
                return Err(ModelLoadError::ShardSize {
                    expected,
                    actual: bytes.len(),
                });
            }

            let mut offset = 0;
            for (spec, &len) in group.weights.iter().zip(&counts) {
                let mut values = vec![0.0f32; len];
                LittleEndian::read_f32_into(
                    &bytes[offset..offset + len * FLOAT32_BYTES],
                    &mut values,
                );
                offset += len * FLOAT32_BYTES;

                let tensor = ArrayD::from_shape_vec(spec.shape.clone(), values).map_err(|_| {
                    ModelLoadError::WeightShape {
                        name: spec.name.clone(),
                        expected: spec.shape.clone(),
                        actual: vec![len],
                    }
                })?;
                debug!(name = %spec.name, shape = ?spec.shape, "Decoded weight");
                tensors.insert(spec.name.clone(), tensor);
            }
        }

        Ok(Self { tensors })
    }

    /// Look up `<layer>/<kind>`, tolerating a model-name prefix and a `:0` suffix.
    pub(super) fn take(&mut self, layer: &str, kind: &str) -> Option<ArrayD<f32>> {
        let wanted = format!("{layer}/{kind}");
        let suffix = format!("/{wanted}");
        let key = self
            .tensors
            .keys()
            .find(|name| {
                let name = name.as_str();
                let name = name.strip_suffix(":0").unwrap_or(name);
                name == wanted || name.ends_with(&suffix)
            })?
            .clone();
        self.tensors.remove(&key)
    }

    pub(super) fn len(&self) -> usize {
        self.tensors.len()
    }
}

fn too_large(name: &str, shape: &[usize]) -> ModelLoadError {
    ModelLoadError::Topology(format!("weight '{name}' has an oversized shape {shape:?}"))
}
