mod common;

use approx::assert_abs_diff_eq;
use ndarray::Array3;

use fashion_core::error::{InferenceError, ModelLoadError};
use fashion_core::model::{load_model, parse_model, Activation, InferenceModel, Layer};

use common::{one_hot_bias, write_bias_model, write_dense_model};

fn le_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

// ---------------------------------------------------------------------------
// Loading from disk
// ---------------------------------------------------------------------------

#[test]
fn test_load_model_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_bias_model(dir.path(), &one_hot_bias(7), "softmax");

    let model = load_model(&path).unwrap();
    assert_eq!(model.name(), "sequential");
    assert_eq!(model.input_shape(), &[28, 28]);
    assert_eq!(model.num_outputs(), 10);
    assert_eq!(model.layers().len(), 2);
    assert_eq!(model.param_count(), 784 * 10 + 10);

    match &model.layers()[1] {
        Layer::Dense { activation, .. } => assert_eq!(*activation, Activation::Softmax),
        other => panic!("expected Dense, got {}", other.kind()),
    }

    let out = model.predict(&Array3::zeros((1, 28, 28))).unwrap();
    assert_eq!(out.shape(), &[1, 10]);
    assert_abs_diff_eq!(out.row(0).sum(), 1.0, epsilon = 1e-5);
    let argmax = out
        .row(0)
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(argmax, 7);
}

#[test]
fn test_kernel_weights_are_applied() {
    // Class 3 is scored by the sum of all pixels.
    let mut kernel = vec![0.0f32; 784 * 10];
    for row in 0..784 {
        kernel[row * 10 + 3] = 1.0;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = write_dense_model(dir.path(), &kernel, &[0.0; 10], "linear");
    let model = load_model(&path).unwrap();

    let out = model.predict(&Array3::from_elem((1, 28, 28), 0.5)).unwrap();
    assert_abs_diff_eq!(out[[0, 3]], 392.0, epsilon = 1e-3);
    assert_eq!(out[[0, 0]], 0.0);
}

#[test]
fn test_missing_model_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_model(&dir.path().join("model.json")).unwrap_err();
    assert!(matches!(err, ModelLoadError::Io { .. }));
}

#[test]
fn test_missing_shard_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_bias_model(dir.path(), &one_hot_bias(0), "softmax");
    std::fs::remove_file(dir.path().join("group1-shard1of1.bin")).unwrap();
    let err = load_model(&path).unwrap_err();
    assert!(matches!(err, ModelLoadError::Io { ref path, .. } if path.ends_with("group1-shard1of1.bin")));
}

#[test]
fn test_not_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(&path, "<html>404</html>").unwrap();
    assert!(matches!(load_model(&path), Err(ModelLoadError::Json(_))));
}

// ---------------------------------------------------------------------------
// Descriptor variants
// ---------------------------------------------------------------------------

const HIDDEN_MODEL: &str = r#"{
    "modelTopology": {
        "model_config": {
            "class_name": "Sequential",
            "config": [
                {"class_name": "InputLayer", "config": {"name": "input", "batch_shape": [null, 28, 28, 1]}},
                {"class_name": "Flatten", "config": {"name": "flatten"}},
                {"class_name": "Dense", "config": {"name": "hidden", "units": 2, "activation": "relu"}},
                {"class_name": "Dropout", "config": {"name": "dropout", "rate": 0.2}},
                {"class_name": "Dense", "config": {"name": "out", "units": 10, "use_bias": false}}
            ]
        },
        "training_config": {"loss": "sparse_categorical_crossentropy"}
    },
    "weightsManifest": [
        {"paths": ["w.bin"], "weights": [
            {"name": "sequential/hidden/kernel", "shape": [784, 2], "dtype": "float32"},
            {"name": "sequential/hidden/bias", "shape": [2], "dtype": "float32"},
            {"name": "sequential/out/kernel", "shape": [2, 10], "dtype": "float32"}
        ]}
    ]
}"#;

fn hidden_model_weights() -> Vec<u8> {
    // hidden unit 0 = sum(x) - 1, hidden unit 1 = -sum(x)
    let mut values = Vec::new();
    for _ in 0..784 {
        values.extend_from_slice(&[1.0, -1.0]);
    }
    values.extend_from_slice(&[-1.0, 0.0]);
    // out[k] = k * h0 + h1
    for k in 0..10 {
        values.push(k as f32);
    }
    values.extend(std::iter::repeat(1.0).take(10));
    le_bytes(&values)
}

#[test]
fn test_wrapped_bare_list_topology_with_hidden_layer() {
    let model = parse_model(HIDDEN_MODEL, |path| {
        assert_eq!(path, "w.bin");
        Ok(hidden_model_weights())
    })
    .unwrap();

    assert_eq!(model.input_shape(), &[28, 28]);
    let kinds: Vec<_> = model.layers().iter().map(Layer::kind).collect();
    assert_eq!(kinds, ["Flatten", "Dense", "Dropout", "Dense"]);

    // sum(x) = 2 -> h0 = relu(1) = 1, h1 = relu(-2) = 0 -> out[k] = k
    let mut input = Array3::zeros((1, 28, 28));
    input[[0, 0, 0]] = 1.0;
    input[[0, 27, 27]] = 1.0;
    let out = model.predict(&input).unwrap();
    for k in 0..10 {
        assert_abs_diff_eq!(out[[0, k]], k as f32, epsilon = 1e-5);
    }
}

#[test]
fn test_unsupported_layer() {
    let json = HIDDEN_MODEL.replace("\"Dropout\"", "\"Conv2D\"");
    let err = parse_model(&json, |_| Ok(hidden_model_weights())).unwrap_err();
    assert!(matches!(err, ModelLoadError::UnsupportedLayer(ref c) if c == "Conv2D"));
}

#[test]
fn test_missing_weight() {
    let json = HIDDEN_MODEL.replace("sequential/out/kernel", "sequential/other/kernel");
    let err = parse_model(&json, |_| Ok(hidden_model_weights())).unwrap_err();
    assert!(matches!(err, ModelLoadError::MissingWeight(ref w) if w == "out/kernel"));
}

#[test]
fn test_kernel_shape_must_match_topology() {
    let json = HIDDEN_MODEL.replace("\"units\": 2", "\"units\": 3");
    let err = parse_model(&json, |_| Ok(hidden_model_weights())).unwrap_err();
    assert!(matches!(err, ModelLoadError::WeightShape { .. }));
}

#[test]
fn test_functional_model_rejected() {
    let json = HIDDEN_MODEL.replace("\"Sequential\"", "\"Functional\"");
    let err = parse_model(&json, |_| Ok(hidden_model_weights())).unwrap_err();
    assert!(matches!(err, ModelLoadError::Topology(_)));
}

#[test]
fn test_graph_model_format_rejected() {
    let json = HIDDEN_MODEL.replacen('{', r#"{"format": "graph-model","#, 1);
    let err = parse_model(&json, |_| Ok(hidden_model_weights())).unwrap_err();
    assert!(matches!(err, ModelLoadError::Topology(_)));
}

#[test]
fn test_overflowing_weight_shape_is_load_error() {
    let json = HIDDEN_MODEL.replace("[2, 10]", "[4611686018427387904, 4]");
    let err = parse_model(&json, |_| Ok(hidden_model_weights())).unwrap_err();
    assert!(matches!(err, ModelLoadError::Topology(ref m) if m.contains("sequential/out/kernel")));
}

#[test]
fn test_overflowing_input_shape_is_load_error() {
    let json = HIDDEN_MODEL.replace("[null, 28, 28, 1]", "[null, 4611686018427387904, 4, 1]");
    let err = parse_model(&json, |_| Ok(hidden_model_weights())).unwrap_err();
    assert!(matches!(err, ModelLoadError::Topology(ref m) if m.contains("flatten")));
}

#[test]
fn test_empty_layer_list() {
    let json = r#"{"modelTopology": {"class_name": "Sequential", "config": {"name": "s", "layers": []}}}"#;
    let err = parse_model(json, |_| Ok(vec![])).unwrap_err();
    assert!(matches!(err, ModelLoadError::EmptyModel));
}

// ---------------------------------------------------------------------------
// Inference errors
// ---------------------------------------------------------------------------

#[test]
fn test_predict_rejects_wrong_input_shape() {
    let model = parse_model(HIDDEN_MODEL, |_| Ok(hidden_model_weights())).unwrap();
    let err = model.predict(&Array3::zeros((1, 32, 32))).unwrap_err();
    assert_eq!(
        err,
        InferenceError::InputShape {
            expected: vec![28, 28],
            actual: vec![32, 32],
        }
    );
}
