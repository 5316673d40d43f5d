use crate::error::PredictionError;
use crate::labels::{CLASS_LABELS, NUM_CLASSES};

/// One class label with its confidence rounded to two decimals.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    pub label: &'static str,
    pub confidence: f32,
}

impl Prediction {
    pub fn new(label: &'static str, raw_score: f32) -> Self {
        Self {
            label,
            confidence: round_two_decimals(raw_score),
        }
    }

    /// Confidence with exactly two decimal digits.
    pub fn formatted(&self) -> String {
        format!("{:.2}", self.confidence)
    }

    /// Bar fill fraction: confidence clamped to [0, 1].
    pub fn fill_fraction(&self) -> f32 {
        if self.confidence.is_nan() {
            0.0
        } else {
            self.confidence.clamp(0.0, 1.0)
        }
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.2}", self.label, self.confidence)
    }
}

/// Round half away from zero to two decimals.
pub fn round_two_decimals(value: f32) -> f32 {
    ((value as f64 * 100.0).round() / 100.0) as f32
}

/// Zip raw scores with the class labels by index.
pub fn map_predictions(scores: &[f32]) -> Result<Vec<Prediction>, PredictionError> {
    if scores.len() != NUM_CLASSES {
        return Err(PredictionError::ClassCountMismatch {
            expected: NUM_CLASSES,
            actual: scores.len(),
        });
    }
    Ok(CLASS_LABELS
        .iter()
        .zip(scores)
        .map(|(&label, &score)| Prediction::new(label, score))
        .collect())
}

/// Highest confidence; the earliest class wins ties.
pub fn top_prediction(predictions: &[Prediction]) -> Option<&Prediction> {
    predictions.iter().fold(None, |best: Option<&Prediction>, p| match best {
        Some(b) if b.confidence >= p.confidence => Some(b),
        _ => Some(p),
    })
}
