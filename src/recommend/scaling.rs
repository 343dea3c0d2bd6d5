use crate::types::track::{FeatureVector, FEATURE_COUNT};

/// Per-column z-score scaling fitted with the population standard deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: FeatureVector,
    scale: FeatureVector,
}

impl StandardScaler {
    /// Columns with zero variance get a scale of 1 so they transform to 0.
    pub fn fit(rows: &[FeatureVector]) -> Self {
        let mut mean = [0.0; FEATURE_COUNT];
        let mut scale = [1.0; FEATURE_COUNT];
        if rows.is_empty() {
            return Self { mean, scale };
        }

        let n = rows.len() as f64;
        for row in rows {
            for (acc, value) in mean.iter_mut().zip(row) {
                *acc += value;
            }
        }
        for acc in &mut mean {
            *acc /= n;
        }

        let mut variance = [0.0; FEATURE_COUNT];
        for row in rows {
            for ((acc, value), m) in variance.iter_mut().zip(row).zip(&mean) {
                *acc += (value - m).powi(2);
            }
        }
        for (s, v) in scale.iter_mut().zip(&variance) {
            let std = (v / n).sqrt();
            if std > f64::EPSILON {
                *s = std;
            }
        }

        Self { mean, scale }
    }

    pub fn transform(&self, row: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = (row[i] - self.mean[i]) / self.scale[i];
        }
        out
    }
}

/// Cosine similarity; 0.0 when either vector has zero length.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "feature dimensions must match");
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
