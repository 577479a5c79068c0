//! Ideological compatibility scoring.
//!
//! Two parties score `10 - d * distance_scale`, clamped to `[0, 10]`, where
//! `d` is the weighted root-mean-square distance between their ideology
//! vectors. A coalition's score aggregates the scores of all member pairs
//! according to an [`AggregationPolicy`].

mod matrix;

pub use matrix::*;

use electoral_rules::InvalidInputError;
use serde::{Deserialize, Serialize};

/// Best possible compatibility score.
pub const MAX_SCORE: f64 = 10.0;

/// Worst possible compatibility score.
pub const MIN_SCORE: f64 = 0.0;

/// How pairwise scores combine into a coalition score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Arithmetic mean of all pair scores. One badly matched pair lowers an
    /// otherwise compatible coalition without zeroing it.
    #[default]
    Mean,
    /// The lowest pair score: a coalition is as strong as its weakest link.
    WeakestLink,
}

impl AggregationPolicy {
    /// Combine pair scores. Returns `None` for an empty slice.
    pub fn aggregate(self, pair_scores: &[f64]) -> Option<f64> {
        if pair_scores.is_empty() {
            return None;
        }
        let score = match self {
            AggregationPolicy::Mean => pair_scores.iter().sum::<f64>() / pair_scores.len() as f64,
            AggregationPolicy::WeakestLink => pair_scores.iter().copied().fold(f64::INFINITY, f64::min),
        };
        Some(score)
    }
}

/// Configuration for compatibility scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatibilityConfig {
    pub aggregation: AggregationPolicy,

    /// One non-negative weight per dimension. `None` weighs all equally.
    pub dimension_weights: Option<Vec<f64>>,

    /// Score lost per unit of distance. The default of 0.5 maps the widest
    /// possible gap on a [-10, 10] axis to a score of 0.
    pub distance_scale: f64,
}

impl Default for CompatibilityConfig {
    fn default() -> Self {
        Self {
            aggregation: AggregationPolicy::Mean,
            dimension_weights: None,
            distance_scale: 0.5,
        }
    }
}

impl CompatibilityConfig {
    pub fn with_aggregation(mut self, aggregation: AggregationPolicy) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.dimension_weights = Some(weights);
        self
    }

    pub fn with_distance_scale(mut self, scale: f64) -> Self {
        self.distance_scale = scale;
        self
    }

    /// Check scale and weights. When `dimensions` is known the weight count
    /// must match it.
    pub fn validate(&self, dimensions: Option<usize>) -> Result<(), InvalidInputError> {
        if !self.distance_scale.is_finite() || self.distance_scale <= 0.0 {
            return Err(InvalidInputError::InvalidDistanceScale(self.distance_scale));
        }
        let Some(weights) = &self.dimension_weights else {
            return Ok(());
        };
        if let Some(expected) = dimensions {
            if weights.len() != expected {
                return Err(InvalidInputError::WeightDimensionMismatch {
                    expected,
                    actual: weights.len(),
                });
            }
        }
        for (dimension, value) in weights.iter().copied().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidInputError::InvalidWeight { dimension, value });
            }
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(InvalidInputError::ZeroWeightSum);
        }
        Ok(())
    }

    /// Compatibility of two ideology vectors of equal length.
    pub fn pair_score(&self, a: &[f64], b: &[f64]) -> f64 {
        let distance = weighted_distance(a, b, self.dimension_weights.as_deref());
        (MAX_SCORE - distance * self.distance_scale).clamp(MIN_SCORE, MAX_SCORE)
    }
}

/// Weighted root-mean-square distance, in the same unit as the axes.
///
/// Missing weights count as 1.0. Returns 0.0 when the weights sum to zero.
pub fn weighted_distance(a: &[f64], b: &[f64], weights: Option<&[f64]>) -> f64 {
    let (sum, weight_total) = a
        .iter()
        .zip(b)
        .enumerate()
        .fold((0.0, 0.0), |(sum, total), (idx, (x, y))| {
            let weight = weights.and_then(|w| w.get(idx)).copied().unwrap_or(1.0);
            (sum + weight * (x - y).powi(2), total + weight)
        });
    if weight_total <= 0.0 {
        0.0
    } else {
        (sum / weight_total).sqrt()
    }
}
