//! Standard-score feature scaling
//!
//! `(x - mean) / std` per feature, with the population standard deviation.
//! A constant feature has `std == 0`; it is divided by 1.0 instead, so it is
//! only centered.

use crate::core::{FeatureVector, PipelineError, Result, FEATURE_NAMES, N_FEATURES};
use log::warn;
use serde::Serialize;

/// Below this a feature is treated as constant
const MIN_STD: f64 = 1e-12;

/// Per-feature mean and standard deviation fitted on training rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardScaler {
    mean: [f64; N_FEATURES],
    std: [f64; N_FEATURES],
}

impl StandardScaler {
    /// Fit on training rows only
    pub fn fit(rows: &[FeatureVector]) -> Result<Self> {
        if rows.is_empty() {
            return Err(PipelineError::InvalidDataset(
                "cannot fit scaler on an empty training partition".to_string(),
            ));
        }

        let n = rows.len() as f64;
        let mut mean = [0.0; N_FEATURES];
        for row in rows {
            for (m, &x) in mean.iter_mut().zip(row.as_slice()) {
                *m += x;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut std = [0.0; N_FEATURES];
        for row in rows {
            for ((s, &x), &m) in std.iter_mut().zip(row.as_slice()).zip(&mean) {
                *s += (x - m).powi(2);
            }
        }
        for (k, s) in std.iter_mut().enumerate() {
            *s = (*s / n).sqrt();
            if *s < MIN_STD {
                warn!("Feature {} is constant in the training partition", FEATURE_NAMES[k]);
            }
        }

        if mean.iter().chain(&std).any(|v| !v.is_finite()) {
            return Err(PipelineError::InvalidDataset(
                "feature statistics overflow; values are too large to standardize".to_string(),
            ));
        }

        Ok(Self { mean, std })
    }

    pub fn mean(&self) -> &[f64; N_FEATURES] {
        &self.mean
    }

    pub fn std(&self) -> &[f64; N_FEATURES] {
        &self.std
    }

    /// Scale one vector
    ///
    /// Extreme but finite inputs can overflow after scaling; those are
    /// rejected as `InvalidInput`.
    pub fn transform(&self, x: &FeatureVector) -> Result<FeatureVector> {
        let mut scaled = [0.0; N_FEATURES];
        for (k, out) in scaled.iter_mut().enumerate() {
            let divisor = if self.std[k] < MIN_STD { 1.0 } else { self.std[k] };
            *out = (x.get(k) - self.mean[k]) / divisor;
        }
        FeatureVector::new(scaled)
    }

    pub fn transform_all(&self, rows: &[FeatureVector]) -> Result<Vec<FeatureVector>> {
        rows.iter().map(|row| self.transform(row)).collect()
    }
}
