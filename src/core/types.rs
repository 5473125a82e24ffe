//! Core type definitions for the prediction pipeline

use crate::core::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of measurements in every feature vector
pub const N_FEATURES: usize = 8;

/// Feature column names, in the order the model consumes them
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "Pregnancies",
    "Glucose",
    "BloodPressure",
    "SkinThickness",
    "Insulin",
    "BMI",
    "DiabetesPedigreeFunction",
    "Age",
];

/// Name of the binary outcome column
pub const OUTCOME_COLUMN: &str = "Outcome";

/// Dense vector of the eight measurements, every entry finite
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureVector([f64; N_FEATURES]);

impl FeatureVector {
    /// Create a feature vector, rejecting NaN and infinite entries
    pub fn new(values: [f64; N_FEATURES]) -> Result<Self> {
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(PipelineError::InvalidInput(format!(
                "field {} ({}) must be a finite number, got {}",
                pos + 1,
                FEATURE_NAMES[pos],
                values[pos]
            )));
        }
        Ok(Self(values))
    }

    /// Create a feature vector from a slice that must hold exactly eight values
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let array: [f64; N_FEATURES] = values.try_into().map_err(|_| {
            PipelineError::InvalidInput(format!(
                "expected {N_FEATURES} values, got {}",
                values.len()
            ))
        })?;
        Self::new(array)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value at a feature position
    ///
    /// # Panics
    /// Panics if index >= N_FEATURES
    pub fn get(&self, index: usize) -> f64 {
        self.0[index]
    }

    /// Squared L2 norm
    pub fn norm_squared(&self) -> f64 {
        self.0.iter().map(|&v| v * v).sum()
    }
}

/// Binary outcome: 0 = negative, 1 = positive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    /// Parse the integer encoding used in the outcome column
    pub fn from_outcome(value: i64) -> Option<Self> {
        match value {
            0 => Some(Label::Negative),
            1 => Some(Label::Positive),
            _ => None,
        }
    }

    /// Integer encoding (0 or 1)
    pub fn as_outcome(self) -> u8 {
        match self {
            Label::Negative => 0,
            Label::Positive => 1,
        }
    }

    /// Sign used by the SVM dual (-1 or +1)
    pub fn sign(self) -> f64 {
        match self {
            Label::Negative => -1.0,
            Label::Positive => 1.0,
        }
    }

    /// Label on the non-negative side of the decision boundary is positive
    pub fn from_decision_value(value: f64) -> Self {
        if value >= 0.0 {
            Label::Positive
        } else {
            Label::Negative
        }
    }

    /// Human-readable result shown to the user
    pub fn describe(self) -> &'static str {
        match self {
            Label::Negative => "Not Diabetic",
            Label::Positive => "Diabetic",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_outcome())
    }
}

/// Labeled record: features plus outcome
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub features: FeatureVector,
    pub label: Label,
}

impl Sample {
    pub fn new(features: FeatureVector, label: Label) -> Self {
        Self { features, label }
    }
}

/// Result of the dual optimization
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Lagrange multipliers (alpha values)
    pub alpha: Vec<f64>,
    /// Bias term (b)
    pub b: f64,
    /// Indices of support vectors (where alpha > 0)
    pub support_vectors: Vec<usize>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final dual objective value
    pub objective_value: f64,
}

/// Configuration for the SMO optimizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Regularization parameter (upper bound for alpha)
    pub c: f64,
    /// Tolerance for KKT conditions
    pub epsilon: f64,
    /// Maximum number of pair updates
    pub max_iterations: usize,
    /// Kernel cache size in bytes
    pub cache_size: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            epsilon: 0.001,
            max_iterations: 100_000,
            cache_size: 16 * 1024 * 1024,
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(PipelineError::InvalidParameter(format!(
                "C must be a positive finite number, got {}",
                self.c
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(PipelineError::InvalidParameter(format!(
                "epsilon must be a positive finite number, got {}",
                self.epsilon
            )));
        }
        if self.max_iterations == 0 {
            return Err(PipelineError::InvalidParameter(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
