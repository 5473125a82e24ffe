//! Classifier training
//!
//! Runs the SMO solver over scaled training samples and collapses the result
//! into a [`LinearModel`]. With a linear kernel the decision function
//! `sum(a_i y_i <x_i, x>) + b` reduces to `<w, x> + b`, so the model keeps the
//! primal weights alongside the support vectors it was built from.

use crate::core::{
    Classifier, FeatureVector, Label, OptimizationResult, OptimizerConfig, PipelineError, Result,
    Sample, N_FEATURES,
};
use crate::kernel::linear::dot_product;
use crate::kernel::LinearKernel;
use crate::solver::SMOSolver;
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use std::sync::Arc;

/// Linear SVM trainer
pub struct SVMOptimizer {
    kernel: Arc<LinearKernel>,
    config: OptimizerConfig,
}

impl SVMOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            kernel: Arc::new(LinearKernel::new()),
            config,
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Fit a model on scaled features and their labels
    pub fn fit(&self, features: &[FeatureVector], labels: &[Label]) -> Result<LinearModel> {
        if features.len() != labels.len() {
            return Err(PipelineError::TrainingFailed(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        self.config.validate()?;

        let samples: Vec<Sample> = features
            .iter()
            .zip(labels)
            .map(|(&x, &y)| Sample::new(x, y))
            .collect();

        let solver = SMOSolver::new(Arc::clone(&self.kernel), self.config.clone());
        let result = solver.solve(&samples)?;

        if result.support_vectors.is_empty() {
            return Err(PipelineError::TrainingFailed(
                "solver produced no support vectors".to_string(),
            ));
        }

        let model = LinearModel::from_solution(&samples, result);
        if model.weights.iter().all(|&w| w == 0.0) {
            return Err(PipelineError::TrainingFailed(
                "features do not separate the classes (zero weight vector)".to_string(),
            ));
        }
        info!(
            "Fitted linear SVM on {} samples: {} support vectors, bias {:.6}, {} iterations",
            samples.len(),
            model.n_support_vectors(),
            model.bias(),
            model.iterations
        );
        Ok(model)
    }
}

/// Fitted linear SVM
#[derive(Debug, Clone)]
pub struct LinearModel {
    support_vectors: Vec<FeatureVector>,
    dual_coef: Vec<f64>,
    support_indices: Vec<usize>,
    weights: [f64; N_FEATURES],
    bias: f64,
    iterations: usize,
    objective_value: f64,
    n_train: usize,
    class_counts: (usize, usize),
    trained_at: DateTime<Utc>,
}

impl LinearModel {
    fn from_solution(samples: &[Sample], result: OptimizationResult) -> Self {
        let mut support_vectors = Vec::with_capacity(result.support_vectors.len());
        let mut dual_coef = Vec::with_capacity(result.support_vectors.len());
        let mut weights = [0.0; N_FEATURES];

        for &idx in &result.support_vectors {
            let sample = &samples[idx];
            let coef = result.alpha[idx] * sample.label.sign();
            for (w, &x) in weights.iter_mut().zip(sample.features.as_slice()) {
                *w += coef * x;
            }
            support_vectors.push(sample.features);
            dual_coef.push(coef);
        }

        let positives = samples
            .iter()
            .filter(|s| s.label == Label::Positive)
            .count();

        Self {
            support_vectors,
            dual_coef,
            support_indices: result.support_vectors,
            weights,
            bias: result.b,
            iterations: result.iterations,
            objective_value: result.objective_value,
            n_train: samples.len(),
            class_counts: (samples.len() - positives, positives),
            trained_at: Utc::now(),
        }
    }

    /// Signed distance-like score `<w, x> + b` for a scaled vector
    pub(crate) fn decision_function(&self, features: &FeatureVector) -> f64 {
        dot_product(&self.weights, features.as_slice()) + self.bias
    }

    pub fn support_vectors(&self) -> &[FeatureVector] {
        &self.support_vectors
    }

    /// Dual coefficients `alpha_i * y_i`, aligned with `support_vectors()`
    pub fn dual_coef(&self) -> &[f64] {
        &self.dual_coef
    }

    /// Positions of the support vectors in the training partition
    pub fn support_vector_indices(&self) -> &[usize] {
        &self.support_indices
    }

    pub fn weights(&self) -> &[f64; N_FEATURES] {
        &self.weights
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            n_support_vectors: self.support_vectors.len(),
            bias: self.bias,
            weights: self.weights.to_vec(),
            iterations: self.iterations,
            objective_value: self.objective_value,
            n_train: self.n_train,
            n_negative: self.class_counts.0,
            n_positive: self.class_counts.1,
            trained_at: self.trained_at,
        }
    }
}

impl Classifier for LinearModel {
    fn classify(&self, features: &FeatureVector) -> Label {
        Label::from_decision_value(self.decision_function(features))
    }

    fn n_support_vectors(&self) -> usize {
        self.support_vectors.len()
    }

    fn bias(&self) -> f64 {
        self.bias
    }
}

/// Summary of a fitted model, for logs and display
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub n_support_vectors: usize,
    pub bias: f64,
    pub weights: Vec<f64>,
    pub iterations: usize,
    pub objective_value: f64,
    pub n_train: usize,
    pub n_negative: usize,
    pub n_positive: usize,
    pub trained_at: DateTime<Utc>,
}
