//! High-level prediction pipeline
//!
//! The pipeline is strictly `prepare -> fit -> (validate -> predict)*`. A
//! [`Session`] owns the fitted scaler and model for the lifetime of the
//! process and lends them to every request.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use diabsvm::api::PipelineBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = PipelineBuilder::new()
//!     .with_seed(2)
//!     .with_c(1.0)
//!     .start("diabetes.csv")?;
//!
//! let label = session.predict_raw(&["1", "85", "66", "29", "0", "26.6", "0.351", "31"])?;
//! println!("Result: {}", label.describe());
//! # Ok(())
//! # }
//! ```

use crate::core::{Classifier, Dataset, FeatureVector, Label, OptimizerConfig, Result, Sample};
use crate::data::{stratified_split, CSVDataset};
use crate::optimizer::{LinearModel, ModelInfo, SVMOptimizer};
use crate::utils::{parse_inputs, StandardScaler};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default dataset location
pub const DEFAULT_DATASET: &str = "diabetes.csv";

/// Settings for preparing data and fitting the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Seed for the stratified split
    pub seed: u64,
    /// Fraction of each class held out
    pub test_ratio: f64,
    pub optimizer: OptimizerConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed: 2,
            test_ratio: 0.2,
            optimizer: OptimizerConfig::default(),
        }
    }
}

/// Output of [`prepare`]
#[derive(Debug, Clone)]
pub struct PreparedData {
    /// Training features after scaling
    pub train_features: Vec<FeatureVector>,
    pub train_labels: Vec<Label>,
    /// Scaler fitted on the training partition only
    pub scaler: StandardScaler,
    /// Unscaled held-out rows
    pub held_out: Vec<Sample>,
}

/// Load a CSV file and prepare it for training
pub fn prepare<P: AsRef<Path>>(path: P, config: &PipelineConfig) -> Result<PreparedData> {
    let dataset = CSVDataset::from_file(path)?;
    prepare_dataset(&dataset, config)
}

/// Split, fit the scaler on the training rows, and scale them
pub fn prepare_dataset<D: Dataset>(dataset: &D, config: &PipelineConfig) -> Result<PreparedData> {
    let split = stratified_split(dataset, config.test_ratio, config.seed)?;

    let train = dataset.get_batch(&split.train);
    let raw_features: Vec<FeatureVector> = train.iter().map(|s| s.features).collect();
    let train_labels: Vec<Label> = train.iter().map(|s| s.label).collect();

    let scaler = StandardScaler::fit(&raw_features)?;
    let train_features = scaler.transform_all(&raw_features)?;

    info!(
        "Prepared {} training rows ({} held out)",
        train_features.len(),
        split.held_out.len()
    );

    Ok(PreparedData {
        train_features,
        train_labels,
        scaler,
        held_out: dataset.get_batch(&split.held_out),
    })
}

/// Fit a linear SVM on scaled features
pub fn fit(
    features: &[FeatureVector],
    labels: &[Label],
    config: &OptimizerConfig,
) -> Result<LinearModel> {
    SVMOptimizer::new(config.clone()).fit(features, labels)
}

/// Scale one vector and classify it
pub fn predict<M: Classifier>(
    model: &M,
    scaler: &StandardScaler,
    features: &FeatureVector,
) -> Result<Label> {
    let scaled = scaler.transform(features)?;
    Ok(model.classify(&scaled))
}

/// Builder for a [`Session`]
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_test_ratio(mut self, test_ratio: f64) -> Self {
        self.config.test_ratio = test_ratio;
        self
    }

    /// Set regularization parameter C
    pub fn with_c(mut self, c: f64) -> Self {
        self.config.optimizer.c = c;
        self
    }

    /// Set convergence tolerance
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.config.optimizer.epsilon = epsilon;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.optimizer.max_iterations = max_iterations;
        self
    }

    /// Set kernel cache size in bytes
    pub fn with_cache_size(mut self, cache_size: usize) -> Self {
        self.config.optimizer.cache_size = cache_size;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load, prepare and fit from a CSV file
    pub fn start<P: AsRef<Path>>(self, path: P) -> Result<Session> {
        let dataset = CSVDataset::from_file(path)?;
        self.start_with_dataset(&dataset)
    }

    /// Prepare and fit from an already loaded dataset
    pub fn start_with_dataset<D: Dataset>(self, dataset: &D) -> Result<Session> {
        let prepared = prepare_dataset(dataset, &self.config)?;
        let model = fit(
            &prepared.train_features,
            &prepared.train_labels,
            &self.config.optimizer,
        )?;
        Ok(Session {
            scaler: prepared.scaler,
            model,
            config: self.config,
        })
    }
}

/// Fitted scaler and model, ready for inference
#[derive(Debug, Clone)]
pub struct Session {
    scaler: StandardScaler,
    model: LinearModel,
    config: PipelineConfig,
}

impl Session {
    /// Classify a validated feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<Label> {
        predict(&self.model, &self.scaler, features)
    }

    /// Validate eight raw text fields, then classify them
    pub fn predict_raw<S: AsRef<str>>(&self, fields: &[S]) -> Result<Label> {
        let features = parse_inputs(fields)?;
        self.predict(&features)
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn info(&self) -> ModelInfo {
        self.model.info()
    }
}
