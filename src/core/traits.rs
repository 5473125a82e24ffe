//! Core traits for the prediction pipeline

use crate::core::{FeatureVector, Label, Sample};

/// Read-only access to labeled records
pub trait Dataset: Send + Sync {
    /// Number of samples in the dataset
    fn len(&self) -> usize;

    /// Get a single sample by index
    ///
    /// # Panics
    /// Panics if index >= len()
    fn get_sample(&self, i: usize) -> &Sample;

    /// Get multiple samples by index
    fn get_batch(&self, indices: &[usize]) -> Vec<Sample> {
        indices.iter().map(|&i| self.get_sample(i).clone()).collect()
    }

    /// Get all labels in row order
    fn get_labels(&self) -> Vec<Label> {
        (0..self.len()).map(|i| self.get_sample(i).label).collect()
    }

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trained binary classifier operating on already-scaled features
pub trait Classifier: Send + Sync {
    /// Classify one scaled feature vector
    fn classify(&self, features: &FeatureVector) -> Label;

    /// Number of support vectors retained by the fit
    fn n_support_vectors(&self) -> usize;

    /// Bias term of the decision function
    fn bias(&self) -> f64;
}
