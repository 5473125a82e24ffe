//! Diabetes risk prediction pipeline on a pure Rust linear SVM
//!
//! Loads a labeled CSV of eight clinical measurements, standardizes them,
//! fits a linear support vector classifier with SMO, and classifies new
//! measurement vectors.

pub mod api;
pub mod cache;
pub mod core;
pub mod data;
pub mod kernel;
pub mod optimizer;
pub mod solver;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::{fit, predict, prepare, PipelineBuilder, PipelineConfig, PreparedData, Session};
pub use crate::cache::{CacheStats, KernelCache};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{PipelineError, Result};
pub use crate::data::CSVDataset;
pub use crate::kernel::{Kernel, LinearKernel};
pub use crate::optimizer::{LinearModel, ModelInfo, SVMOptimizer};
pub use crate::utils::{parse_inputs, StandardScaler};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
