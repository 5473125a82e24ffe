//! Kernel functions for SVM

pub mod linear;
pub mod traits;

pub use self::linear::*;
pub use self::traits::*;
