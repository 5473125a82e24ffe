//! SVM dual solver
//!
//! Sequential Minimal Optimization as described by Platt, updating two
//! Lagrange multipliers per step.

pub mod smo;

pub use self::smo::*;
