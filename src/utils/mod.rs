//! Preprocessing and validation utilities

pub mod scaling;
pub mod validation;

pub use self::scaling::StandardScaler;
pub use self::validation::{parse_inputs, split_fields};
