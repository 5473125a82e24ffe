//! Data loading and partitioning

pub mod csv;
pub mod split;

pub use self::csv::*;
pub use self::split::*;
