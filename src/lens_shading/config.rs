//! Analysis configuration module

pub mod types;

pub use types::{AnalysisConfig, AnalysisConfigBuilder, DegeneratePatchPolicy, TiffCompression};
