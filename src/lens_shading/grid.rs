//! Lens shading grid module
//!
//! This module turns channel planes into clamped per-channel gain grids.

pub mod compute;
pub mod types;


pub use compute::GridGainComputer;
pub use types::{GainGrid, GridPoint, OutputChannel, ShadingAnalysis};
