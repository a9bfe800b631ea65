//! Pipeline conversions module
//!
//! This module contains the orchestration from a raw capture to lens shading tables.

mod raw_to_grid;


pub use raw_to_grid::LensShadingPipeline;
