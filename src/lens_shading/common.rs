//! Common utilities module
//!
//! This module contains shared utilities used across the lens shading analysis.

pub mod error;

pub use error::{Result, ShadingError};
