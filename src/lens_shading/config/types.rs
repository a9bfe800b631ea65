//! Lens shading analysis configuration types

use crate::lens_shading::common::error::Result;
use crate::lens_shading::raw::unpack::BlackLevel;

/// Default sensor black level, in 10-bit units
pub const DEFAULT_BLACK_LEVEL: u16 = 16;

/// TIFF compression methods for the optional channel previews
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - balanced level
    Deflate,
}

/// What to do with a sampling patch whose samples sum to zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePatchPolicy {
    /// Emit the maximum representable gain (255)
    #[default]
    ClampToCeiling,
    /// Abort the analysis with `ShadingError::DegeneratePatch`
    Fail,
}

/// Configuration for a lens shading analysis run
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Sensor black level subtracted from every 10-bit sample
    pub black_level: u16,
    /// Handling of all-zero sampling patches
    pub degenerate_patch: DegeneratePatchPolicy,
    /// Write a Gray16 TIFF preview of every channel plane when set
    pub preview: Option<TiffCompression>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            black_level: DEFAULT_BLACK_LEVEL,
            degenerate_patch: DegeneratePatchPolicy::default(),
            preview: None,
        }
    }
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Checks the black level against the 10-bit range.
    pub fn black_level(&self) -> Result<BlackLevel> {
        BlackLevel::new(self.black_level)
    }
}

/// Builder for AnalysisConfig
#[derive(Default)]
pub struct AnalysisConfigBuilder {
    black_level: Option<u16>,
    degenerate_patch: Option<DegeneratePatchPolicy>,
    preview: Option<Option<TiffCompression>>,
}

impl AnalysisConfigBuilder {
    pub fn black_level(mut self, black_level: u16) -> Self {
        self.black_level = Some(black_level);
        self
    }

    pub fn degenerate_patch(mut self, policy: DegeneratePatchPolicy) -> Self {
        self.degenerate_patch = Some(policy);
        self
    }

    pub fn preview(mut self, compression: Option<TiffCompression>) -> Self {
        self.preview = Some(compression);
        self
    }

    pub fn build(self) -> AnalysisConfig {
        let default = AnalysisConfig::default();
        AnalysisConfig {
            black_level: self.black_level.unwrap_or(default.black_level),
            degenerate_patch: self.degenerate_patch.unwrap_or(default.degenerate_patch),
            preview: self.preview.unwrap_or(default.preview),
        }
    }
}
