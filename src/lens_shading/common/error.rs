use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShadingError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Raw file missing BRCM header")]
    MissingMarker,

    #[error("Raw file is not Bayer raw10: image format {format}, bayer format {bayer_format}")]
    UnsupportedFormat { format: u16, bayer_format: u8 },

    #[error("Unknown bayer order: {0}")]
    UnknownBayerOrder(u8),

    #[error("Truncated raw payload: needed {needed} bytes, only {available} available")]
    TruncatedPayload { needed: usize, available: usize },

    #[error("Black level {black_level} must be below the maximum sample value {max_value}")]
    InvalidBlackLevel { black_level: u16, max_value: u16 },

    #[error("Degenerate patch in channel {channel} at ({x}, {y}): all samples are zero")]
    DegeneratePatch { channel: usize, x: usize, y: usize },

    #[error("Channel plane {width}x{height} is too small to sample")]
    PlaneTooSmall { width: usize, height: usize },

    #[error("Failed to encode TIFF preview: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShadingError>;
