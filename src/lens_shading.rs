//! Lens shading analysis module
//!
//! This module decodes BRCM raw10 captures and derives per-channel lens
//! shading gain grids, with separate modules for raw decoding, grid
//! computation, output serialisation and orchestration.

pub mod common;
pub mod config;
pub mod raw;
pub mod grid;
pub mod output;
pub mod conversions;

pub use common::{
    Result,
    ShadingError,
};

pub use config::{
    AnalysisConfig,
    AnalysisConfigBuilder,
    DegeneratePatchPolicy,
    TiffCompression,
};

pub use raw::{
    BayerOrder,
    BrcmRawDecoder,
    ChannelPlane,
    DecodedRaw,
    RawDecoder,
    RawGeometry,
    RawHeader,
};

pub use grid::{
    GainGrid,
    GridGainComputer,
    GridPoint,
    OutputChannel,
    ShadingAnalysis,
};

pub use output::{
    FlatFileWriter,
    ShadingWriter,
};

pub use conversions::{
    LensShadingPipeline,
};
