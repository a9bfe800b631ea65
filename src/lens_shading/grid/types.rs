//! Lens shading grid types

use crate::lens_shading::raw::types::{ChannelPlane, NUM_CHANNELS, RawGeometry, RawHeader};

/// Gain value representing x1.0 (5 fractional bits).
pub const UNITY_GAIN: u8 = 32;

/// Largest gain the table can hold.
pub const MAX_GAIN: u8 = 255;

/// Channels of the generated table, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputChannel {
    R,
    Gr,
    Gb,
    B,
}

impl OutputChannel {
    pub const ALL: [OutputChannel; NUM_CHANNELS] =
        [OutputChannel::R, OutputChannel::Gr, OutputChannel::Gb, OutputChannel::B];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputChannel::R => "R",
            OutputChannel::Gr => "Gr",
            OutputChannel::Gb => "Gb",
            OutputChannel::B => "B",
        }
    }
}

/// One sampled point of a gain grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPoint {
    /// Column of the sample in the channel plane
    pub x: usize,
    /// Row of the sample in the channel plane
    pub y: usize,
    pub gain: u8,
    /// Output channel index (0 = R, 1 = Gr, 2 = Gb, 3 = B)
    pub channel: usize,
}

/// Gains for one output channel, in row-major scan order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GainGrid {
    pub channel: OutputChannel,
    /// Storage plane the gains were computed from
    pub plane_index: usize,
    /// Centre brightness scaled by 32
    pub reference_value: u32,
    pub points: Vec<GridPoint>,
}

impl GainGrid {
    pub fn gains(&self) -> impl Iterator<Item = u8> + '_ {
        self.points.iter().map(|point| point.gain)
    }
}

/// Everything produced by one analysis run
#[derive(Debug, Clone)]
pub struct ShadingAnalysis {
    pub header: RawHeader,
    pub geometry: RawGeometry,
    /// Storage planes, not yet permuted by Bayer order
    pub planes: [ChannelPlane; NUM_CHANNELS],
    /// Gain grids in R, Gr, Gb, B order
    pub grids: [GainGrid; NUM_CHANNELS],
}
