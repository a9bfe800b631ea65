//! Packed raw capture types

use crate::lens_shading::common::error::{Result, ShadingError};

/// Number of Bayer phases, and therefore channel planes, in a mosaic
pub const NUM_CHANNELS: usize = 4;

/// Pitch, in single-channel samples, of the lens shading grid
pub const GRID_PITCH: usize = 32;

/// Rows of this table map an output channel (R, Gr, Gb, B) to the storage
/// plane holding it, indexed by `BayerOrder`. Each row is a permutation of 0..4.
const CHANNEL_ORDERING: [[usize; NUM_CHANNELS]; NUM_CHANNELS] = [
    [0, 1, 2, 3],
    [2, 3, 0, 1],
    [3, 2, 1, 0],
    [1, 0, 3, 2],
];

/// Phase ordering of the 2x2 colour filter array, as stored in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BayerOrder {
    Rggb,
    Gbrg,
    Bggr,
    Grbg,
}

impl BayerOrder {
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(BayerOrder::Rggb),
            1 => Ok(BayerOrder::Gbrg),
            2 => Ok(BayerOrder::Bggr),
            3 => Ok(BayerOrder::Grbg),
            other => Err(ShadingError::UnknownBayerOrder(other)),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            BayerOrder::Rggb => 0,
            BayerOrder::Gbrg => 1,
            BayerOrder::Bggr => 2,
            BayerOrder::Grbg => 3,
        }
    }

    /// Storage plane holding the given output channel (0 = R, 1 = Gr, 2 = Gb, 3 = B).
    pub fn plane_for(self, output_channel: usize) -> usize {
        CHANNEL_ORDERING[self.code() as usize][output_channel]
    }
}

/// Metadata record found at a fixed offset from the BRCM marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeader {
    /// Sensor mode name, NUL padding stripped
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub padding_right: u16,
    pub padding_down: u16,
    /// Orientation code, passed through to the generated table untouched
    pub transform: u16,
    pub format: u16,
    pub bayer_order: BayerOrder,
    pub bayer_format: u8,
}

/// Scalars derived once from the header and shared by every later stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawGeometry {
    pub width: usize,
    pub height: usize,
    pub single_channel_width: usize,
    pub single_channel_height: usize,
    pub grid_width: usize,
    pub grid_height: usize,
    /// Bytes per packed mosaic row, as the firmware lays them out
    pub stride: usize,
}

impl RawGeometry {
    pub fn from_header(header: &RawHeader) -> Self {
        let width = header.width as usize;
        let height = header.height as usize;
        let single_channel_width = width / 2;
        let single_channel_height = height / 2;
        let padded_width = width + header.padding_right as usize;

        Self {
            width,
            height,
            single_channel_width,
            single_channel_height,
            grid_width: single_channel_width.div_ceil(GRID_PITCH),
            grid_height: single_channel_height.div_ceil(GRID_PITCH),
            stride: (padded_width * 5).div_ceil(4).next_multiple_of(32),
        }
    }
}

/// One Bayer phase of the mosaic, subsampled by 2 in each axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPlane {
    pub width: usize,
    pub height: usize,
    /// Black-level-corrected samples, row-major
    pub data: Vec<u16>,
}

impl ChannelPlane {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u16; width * height],
        }
    }

    pub fn row(&self, y: usize) -> &[u16] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u16] {
        &mut self.data[y * self.width..(y + 1) * self.width]
    }
}

/// Fully decoded capture: header, derived geometry and the four storage planes
#[derive(Debug, Clone)]
pub struct DecodedRaw {
    pub header: RawHeader,
    pub geometry: RawGeometry,
    pub planes: [ChannelPlane; NUM_CHANNELS],
}
