//! Unpacking of 10-bit packed Bayer rows into per-phase channel planes.
//!
//! Every group of 4 pixels is stored in 5 bytes: the top 8 bits of each
//! pixel, followed by one byte holding the bottom 2 bits of all four,
//! first pixel in the most significant position.

use tracing::debug;

use crate::lens_shading::common::error::{Result, ShadingError};
use crate::lens_shading::raw::types::{ChannelPlane, NUM_CHANNELS, RawGeometry};

/// Largest 10-bit sample value.
pub const MAX_SAMPLE_VALUE: u16 = (1 << 10) - 1;

/// Per-frame metadata preceding the first pixel row, relative to the marker.
pub const PIXEL_DATA_OFFSET: usize = 32768;

/// Pixels in one packed group.
pub const GROUP_PIXELS: usize = 4;

/// Bytes in one packed group.
pub const GROUP_BYTES: usize = 5;

/// A sensor black level known to be below `MAX_SAMPLE_VALUE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlackLevel(u16);

impl BlackLevel {
    pub fn new(level: u16) -> Result<Self> {
        if level >= MAX_SAMPLE_VALUE {
            return Err(ShadingError::InvalidBlackLevel {
                black_level: level,
                max_value: MAX_SAMPLE_VALUE,
            });
        }
        Ok(Self(level))
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// Linearly rescales `raw` so the black level maps to 0 and
    /// `MAX_SAMPLE_VALUE` stays at `MAX_SAMPLE_VALUE`.
    ///
    /// Samples below the black level saturate to 0.
    pub fn correct(self, raw: u16) -> u16 {
        let max = MAX_SAMPLE_VALUE as u32;
        let black = self.0 as u32;
        let lifted = (raw as u32).saturating_sub(black);
        (lifted * max / (max - black)) as u16
    }
}

/// Splits the 5 bytes of a packed group into its four 10-bit samples.
pub fn unpack_group(group: &[u8]) -> [u16; GROUP_PIXELS] {
    let mut lsbs = group[GROUP_PIXELS];
    let mut samples = [0u16; GROUP_PIXELS];
    for (slot, sample) in samples.iter_mut().enumerate() {
        *sample = ((group[slot] as u16) << 2) | (lsbs >> 6) as u16;
        lsbs <<= 2;
    }
    samples
}

/// Storage planes filled by mosaic rows of the given parity.
///
/// Even rows alternate between planes 0 and 1, odd rows between 2 and 3.
pub fn channel_pair(row: usize) -> [usize; 2] {
    if row & 1 == 1 { [2, 3] } else { [0, 1] }
}

/// Decodes the pixel area of a payload into four channel planes.
pub struct Bayer10Unpacker {
    black_level: BlackLevel,
}

impl Bayer10Unpacker {
    pub fn new(black_level: BlackLevel) -> Self {
        Self { black_level }
    }

    /// Unpacks every mosaic row of `payload` (which starts at the BRCM marker).
    ///
    /// Each row is bounds-checked before it is read, so a header that
    /// overstates the geometry yields `TruncatedPayload` rather than a panic.
    pub fn unpack(&self, payload: &[u8], geometry: &RawGeometry) -> Result<[ChannelPlane; NUM_CHANNELS]> {
        let plane_width = geometry.single_channel_width;
        let plane_height = geometry.single_channel_height;
        let groups = geometry.width.div_ceil(GROUP_PIXELS);
        let row_bytes = groups * GROUP_BYTES;

        debug!(
            width = geometry.width,
            height = geometry.height,
            stride = geometry.stride,
            black_level = self.black_level.value(),
            "Unpacking raw10 rows"
        );

        let mut planes: [ChannelPlane; NUM_CHANNELS] =
            std::array::from_fn(|_| ChannelPlane::new(plane_width, plane_height));

        for y in 0..plane_height * 2 {
            let start = PIXEL_DATA_OFFSET + y * geometry.stride;
            let needed = start + row_bytes;
            let line = payload.get(start..needed).ok_or(ShadingError::TruncatedPayload {
                needed,
                available: payload.len(),
            })?;

            let [first, second] = channel_pair(y);
            let (row_a, row_b) = two_rows_mut(&mut planes, first, second, y / 2);

            for (group_index, group) in line.chunks_exact(GROUP_BYTES).enumerate() {
                let samples = unpack_group(group);
                for (slot, &raw) in samples.iter().enumerate() {
                    let column = group_index * 2 + slot / 2;
                    if column >= plane_width {
                        break;
                    }
                    let row = if slot & 1 == 0 { &mut *row_a } else { &mut *row_b };
                    row[column] = self.black_level.correct(raw);
                }
            }
        }

        Ok(planes)
    }
}

/// Borrows row `y` of two distinct planes mutably at once.
fn two_rows_mut(
    planes: &mut [ChannelPlane; NUM_CHANNELS],
    first: usize,
    second: usize,
    y: usize,
) -> (&mut [u16], &mut [u16]) {
    debug_assert!(first < second);
    let (head, tail) = planes.split_at_mut(second);
    (head[first].row_mut(y), tail[0].row_mut(y))
}
