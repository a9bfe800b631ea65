//! Synthetic BRCM captures for unit tests.

use crate::lens_shading::raw::container::RAW_MARKER;
use crate::lens_shading::raw::header::{BAYER_FORMAT_RAW10, FORMAT_BAYER, HEADER_OFFSET};
use crate::lens_shading::raw::types::{RawGeometry, RawHeader, BayerOrder};
use crate::lens_shading::raw::unpack::{GROUP_BYTES, GROUP_PIXELS, PIXEL_DATA_OFFSET};

/// Packs four 10-bit samples into the 5-byte raw10 layout.
pub fn pack_group(samples: [u16; 4]) -> [u8; 5] {
    let mut group = [0u8; 5];
    for (slot, &sample) in samples.iter().enumerate() {
        group[slot] = (sample >> 2) as u8;
        group[4] |= ((sample & 0b11) as u8) << (6 - 2 * slot);
    }
    group
}

pub struct SyntheticCapture {
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub padding_right: u16,
    pub transform: u16,
    pub format: u16,
    pub bayer_format: u8,
    pub bayer_order: u8,
}

impl SyntheticCapture {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            name: "test-mode".to_string(),
            width,
            height,
            padding_right: 0,
            transform: 0,
            format: FORMAT_BAYER,
            bayer_format: BAYER_FORMAT_RAW10,
            bayer_order: 0,
        }
    }

    pub fn geometry(&self) -> RawGeometry {
        RawGeometry::from_header(&RawHeader {
            name: self.name.clone(),
            width: self.width,
            height: self.height,
            padding_right: self.padding_right,
            padding_down: 0,
            transform: self.transform,
            format: self.format,
            bayer_order: BayerOrder::Rggb,
            bayer_format: self.bayer_format,
        })
    }

    /// Header and metadata block only, no pixel rows.
    pub fn header_bytes(&self) -> Vec<u8> {
        let mut data = vec![0u8; PIXEL_DATA_OFFSET];
        data[..4].copy_from_slice(RAW_MARKER);

        let record = &mut data[HEADER_OFFSET..];
        let name = self.name.as_bytes();
        record[..name.len()].copy_from_slice(name);
        record[32..34].copy_from_slice(&self.width.to_le_bytes());
        record[34..36].copy_from_slice(&self.height.to_le_bytes());
        record[36..38].copy_from_slice(&self.padding_right.to_le_bytes());
        record[64..66].copy_from_slice(&self.transform.to_le_bytes());
        record[66..68].copy_from_slice(&self.format.to_le_bytes());
        record[68] = self.bayer_order;
        record[69] = self.bayer_format;
        data
    }

    /// Full payload whose mosaic sample at (x, y) is `sample(x, y)`.
    pub fn build(&self, sample: impl Fn(usize, usize) -> u16) -> Vec<u8> {
        let geometry = self.geometry();
        let mut data = self.header_bytes();
        data.resize(PIXEL_DATA_OFFSET + geometry.stride * geometry.height, 0);

        for y in 0..geometry.height {
            let row_start = PIXEL_DATA_OFFSET + y * geometry.stride;
            for group_index in 0..geometry.width.div_ceil(GROUP_PIXELS) {
                let x = group_index * GROUP_PIXELS;
                let samples = std::array::from_fn(|slot| {
                    if x + slot < geometry.width { sample(x + slot, y) } else { 0 }
                });
                let start = row_start + group_index * GROUP_BYTES;
                data[start..start + GROUP_BYTES].copy_from_slice(&pack_group(samples));
            }
        }
        data
    }

    pub fn build_uniform(&self, value: u16) -> Vec<u8> {
        self.build(|_, _| value)
    }
}
