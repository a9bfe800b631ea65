//! Parsing of the fixed-layout raw header.

use tracing::info;

use crate::lens_shading::common::error::{Result, ShadingError};
use crate::lens_shading::raw::types::{BayerOrder, RawHeader};

/// Offset of the header record from the BRCM marker.
pub const HEADER_OFFSET: usize = 0xB0;

/// Bytes of the header record that are actually read.
pub const HEADER_LEN: usize = 70;

/// `format` value of a Bayer capture.
pub const FORMAT_BAYER: u16 = 33;

/// `bayer_format` value of 10-bit packed samples.
pub const BAYER_FORMAT_RAW10: u8 = 3;

const NAME_LEN: usize = 32;
const WIDTH_OFFSET: usize = 32;
const HEIGHT_OFFSET: usize = 34;
const PADDING_RIGHT_OFFSET: usize = 36;
const PADDING_DOWN_OFFSET: usize = 38;
const TRANSFORM_OFFSET: usize = 64;
const FORMAT_OFFSET: usize = 66;
const BAYER_ORDER_OFFSET: usize = 68;
const BAYER_FORMAT_OFFSET: usize = 69;

fn read_u16_le(record: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([record[offset], record[offset + 1]])
}

/// Parses and validates the header of the payload starting at `payload[0]`.
///
/// Only the pixel format is checked; geometry and transform are taken as-is.
pub fn parse_header(payload: &[u8]) -> Result<RawHeader> {
    let needed = HEADER_OFFSET + HEADER_LEN;
    let record = payload
        .get(HEADER_OFFSET..needed)
        .ok_or(ShadingError::TruncatedPayload {
            needed,
            available: payload.len(),
        })?;

    let name_bytes = &record[..NAME_LEN];
    let name_end = name_bytes.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
    let name = String::from_utf8_lossy(&name_bytes[..name_end]).into_owned();

    let width = read_u16_le(record, WIDTH_OFFSET);
    let height = read_u16_le(record, HEIGHT_OFFSET);
    let padding_right = read_u16_le(record, PADDING_RIGHT_OFFSET);
    let padding_down = read_u16_le(record, PADDING_DOWN_OFFSET);
    let transform = read_u16_le(record, TRANSFORM_OFFSET);
    let format = read_u16_le(record, FORMAT_OFFSET);
    let bayer_order_code = record[BAYER_ORDER_OFFSET];
    let bayer_format = record[BAYER_FORMAT_OFFSET];

    info!(
        "Header decoding: mode {}, width {}, height {}, padding {} {}",
        name, width, height, padding_right, padding_down
    );
    info!(
        "transform {}, image format {}, bayer order {}, bayer format {}",
        transform, format, bayer_order_code, bayer_format
    );

    if format != FORMAT_BAYER || bayer_format != BAYER_FORMAT_RAW10 {
        return Err(ShadingError::UnsupportedFormat {
            format,
            bayer_format,
        });
    }

    Ok(RawHeader {
        name,
        width,
        height,
        padding_right,
        padding_down,
        transform,
        format,
        bayer_order: BayerOrder::from_code(bayer_order_code)?,
        bayer_format,
    })
}
