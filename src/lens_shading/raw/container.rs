//! Locates the vendor raw payload inside a bare dump or a JPEG+RAW capture.

use tracing::debug;

use crate::lens_shading::common::error::{Result, ShadingError};

/// Tag opening every raw payload.
pub const RAW_MARKER: &[u8; 4] = b"BRCM";

/// JPEG start-of-image marker.
pub const JPEG_SOI: &[u8; 2] = &[0xFF, 0xD8];

/// Size of the raw payload appended to a JPEG by the full resolution modes
/// of the supported sensors, tried in this order.
pub const APPENDED_RAW_SIZES: [(&str, usize); 2] = [("OV5647", 6_404_096), ("IMX219", 10_270_208)];

fn has_marker_at(data: &[u8], offset: usize) -> bool {
    data.get(offset..offset + RAW_MARKER.len()) == Some(&RAW_MARKER[..])
}

/// Returns the offset of the raw payload (its BRCM marker) within `data`.
///
/// JPEG captures are probed at each known tail size first. Anything else,
/// including a JPEG whose tail does not match, falls back to offset 0.
pub fn locate_raw_payload(data: &[u8]) -> Result<usize> {
    if data.starts_with(JPEG_SOI) {
        for (sensor, size) in APPENDED_RAW_SIZES {
            let Some(offset) = data.len().checked_sub(size) else {
                continue;
            };
            if has_marker_at(data, offset) {
                debug!(sensor, offset, "Found raw payload appended to JPEG");
                return Ok(offset);
            }
        }
        debug!("JPEG tail does not hold a known raw payload, trying offset 0");
    }

    if has_marker_at(data, 0) {
        Ok(0)
    } else {
        Err(ShadingError::MissingMarker)
    }
}
