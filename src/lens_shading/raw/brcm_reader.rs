//! Decoder for BRCM raw10 captures, bare or appended to a JPEG.

use tracing::{debug, info};

use crate::lens_shading::common::error::Result;
use crate::lens_shading::raw::container::locate_raw_payload;
use crate::lens_shading::raw::header::parse_header;
use crate::lens_shading::raw::reader::RawDecoder;
use crate::lens_shading::raw::types::{DecodedRaw, RawGeometry};
use crate::lens_shading::raw::unpack::{Bayer10Unpacker, BlackLevel};

/// Raw decoder composing payload location, header parsing and unpacking.
pub struct BrcmRawDecoder {
    unpacker: Bayer10Unpacker,
}

impl BrcmRawDecoder {
    pub fn new(black_level: BlackLevel) -> Self {
        Self {
            unpacker: Bayer10Unpacker::new(black_level),
        }
    }
}

impl RawDecoder for BrcmRawDecoder {
    /// Decodes a whole capture held in memory.
    ///
    /// # Errors
    ///
    /// * `MissingMarker` - no BRCM payload at any candidate offset
    /// * `UnsupportedFormat` / `UnknownBayerOrder` - header rejected
    /// * `TruncatedPayload` - header geometry exceeds the buffer
    fn decode(&self, data: &[u8]) -> Result<DecodedRaw> {
        debug!("Decoding raw capture, {} bytes", data.len());

        let offset = locate_raw_payload(data)?;
        let payload = &data[offset..];
        debug!(offset, "Raw payload located");

        let header = parse_header(payload)?;
        let geometry = RawGeometry::from_header(&header);
        info!("Grid size: {} x {}", geometry.grid_width, geometry.grid_height);

        let planes = self.unpacker.unpack(payload, &geometry)?;

        Ok(DecodedRaw {
            header,
            geometry,
            planes,
        })
    }
}
