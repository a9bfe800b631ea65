//! Gray16 TIFF previews of channel planes.
//!
//! The flat `.bin` planes need the geometry to be viewed; the previews carry
//! it in the TIFF header so any image viewer can open them.

use std::io::Write;

use tracing::debug;

use crate::lens_shading::common::error::{Result, ShadingError};
use crate::lens_shading::config::TiffCompression;
use crate::lens_shading::raw::types::ChannelPlane;

pub fn write_tiff_preview(plane: &ChannelPlane, output: &mut dyn Write, compression: TiffCompression) -> Result<()> {
    debug!("Encoding TIFF preview: {}x{}", plane.width, plane.height);

    let mut buffer = Vec::new();

    {
        let compression = match compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::Deflate => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| ShadingError::EncodeError(e.to_string()))?
            .with_compression(compression);

        encoder.write_image::<tiff::encoder::colortype::Gray16>(
            plane.width as u32,
            plane.height as u32,
            &plane.data,
        ).map_err(|e| ShadingError::EncodeError(e.to_string()))?;
    }

    output.write_all(&buffer)?;

    debug!("TIFF preview encoding complete");
    Ok(())
}
