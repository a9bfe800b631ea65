use std::io::Write;

use crate::lens_shading::common::error::Result;
use crate::lens_shading::config::TiffCompression;
use crate::lens_shading::grid::types::ShadingAnalysis;
use crate::lens_shading::raw::types::ChannelPlane;

pub trait ShadingWriter {
    fn write_plane(&self, plane: &ChannelPlane, output: &mut dyn Write) -> Result<()>;
    fn write_header_table(&self, analysis: &ShadingAnalysis, output: &mut dyn Write) -> Result<()>;
    fn write_text_table(&self, analysis: &ShadingAnalysis, output: &mut dyn Write) -> Result<()>;
    fn write_preview(&self, plane: &ChannelPlane, output: &mut dyn Write, compression: TiffCompression) -> Result<()>;
}
