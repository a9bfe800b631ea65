use std::io::Write;

use tracing::debug;

use crate::lens_shading::common::error::Result;
use crate::lens_shading::config::TiffCompression;
use crate::lens_shading::grid::types::ShadingAnalysis;
use crate::lens_shading::output::tiff_preview::write_tiff_preview;
use crate::lens_shading::output::writer::ShadingWriter;
use crate::lens_shading::raw::types::ChannelPlane;

/// Generated C header holding the gain table.
pub const HEADER_TABLE_FILE: &str = "ls_table.h";

/// Plain-text listing of every grid point.
pub const TEXT_TABLE_FILE: &str = "ls_table.txt";

/// File name of storage plane `index` (0-based), e.g. `ch1.bin`.
pub fn channel_file_name(index: usize, extension: &str) -> String {
    format!("ch{}.{}", index + 1, extension)
}

/// Writes planes as raw little-endian u16, the grid as `ls_table.h` and
/// `ls_table.txt`, and previews as Gray16 TIFF.
pub struct FlatFileWriter;

impl ShadingWriter for FlatFileWriter {
    fn write_plane(&self, plane: &ChannelPlane, output: &mut dyn Write) -> Result<()> {
        debug!("Writing channel plane: {}x{}", plane.width, plane.height);

        let bytes: Vec<u8> = plane.data.iter().flat_map(|&v| v.to_le_bytes()).collect();
        output.write_all(&bytes)?;
        Ok(())
    }

    fn write_header_table(&self, analysis: &ShadingAnalysis, output: &mut dyn Write) -> Result<()> {
        let grid_width = analysis.geometry.grid_width;

        writeln!(output, "uint8_t ls_grid[] = {{")?;
        for grid in &analysis.grids {
            writeln!(output, "//{} - Ch {}", grid.channel.label(), grid.plane_index)?;
            for row in grid.points.chunks(grid_width.max(1)) {
                if let Some((edge, interior)) = row.split_last() {
                    for point in interior {
                        write!(output, "{}, ", point.gain)?;
                    }
                    writeln!(output, "{},", edge.gain)?;
                }
            }
        }
        writeln!(output, "}};")?;
        writeln!(output, "uint32_t ref_transform = {};", analysis.header.transform)?;
        writeln!(output, "uint32_t grid_width = {};", grid_width)?;
        writeln!(output, "uint32_t grid_height = {};", analysis.geometry.grid_height)?;
        Ok(())
    }

    fn write_text_table(&self, analysis: &ShadingAnalysis, output: &mut dyn Write) -> Result<()> {
        for point in analysis.grids.iter().flat_map(|grid| &grid.points) {
            writeln!(output, "{} {} {} {}", point.x, point.y, point.gain, point.channel)?;
        }
        Ok(())
    }

    fn write_preview(&self, plane: &ChannelPlane, output: &mut dyn Write, compression: TiffCompression) -> Result<()> {
        write_tiff_preview(plane, output, compression)
    }
}
