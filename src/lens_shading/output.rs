//! Output module
//!
//! This module serialises channel planes and gain grids to the flat formats
//! consumed by the camera firmware, plus optional TIFF previews.

mod writer;
mod flat_writer;
pub mod tiff_preview;

#[cfg(test)]
mod tests;

pub use writer::ShadingWriter;
pub use flat_writer::{FlatFileWriter, HEADER_TABLE_FILE, TEXT_TABLE_FILE, channel_file_name};
pub use tiff_preview::write_tiff_preview;
