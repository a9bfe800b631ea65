use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{info, instrument};

use crate::lens_shading::{
    common::error::{Result, ShadingError},
    config::AnalysisConfig,
    grid::{GridGainComputer, ShadingAnalysis},
    output::{FlatFileWriter, HEADER_TABLE_FILE, ShadingWriter, TEXT_TABLE_FILE, channel_file_name},
    raw::{BrcmRawDecoder, RawDecoder},
};

pub struct LensShadingPipeline<D: RawDecoder, W: ShadingWriter> {
    decoder: D,
    writer: W,
    computer: GridGainComputer,
    config: AnalysisConfig,
}

impl LensShadingPipeline<BrcmRawDecoder, FlatFileWriter> {
    /// Builds the standard pipeline, rejecting a black level at or above full scale.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        let black_level = config.black_level()?;
        Ok(Self {
            decoder: BrcmRawDecoder::new(black_level),
            writer: FlatFileWriter,
            computer: GridGainComputer::new(config.degenerate_patch),
            config,
        })
    }
}

impl<D: RawDecoder, W: ShadingWriter> LensShadingPipeline<D, W> {
    pub fn with_custom(decoder: D, writer: W, config: AnalysisConfig) -> Self {
        Self {
            decoder,
            writer,
            computer: GridGainComputer::new(config.degenerate_patch),
            config,
        }
    }

    /// Decodes a capture held in memory and derives its gain grids.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn analyse(&self, input_data: &[u8]) -> Result<ShadingAnalysis> {
        info!("Starting lens shading analysis");

        let decoded = {
            let _span = tracing::info_span!("decode_raw").entered();
            self.decoder.decode(input_data)?
        };

        let grids = {
            let _span = tracing::info_span!("compute_grids",
                grid_width = decoded.geometry.grid_width,
                grid_height = decoded.geometry.grid_height
            ).entered();
            self.computer.compute_all(&decoded.planes, decoded.header.bayer_order)?
        };

        info!(
            width = decoded.geometry.width,
            height = decoded.geometry.height,
            "Save data. Bayer order is {}",
            decoded.header.bayer_order.code()
        );

        Ok(ShadingAnalysis {
            header: decoded.header,
            geometry: decoded.geometry,
            planes: decoded.planes,
            grids,
        })
    }

    /// Writes the channel planes, both grid tables and, if configured, the
    /// TIFF previews into `output_dir`.
    #[instrument(skip(self, analysis, output_dir))]
    pub fn write_outputs(&self, analysis: &ShadingAnalysis, output_dir: &Path) -> Result<()> {
        for (index, plane) in analysis.planes.iter().enumerate() {
            let name = channel_file_name(index, "bin");
            info!("Saving {} data", name);
            let mut output = create_output(&output_dir.join(&name))?;
            self.writer.write_plane(plane, &mut output)?;
            output.flush()?;

            if let Some(compression) = self.config.preview {
                let name = channel_file_name(index, "tiff");
                let mut output = create_output(&output_dir.join(&name))?;
                self.writer.write_preview(plane, &mut output, compression)?;
                output.flush()?;
            }
        }

        let mut header = create_output(&output_dir.join(HEADER_TABLE_FILE))?;
        self.writer.write_header_table(analysis, &mut header)?;
        header.flush()?;

        let mut table = create_output(&output_dir.join(TEXT_TABLE_FILE))?;
        self.writer.write_text_table(analysis, &mut table)?;
        table.flush()?;

        Ok(())
    }

    /// Reads `input_path`, analyses it and writes every output into `output_dir`.
    ///
    /// The input buffer is released before any output is written, whether the
    /// analysis succeeded or not.
    #[instrument(skip(self, input_path, output_dir))]
    pub fn analyse_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_dir: Q,
    ) -> Result<ShadingAnalysis> {
        let input_path = input_path.as_ref();
        let output_dir = output_dir.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_dir.display(),
            "Analysing file"
        );

        let analysis = {
            let _span = tracing::info_span!("read_input_file").entered();
            let data = std::fs::read(input_path).map_err(|e| {
                ShadingError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?;
            info!("File size is {}", data.len());
            self.analyse(&data)?
        };

        self.write_outputs(&analysis, output_dir)?;

        Ok(analysis)
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        ShadingError::OutputWriteError(format!("{}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
