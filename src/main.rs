use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use lens_shading_rs::lens_shading::{
    AnalysisConfig, DegeneratePatchPolicy, LensShadingPipeline, TiffCompression,
};
use lens_shading_rs::logger;

use tracing::{error, info};

/// Derives a lens shading table from a raw capture of a uniformly lit scene.
#[derive(Parser, Debug)]
#[command(name = "lens_shading_analyse", version, about, long_about = None)]
struct Cli {
    /// Raw capture (bare BRCM raw or JPEG+RAW)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Sensor black level in 10-bit units
    #[arg(value_name = "BLACK_LEVEL", default_value_t = 16)]
    black_level: u16,

    /// Directory receiving ch1-4.bin, ls_table.h and ls_table.txt
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Fail on an all-black sampling patch instead of clamping its gain to 255
    #[arg(long)]
    fail_on_degenerate: bool,

    /// Also write each channel plane as a 16-bit TIFF
    #[arg(long, value_name = "COMPRESSION")]
    tiff_preview: Option<PreviewCompression>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PreviewCompression {
    None,
    Lzw,
    Deflate,
}

impl From<PreviewCompression> for TiffCompression {
    fn from(value: PreviewCompression) -> Self {
        match value {
            PreviewCompression::None => TiffCompression::None,
            PreviewCompression::Lzw => TiffCompression::Lzw,
            PreviewCompression::Deflate => TiffCompression::Deflate,
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = AnalysisConfig::builder()
        .black_level(cli.black_level)
        .degenerate_patch(if cli.fail_on_degenerate {
            DegeneratePatchPolicy::Fail
        } else {
            DegeneratePatchPolicy::ClampToCeiling
        })
        .preview(cli.tiff_preview.map(TiffCompression::from))
        .build();
    let pipeline = LensShadingPipeline::new(config).context("Invalid configuration")?;
    info!("Using black level {}", pipeline.config().black_level);

    let analysis = pipeline
        .analyse_file(&cli.input, &cli.out_dir)
        .with_context(|| format!("Failed to analyse {}", cli.input.display()))?;

    info!(
        "Lens shading table written: {} x {} grid, transform {}",
        analysis.geometry.grid_width, analysis.geometry.grid_height, analysis.header.transform
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
