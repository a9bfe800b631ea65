//! Derivation of per-channel gain grids from channel planes.
//!
//! Gains are fixed point with 5 fractional bits: the centre of the plane is
//! the reference, and each grid point gets `reference / local brightness`,
//! rounded to the nearest step and clipped to [`UNITY_GAIN`, `MAX_GAIN`].

use tracing::{debug, info, warn};

use crate::lens_shading::common::error::{Result, ShadingError};
use crate::lens_shading::config::DegeneratePatchPolicy;
use crate::lens_shading::grid::types::{GainGrid, GridPoint, MAX_GAIN, OutputChannel, UNITY_GAIN};
use crate::lens_shading::raw::types::{BayerOrder, ChannelPlane, GRID_PITCH, NUM_CHANNELS};

/// Half the side of the square patch averaged for the reference value.
pub const CENTRE_PATCH_RADIUS: usize = 4;

/// Fractional bits of a gain value.
pub const GAIN_FRACTION_BITS: u32 = 5;

/// Offset of the first grid sample from the plane origin.
pub const GRID_ORIGIN: usize = GRID_PITCH / 2;

const MIN_PLANE_SIDE: usize = 2 * CENTRE_PATCH_RADIUS + 1;

/// Computes gain grids for the four output channels of a capture.
pub struct GridGainComputer {
    degenerate_patch: DegeneratePatchPolicy,
}

impl GridGainComputer {
    pub fn new(degenerate_patch: DegeneratePatchPolicy) -> Self {
        Self { degenerate_patch }
    }

    /// Mean of the 9x9 patch around the plane centre, scaled to gain units.
    pub fn reference_value(plane: &ChannelPlane) -> Result<u32> {
        if plane.width < MIN_PLANE_SIDE || plane.height < MIN_PLANE_SIDE {
            return Err(ShadingError::PlaneTooSmall {
                width: plane.width,
                height: plane.height,
            });
        }

        let cx = plane.width / 2;
        let cy = plane.height / 2;
        let mut sum = 0u32;
        let mut count = 0u32;
        for y in cy - CENTRE_PATCH_RADIUS..=cy + CENTRE_PATCH_RADIUS {
            let row = plane.row(y);
            for &sample in &row[cx - CENTRE_PATCH_RADIUS..=cx + CENTRE_PATCH_RADIUS] {
                sum += sample as u32;
                count += 1;
            }
        }

        Ok((sum / count) << GAIN_FRACTION_BITS)
    }

    /// Builds the grid for one output channel from its storage plane.
    ///
    /// Rows sit at `16 + 32j`, clamped to the last plane row. Each row has
    /// `grid_width - 1` interior points at `16 + 32i`, averaged over three
    /// horizontal neighbours, followed by an edge point averaged over the
    /// last two samples of the row.
    pub fn compute(&self, plane: &ChannelPlane, channel: OutputChannel, plane_index: usize) -> Result<GainGrid> {
        let reference_value = Self::reference_value(plane)?;
        info!("{} (plane {}): middle value is {}", channel.label(), plane_index, reference_value);

        let grid_width = plane.width.div_ceil(GRID_PITCH);
        let grid_height = plane.height.div_ceil(GRID_PITCH);
        let mut points = Vec::with_capacity(grid_width * grid_height);

        for j in 0..grid_height {
            let y = (GRID_ORIGIN + j * GRID_PITCH).min(plane.height - 1);
            let row = plane.row(y);

            for i in 0..grid_width - 1 {
                let x = GRID_ORIGIN + i * GRID_PITCH;
                let gain = self.gain(reference_value, &row[x - 1..=x + 1], channel, x, y)?;
                points.push(GridPoint { x, y, gain, channel: channel.index() });
            }

            let x = plane.width - 1;
            let gain = self.gain(reference_value, &row[x - 1..=x], channel, x, y)?;
            points.push(GridPoint { x, y, gain, channel: channel.index() });
        }

        debug!(channel = channel.label(), grid_width, grid_height, "Gain grid computed");

        Ok(GainGrid {
            channel,
            plane_index,
            reference_value,
            points,
        })
    }

    /// Builds grids for R, Gr, Gb and B, in that order.
    pub fn compute_all(
        &self,
        planes: &[ChannelPlane; NUM_CHANNELS],
        bayer_order: BayerOrder,
    ) -> Result<[GainGrid; NUM_CHANNELS]> {
        let [r, gr, gb, b] = OutputChannel::ALL.map(|channel| {
            let plane_index = bayer_order.plane_for(channel.index());
            self.compute(&planes[plane_index], channel, plane_index)
        });
        Ok([r?, gr?, gb?, b?])
    }

    fn gain(
        &self,
        reference_value: u32,
        samples: &[u16],
        channel: OutputChannel,
        x: usize,
        y: usize,
    ) -> Result<u8> {
        let sum: u32 = samples.iter().map(|&s| s as u32).sum();
        if sum == 0 {
            return match self.degenerate_patch {
                DegeneratePatchPolicy::ClampToCeiling => {
                    warn!(channel = channel.label(), x, y, "All-zero patch, clamping gain to {}", MAX_GAIN);
                    Ok(MAX_GAIN)
                }
                DegeneratePatchPolicy::Fail => Err(ShadingError::DegeneratePatch {
                    channel: channel.index(),
                    x,
                    y,
                }),
            };
        }

        Ok(clamp_gain(rounded_ratio(reference_value * samples.len() as u32, sum)))
    }
}

/// `numerator / denominator`, rounded half up.
fn rounded_ratio(numerator: u32, denominator: u32) -> u32 {
    (numerator + denominator / 2) / denominator
}

/// Clips a raw gain ratio to the representable table range.
pub fn clamp_gain(raw_gain: u32) -> u8 {
    raw_gain.clamp(UNITY_GAIN as u32, MAX_GAIN as u32) as u8
}
