use crate::field::buffer::FieldBuffer;
use crate::foundation::core::{Canvas, Raster, Texel};
use crate::foundation::math::rgb_distance;
use crate::kernel::{MeanShiftAccumulator, clamp_bandwidth, window_offsets};

/// Default window half-width in pixels.
pub const DEFAULT_KERNEL_SIZE: f32 = 25.0;
/// Default RGB distance below which a candidate counts as "same color".
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.1;
/// Default fraction of the mean shift applied per tick.
pub const DEFAULT_STEP_DAMPING: f32 = 0.1;

/// Parameters of one mean-shift tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MeanShiftParams {
    /// Window half-width in pixels (`kernel_size`).
    pub bandwidth: f32,
    /// Color gate, Euclidean RGB distance.
    pub similarity_threshold: f32,
    /// Fraction of the mean offset applied each tick.
    pub step_damping: f32,
}

impl Default for MeanShiftParams {
    fn default() -> Self {
        Self {
            bandwidth: DEFAULT_KERNEL_SIZE,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            step_damping: DEFAULT_STEP_DAMPING,
        }
    }
}

/// Identity coordinate map: cell `(x, y)` starts at `(x / width, y / height)`.
#[inline]
pub fn mean_shift_seed(canvas: Canvas, x: u32, y: u32) -> Texel {
    let (u, v) = canvas.normalized(x, y);
    [u, v, 0.0, 1.0]
}

/// Advance the coordinate estimate of cell `(x, y)` by one damped mean-shift step.
///
/// The color gate compares against the cell's *original* pixel, while the window is centered
/// on the current estimate stored in `current`.
pub fn mean_shift_cell(
    current: &FieldBuffer,
    raster: &Raster,
    params: &MeanShiftParams,
    x: u32,
    y: u32,
) -> Texel {
    let canvas = raster.canvas();
    let center = raster.sample_clamped(i64::from(x), i64::from(y));
    let r = current.get(x, y);
    let k = clamp_bandwidth(params.bandwidth);
    let (w, h) = (canvas.width as f32, canvas.height as f32);

    let mut acc = MeanShiftAccumulator::default();
    let offsets = window_offsets(k);
    for dy in offsets.clone() {
        for dx in offsets.clone() {
            let dr = [dx / w, dy / h];
            let sample = raster.sample_normalized(r[0] + dr[0], r[1] + dr[1]);
            acc.offer(
                dr,
                k,
                rgb_distance(sample, center),
                params.similarity_threshold,
            );
        }
    }

    let [mx, my] = acc.mean();
    [
        r[0] + params.step_damping * mx,
        r[1] + params.step_damping * my,
        0.0,
        1.0,
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/step/mean_shift.rs"]
mod tests;
