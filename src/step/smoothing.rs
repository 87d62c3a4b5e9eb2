use crate::field::buffer::FieldBuffer;
use crate::foundation::core::{OPAQUE_BLACK, Raster, Texel};
use crate::kernel::{clamp_bandwidth, gaussian_radius, gaussian_weight, window_offsets};

/// What buffer 0 holds before the first diffusion tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingSeed {
    /// Copy of the source raster; diffusion then spreads the image itself.
    #[default]
    Source,
    /// Opaque black everywhere.
    Neutral,
}

/// Seed value of cell `(x, y)` for the smoothing rules.
#[inline]
pub fn smoothing_seed(seed: SmoothingSeed, raster: &Raster, x: u32, y: u32) -> Texel {
    match seed {
        SmoothingSeed::Source => raster.sample_clamped(i64::from(x), i64::from(y)),
        SmoothingSeed::Neutral => OPAQUE_BLACK,
    }
}

/// 5-point average of the cell and its four neighbours, edges clamped.
pub fn diffuse_cell(current: &FieldBuffer, x: u32, y: u32) -> Texel {
    let (x, y) = (i64::from(x), i64::from(y));
    let taps = [
        current.sample_clamped(x, y),
        current.sample_clamped(x - 1, y),
        current.sample_clamped(x + 1, y),
        current.sample_clamped(x, y - 1),
        current.sample_clamped(x, y + 1),
    ];
    let mut out = [0.0f32; 4];
    for t in taps {
        for (o, v) in out.iter_mut().zip(t) {
            *o += v;
        }
    }
    out.map(|v| v / 5.0)
}

/// Normalized Gaussian average of the source raster around `(x, y)`.
///
/// Taps are sampled bilinearly, so a fractional `3σ` window stays centered on the cell.
/// Re-evaluated from the static raster every time; it never reads the field buffers.
pub fn gaussian_cell(raster: &Raster, sigma: f32, x: u32, y: u32) -> Texel {
    let sigma = clamp_bandwidth(sigma);
    let (cx, cy) = (x as f32, y as f32);

    let mut sum = [0.0f32; 4];
    let mut sum_k = 0.0f32;
    let offsets = window_offsets(gaussian_radius(sigma));
    for dy in offsets.clone() {
        for dx in offsets.clone() {
            let k = gaussian_weight(dx, dy, sigma);
            let px = raster.sample_bilinear(cx + dx, cy + dy);
            for (s, p) in sum.iter_mut().zip(px) {
                *s += k * p;
            }
            sum_k += k;
        }
    }

    if sum_k <= 0.0 {
        return raster.sample_clamped(i64::from(x), i64::from(y));
    }
    sum.map(|v| v / sum_k)
}

#[cfg(test)]
#[path = "../../tests/unit/step/smoothing.rs"]
mod tests;
