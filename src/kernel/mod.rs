//! Pure per-offset weighting functions shared by the step rules.
//!
//! Nothing in here touches buffers: callers hand in offsets, distances and parameters, and the
//! same functions serve the sequential and the parallel backends.

mod gaussian;
mod mean_shift;

pub use gaussian::{gaussian_kernel_size, gaussian_radius, gaussian_weight};
pub use mean_shift::{MeanShiftAccumulator, weighted_offset};

/// Smallest bandwidth the kernels accept; anything below (or non-finite) is raised to this.
///
/// At this radius the sampling window degenerates to the center offset alone.
pub const MIN_BANDWIDTH: f32 = 1.0e-3;

/// Clamp a caller-supplied bandwidth into the usable range.
#[inline]
pub fn clamp_bandwidth(value: f32) -> f32 {
    if value.is_finite() && value > MIN_BANDWIDTH {
        value
    } else {
        MIN_BANDWIDTH
    }
}

/// Inclusive unit-step offsets `-r, -r + 1, ..` while `<= r`.
///
/// Mirrors a `for (t = -r; t <= r; t += 1)` loop, so a fractional `r` yields fractional
/// offsets.
pub(crate) fn window_offsets(radius: f32) -> impl Iterator<Item = f32> + Clone {
    let radius = radius.max(0.0);
    let steps = (2.0 * radius).floor() as u32;
    (0..=steps).map(move |i| -radius + i as f32)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/mod.rs"]
mod tests;
