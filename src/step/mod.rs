//! Per-cell update rules.
//!
//! Every rule is a pure function of `(current buffer, raster, parameters, x, y)`: no cell reads
//! another cell's output from the same tick, which is what lets a backend evaluate all cells
//! at once.

pub(crate) mod mean_shift;
pub(crate) mod smoothing;

use crate::field::buffer::FieldBuffer;
use crate::foundation::core::{Raster, Texel};

pub use mean_shift::{
    DEFAULT_KERNEL_SIZE, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_STEP_DAMPING, MeanShiftParams,
    mean_shift_cell, mean_shift_seed,
};
pub use smoothing::{SmoothingSeed, diffuse_cell, gaussian_cell, smoothing_seed};

/// A step rule together with the parameters for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepRule {
    /// Iterated mean-shift over coordinate estimates.
    MeanShift(MeanShiftParams),
    /// 5-point diffusion iterated against its own output.
    Diffusion {
        /// Initial buffer contents.
        seed: SmoothingSeed,
    },
    /// One-shot Gaussian blur of the static raster.
    GaussianBlur {
        /// Standard deviation in pixels.
        sigma: f32,
    },
}

impl StepRule {
    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MeanShift(_) => "mean_shift",
            Self::Diffusion { .. } => "diffusion",
            Self::GaussianBlur { .. } => "gaussian_blur",
        }
    }

    /// Value written into buffer 0 on (re-)initialization.
    pub fn seed(&self, raster: &Raster, x: u32, y: u32) -> Texel {
        match self {
            Self::MeanShift(_) => mean_shift_seed(raster.canvas(), x, y),
            Self::Diffusion { seed } => smoothing_seed(*seed, raster, x, y),
            Self::GaussianBlur { .. } => smoothing_seed(SmoothingSeed::Neutral, raster, x, y),
        }
    }

    /// Next value of cell `(x, y)`.
    #[inline]
    pub fn apply(&self, current: &FieldBuffer, raster: &Raster, x: u32, y: u32) -> Texel {
        match self {
            Self::MeanShift(p) => mean_shift_cell(current, raster, p, x, y),
            Self::Diffusion { .. } => diffuse_cell(current, x, y),
            Self::GaussianBlur { sigma } => gaussian_cell(raster, *sigma, x, y),
        }
    }

    /// Sequential single-threaded evaluation of one full step into a fresh buffer.
    ///
    /// Reference used to cross-check the backends.
    pub fn step_reference(&self, current: &FieldBuffer, raster: &Raster) -> FieldBuffer {
        FieldBuffer::from_fn(current.canvas(), |x, y| self.apply(current, raster, x, y))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/step/mod.rs"]
mod tests;
