use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::encode::frame::{DEFAULT_BRIGHTNESS_SCALE, Encoding};
use crate::foundation::core::Canvas;
use crate::foundation::error::{FlowError, FlowResult};
use crate::render::backend::{BackendKind, BackendSettings};
use crate::step::{
    DEFAULT_KERNEL_SIZE, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_STEP_DAMPING, MeanShiftParams,
    SmoothingSeed, StepRule,
};

/// Which step rule a session iterates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowMode {
    /// Per-pixel mean-shift flow field.
    #[default]
    MeanShift,
    /// Iterated 5-point diffusion.
    Diffusion,
    /// One-shot Gaussian blur of the source.
    GaussianBlur,
}

/// JSON-facing session configuration.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowConfig {
    /// Step rule.
    pub mode: FlowMode,
    /// Raster and buffer dimensions.
    pub canvas: Canvas,
    /// Mean-shift window half-width, or Gaussian sigma, in pixels.
    pub bandwidth: f32,
    /// Mean-shift color gate.
    pub similarity_threshold: f32,
    /// Mean-shift damping.
    pub step_damping: f32,
    /// Flow encoder brightness multiplier.
    pub brightness_scale: f32,
    /// Diffusion seed.
    pub smoothing_seed: SmoothingSeed,
    /// Compute backend.
    pub backend: BackendKind,
    /// Worker threads for the parallel backend.
    pub threads: Option<usize>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            mode: FlowMode::default(),
            canvas: Canvas::default(),
            bandwidth: DEFAULT_KERNEL_SIZE,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            step_damping: DEFAULT_STEP_DAMPING,
            brightness_scale: DEFAULT_BRIGHTNESS_SCALE,
            smoothing_seed: SmoothingSeed::default(),
            backend: BackendKind::default(),
            threads: None,
        }
    }
}

impl FlowConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FlowResult<Self> {
        serde_json::from_reader(r).map_err(|e| FlowError::serde(format!("parse config JSON: {e}")))
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> FlowResult<Self> {
        serde_json::from_str(s).map_err(|e| FlowError::serde(format!("parse config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FlowResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FlowError::config(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> FlowResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| FlowError::serde(e.to_string()))
    }

    /// Check values a session cannot run with.
    ///
    /// The bandwidth is not checked: out-of-range values are clamped when used.
    pub fn validate(&self) -> FlowResult<()> {
        self.canvas.validate()?;
        if !self.similarity_threshold.is_finite() || self.similarity_threshold < 0.0 {
            return Err(FlowError::validation(format!(
                "similarity_threshold must be finite and >= 0, got {}",
                self.similarity_threshold
            )));
        }
        if !self.step_damping.is_finite() {
            return Err(FlowError::validation(format!(
                "step_damping must be finite, got {}",
                self.step_damping
            )));
        }
        if !self.brightness_scale.is_finite() {
            return Err(FlowError::validation(format!(
                "brightness_scale must be finite, got {}",
                self.brightness_scale
            )));
        }
        if self.threads == Some(0) {
            return Err(FlowError::validation("threads must be >= 1"));
        }
        Ok(())
    }

    /// Step rule for the next tick.
    pub fn rule(&self) -> StepRule {
        match self.mode {
            FlowMode::MeanShift => StepRule::MeanShift(MeanShiftParams {
                bandwidth: self.bandwidth,
                similarity_threshold: self.similarity_threshold,
                step_damping: self.step_damping,
            }),
            FlowMode::Diffusion => StepRule::Diffusion {
                seed: self.smoothing_seed,
            },
            FlowMode::GaussianBlur => StepRule::GaussianBlur {
                sigma: self.bandwidth,
            },
        }
    }

    /// How the current buffer becomes a frame.
    pub fn encoding(&self) -> Encoding {
        match self.mode {
            FlowMode::MeanShift => Encoding::FlowHue {
                bandwidth: self.bandwidth,
                brightness: self.brightness_scale,
            },
            FlowMode::Diffusion | FlowMode::GaussianBlur => Encoding::Direct,
        }
    }

    /// Backend settings derived from `threads`.
    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            threads: self.threads,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
