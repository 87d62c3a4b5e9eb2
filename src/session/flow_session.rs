use std::sync::Arc;

use crate::encode::frame::{Frame, encode_field};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::field::iterator::{FieldIterator, IterState};
use crate::foundation::core::Raster;
use crate::foundation::error::{FlowError, FlowResult};
use crate::kernel::clamp_bandwidth;
use crate::render::backend::{ComputeBackend, create_backend};
use crate::session::config::FlowConfig;

/// Statistics of one [`FlowSession::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Ticks advanced during the run.
    pub ticks_run: u64,
    /// Frames handed to the sink.
    pub frames_pushed: u64,
    /// Iterator tick count when the run finished.
    pub final_tick: u64,
}

/// Host-facing driver: owns the configuration, the backend, the iterator and the raster.
///
/// Parameters are re-read from the configuration on every tick, so [`FlowSession::set_bandwidth`]
/// takes effect on the next tick without re-seeding.
pub struct FlowSession {
    config: FlowConfig,
    backend: Box<dyn ComputeBackend>,
    iterator: FieldIterator,
}

impl std::fmt::Debug for FlowSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowSession")
            .field("config", &self.config)
            .field("backend", &self.backend.kind())
            .field("iterator", &self.iterator)
            .finish()
    }
}

impl FlowSession {
    /// Validate `config` and build its backend. No raster is loaded yet.
    pub fn new(config: FlowConfig) -> FlowResult<Self> {
        config.validate()?;
        let backend = create_backend(config.backend, &config.backend_settings())?;
        tracing::debug!(mode = ?config.mode, backend = ?config.backend, "flow session created");
        Ok(Self {
            config,
            backend,
            iterator: FieldIterator::new(),
        })
    }

    /// Live configuration.
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// The iterator driving the buffers.
    pub fn iterator(&self) -> &FieldIterator {
        &self.iterator
    }

    /// Ticks since the last raster load.
    pub fn ticks(&self) -> u64 {
        self.iterator.ticks()
    }

    /// Replace the raster and re-initialize the iterator (seed buffer 0, active index 0).
    #[tracing::instrument(skip_all, fields(width = raster.width(), height = raster.height()))]
    pub fn load_raster(&mut self, raster: Raster) {
        let canvas = raster.canvas();
        if canvas != self.config.canvas {
            tracing::info!(
                old_width = self.config.canvas.width,
                old_height = self.config.canvas.height,
                "canvas follows the loaded raster"
            );
            self.config.canvas = canvas;
        }
        let rule = self.config.rule();
        self.iterator.initialize(Arc::new(raster), &rule);
        tracing::info!(rule = rule.label(), "raster replaced");
    }

    /// [`FlowSession::load_raster`] from tightly packed RGBA `f32` pixels.
    pub fn load_raster_rgba(&mut self, pixels: &[f32], width: u32, height: u32) -> FlowResult<()> {
        let raster = Raster::from_rgba_f32(width, height, pixels)?;
        self.load_raster(raster);
        Ok(())
    }

    /// Set the bandwidth used from the next tick on.
    ///
    /// Non-finite or too small values clamp to a near-zero window instead of failing.
    pub fn set_bandwidth(&mut self, value: f32) {
        let clamped = clamp_bandwidth(value);
        if clamped != value {
            tracing::debug!(requested = value, clamped, "bandwidth clamped");
        }
        self.config.bandwidth = clamped;
    }

    /// Advance one step and return the encoded frame.
    pub fn tick(&mut self) -> FlowResult<Frame> {
        self.step()?;
        self.current_frame()
    }

    /// Advance `ticks` steps without encoding; returns the tick count since the last load.
    pub fn advance(&mut self, ticks: u64) -> FlowResult<u64> {
        for _ in 0..ticks {
            self.step()?;
        }
        tracing::debug!(ticks = self.iterator.ticks(), "advanced");
        Ok(self.iterator.ticks())
    }

    fn step(&mut self) -> FlowResult<u64> {
        let rule = self.config.rule();
        self.iterator.tick(&rule, self.backend.as_ref())
    }

    /// Encoded output of the current buffer.
    pub fn current_frame(&self) -> FlowResult<Frame> {
        if self.iterator.state() == IterState::Uninitialized {
            return Err(FlowError::config("current_frame called before a raster was loaded"));
        }
        let field = self.iterator.current()?;
        encode_field(field, self.config.encoding(), self.backend.as_ref())
    }

    /// Advance `ticks` steps, pushing the frame after every `every`-th tick and after the last.
    ///
    /// With `ticks == 0` the current frame is pushed once. Frames are tagged with the iterator's
    /// tick count, so ticks are strictly increasing within a run.
    #[tracing::instrument(skip(self, sink), fields(mode = ?self.config.mode))]
    pub fn run(
        &mut self,
        ticks: u64,
        every: u64,
        sink: &mut dyn FrameSink,
    ) -> FlowResult<RunStats> {
        if every == 0 {
            return Err(FlowError::validation("run `every` must be >= 1"));
        }
        if self.iterator.state() == IterState::Uninitialized {
            return Err(FlowError::config("run called before a raster was loaded"));
        }

        let canvas = self.config.canvas;
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            rule: self.config.rule().label(),
        })?;

        let mut stats = RunStats::default();
        let mut last_pushed = None;
        for i in 1..=ticks {
            let tick = self.step()?;
            stats.ticks_run += 1;
            if i % every == 0 {
                sink.push_frame(tick, &self.current_frame()?)?;
                stats.frames_pushed += 1;
                last_pushed = Some(tick);
            }
            tracing::debug!(tick, "flow tick");
        }

        let final_tick = self.iterator.ticks();
        if last_pushed != Some(final_tick) {
            sink.push_frame(final_tick, &self.current_frame()?)?;
            stats.frames_pushed += 1;
        }
        sink.end()?;

        stats.final_tick = final_tick;
        tracing::info!(
            ticks = stats.ticks_run,
            frames = stats.frames_pushed,
            "flow run complete"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/flow_session.rs"]
mod tests;
