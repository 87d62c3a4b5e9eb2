use std::sync::Arc;

use crate::field::buffer::{FieldBuffer, PingPong};
use crate::foundation::core::Raster;
use crate::foundation::error::{FlowError, FlowResult};
use crate::render::backend::ComputeBackend;
use crate::step::StepRule;

/// Lifecycle of a [`FieldIterator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterState {
    /// No raster loaded yet; ticking is a configuration error.
    Uninitialized,
    /// Buffers seeded; every tick writes `next` from `current` and swaps.
    Running,
}

/// Owner of the two field buffers and the active-buffer bit.
///
/// Each tick hands the step rule the current buffer as a shared borrow and the other buffer
/// as the exclusive write target, dispatches the whole frame through a backend, then flips
/// roles. There is no convergence test: the caller decides how many ticks to run.
#[derive(Debug, Default)]
pub struct FieldIterator {
    raster: Option<Arc<Raster>>,
    buffers: Option<PingPong>,
    ticks: u64,
}

impl FieldIterator {
    /// Create an uninitialized iterator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> IterState {
        if self.raster.is_some() && self.buffers.is_some() {
            IterState::Running
        } else {
            IterState::Uninitialized
        }
    }

    /// Ticks completed since the last (re-)initialization.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The raster the iteration runs against, if loaded.
    pub fn raster(&self) -> Option<&Arc<Raster>> {
        self.raster.as_ref()
    }

    /// Index of the current buffer, if running.
    pub fn active_index(&self) -> Option<usize> {
        self.buffers.as_ref().map(PingPong::active_index)
    }

    /// Install `raster`, seed buffer 0 for `rule` and rewind the active bit.
    ///
    /// Buffers are reused when the dimensions match and reallocated otherwise.
    #[tracing::instrument(skip_all, fields(rule = rule.label(), width = raster.width(), height = raster.height()))]
    pub fn initialize(&mut self, raster: Arc<Raster>, rule: &StepRule) {
        let canvas = raster.canvas();
        let mut buffers = match self.buffers.take() {
            Some(pp) if pp.canvas() == canvas => pp,
            previous => {
                if let Some(pp) = previous {
                    let old = pp.canvas();
                    tracing::info!(
                        old_width = old.width,
                        old_height = old.height,
                        "field buffers reallocated"
                    );
                }
                PingPong::new(canvas)
            }
        };
        buffers.reset(|x, y| rule.seed(&raster, x, y));

        self.buffers = Some(buffers);
        self.raster = Some(raster);
        self.ticks = 0;
        tracing::debug!("field iterator seeded");
    }

    /// Advance by exactly one step: `next = rule(current, raster)`, then swap.
    ///
    /// Returns the number of ticks completed since initialization.
    #[tracing::instrument(level = "trace", skip_all, fields(rule = rule.label(), tick = self.ticks))]
    pub fn tick(&mut self, rule: &StepRule, backend: &dyn ComputeBackend) -> FlowResult<u64> {
        let (Some(raster), Some(buffers)) = (self.raster.as_deref(), self.buffers.as_mut()) else {
            return Err(FlowError::config("tick called before a raster was loaded"));
        };

        let canvas = buffers.canvas();
        {
            let (current, next) = buffers.split();
            backend.dispatch(canvas, next.texels_mut(), &|x: u32, y: u32| {
                rule.apply(current, raster, x, y)
            })?;
        }
        buffers.swap();
        self.ticks += 1;
        tracing::trace!(active = buffers.active_index(), "tick complete");
        Ok(self.ticks)
    }

    /// Run `ticks` steps back to back.
    pub fn run(
        &mut self,
        ticks: u64,
        rule: &StepRule,
        backend: &dyn ComputeBackend,
    ) -> FlowResult<u64> {
        for _ in 0..ticks {
            self.tick(rule, backend)?;
        }
        Ok(self.ticks)
    }

    /// Last fully written buffer.
    pub fn current(&self) -> FlowResult<&FieldBuffer> {
        self.buffers
            .as_ref()
            .map(PingPong::current)
            .ok_or_else(|| FlowError::config("field iterator is not initialized"))
    }

    /// The other buffer: the previous generation once at least one tick ran.
    pub fn previous(&self) -> FlowResult<&FieldBuffer> {
        self.buffers
            .as_ref()
            .map(PingPong::previous)
            .ok_or_else(|| FlowError::config("field iterator is not initialized"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/iterator.rs"]
mod tests;
