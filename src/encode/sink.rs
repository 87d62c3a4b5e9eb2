use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::frame::Frame;
use crate::foundation::error::{FlowError, FlowResult};

/// Configuration provided to a [`FrameSink`] at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Step rule label (`mean_shift`, `diffusion`, `gaussian_blur`).
    pub rule: &'static str,
}

/// Sink contract for consuming encoded frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing tick numbers.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> FlowResult<()>;
    /// Push the frame shown after `tick` ticks.
    fn push_frame(&mut self, tick: u64, frame: &Frame) -> FlowResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> FlowResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, Frame)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames, tagged with their tick.
    pub fn frames(&self) -> &[(u64, Frame)] {
        &self.frames
    }

    /// Whether `end` was called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> FlowResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, tick: u64, frame: &Frame) -> FlowResult<()> {
        self.frames.push((tick, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> FlowResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes every pushed frame as `frame_{tick:05}.png` into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Create a sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> FlowResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frame directory '{}'", self.dir.display()))?;
        self.written.clear();
        tracing::debug!(dir = %self.dir.display(), rule = cfg.rule, "png sequence sink ready");
        Ok(())
    }

    fn push_frame(&mut self, tick: u64, frame: &Frame) -> FlowResult<()> {
        let path = self.dir.join(format!("frame_{tick:05}.png"));
        save_frame_png(frame, &path)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> FlowResult<()> {
        tracing::info!(frames = self.written.len(), dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}

/// Quantize `frame` to RGBA8 and write it as a PNG.
pub fn save_frame_png(frame: &Frame, path: &Path) -> FlowResult<()> {
    let rgba = frame.to_rgba8();
    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
        .ok_or_else(|| FlowError::validation("frame buffer does not match its dimensions"))?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
