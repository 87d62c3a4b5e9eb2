//! modeflow computes per-pixel mean-shift flow fields and iterative smoothing over an image.
//!
//! Every mode shares one engine: a pair of ping-pong field buffers advanced by a pure per-cell
//! step rule against a fixed reference raster, dispatched over all cells by a compute backend.
//! The public API is session-oriented:
//!
//! - Build a [`FlowConfig`] (or load one from JSON)
//! - Create a [`FlowSession`] and load a [`Raster`]
//! - Call [`FlowSession::tick`] from a host loop, or stream a run into a [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame encoding and sinks.
pub mod encode;
pub(crate) mod field;
/// Image loading and demo rasters.
pub mod host;
pub mod kernel;
/// Compute backends.
pub mod render;
/// Session-oriented API.
pub mod session;
pub(crate) mod step;

pub use crate::foundation::core::{Canvas, OPAQUE_BLACK, Raster, Texel};
pub use crate::foundation::error::{FlowError, FlowResult};

pub use crate::encode::frame::{DEFAULT_BRIGHTNESS_SCALE, Encoding, Frame, encode_field};
pub use crate::encode::sink::{
    FrameSink, InMemorySink, PngSequenceSink, SinkConfig, save_frame_png,
};
pub use crate::field::buffer::{FieldBuffer, PingPong};
pub use crate::field::iterator::{FieldIterator, IterState};
pub use crate::host::{diffusion_demo_raster, load_raster_from_path, raster_from_image};
pub use crate::kernel::{MIN_BANDWIDTH, clamp_bandwidth, gaussian_kernel_size};
pub use crate::render::backend::{
    BackendKind, BackendSettings, CellKernel, ComputeBackend, create_backend,
};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::parallel::ParallelBackend;
pub use crate::session::config::{FlowConfig, FlowMode};
pub use crate::session::flow_session::{FlowSession, RunStats};
pub use crate::step::{
    DEFAULT_KERNEL_SIZE, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_STEP_DAMPING, MeanShiftParams,
    SmoothingSeed, StepRule, mean_shift_cell, mean_shift_seed,
};
