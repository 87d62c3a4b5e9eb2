use crate::foundation::core::{Canvas, Texel};
use crate::foundation::error::{FlowError, FlowResult};

/// Per-cell body of a full-frame dispatch: `kernel(x, y)` returns the new value of cell
/// `(x, y)`.
///
/// Kernels only read shared, immutable state, so a backend may evaluate cells in any order
/// and on any thread.
pub type CellKernel<'a> = dyn Fn(u32, u32) -> Texel + Sync + 'a;

/// Executor for full-frame, pixel-independent passes.
///
/// Most users do not call [`ComputeBackend::dispatch`] directly; the
/// [`FieldIterator`](crate::FieldIterator) and the encoder route their passes through it.
pub trait ComputeBackend: Send + Sync {
    /// Which implementation this is.
    fn kind(&self) -> BackendKind;

    /// Fill every cell of `out` (row-major, `canvas` sized) with `kernel(x, y)`.
    ///
    /// Returns only once every cell has been written.
    fn dispatch(&self, canvas: Canvas, out: &mut [Texel], kernel: &CellKernel<'_>)
    -> FlowResult<()>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Sequential row-major loop on the calling thread.
    #[default]
    Cpu,
    /// Rows evaluated on a dedicated rayon thread pool.
    Parallel,
}

/// Backend-agnostic settings.
#[derive(Clone, Debug, Default)]
pub struct BackendSettings {
    /// Worker thread count for [`BackendKind::Parallel`]; `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Create a compute backend implementation.
pub fn create_backend(
    kind: BackendKind,
    settings: &BackendSettings,
) -> FlowResult<Box<dyn ComputeBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new())),
        BackendKind::Parallel => Ok(Box::new(crate::render::parallel::ParallelBackend::new(
            settings,
        )?)),
    }
}

pub(crate) fn check_dispatch_target(canvas: Canvas, out: &[Texel]) -> FlowResult<()> {
    canvas.validate()?;
    if out.len() != canvas.pixel_count() {
        return Err(FlowError::validation(format!(
            "dispatch target holds {} cells, canvas {}x{} needs {}",
            out.len(),
            canvas.width,
            canvas.height,
            canvas.pixel_count()
        )));
    }
    Ok(())
}
