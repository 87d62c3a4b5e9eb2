use crate::foundation::core::{Canvas, Texel};
use crate::foundation::error::FlowResult;
use crate::render::backend::{BackendKind, CellKernel, ComputeBackend, check_dispatch_target};

/// Single-threaded reference backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuBackend;

impl CpuBackend {
    /// Create the sequential backend.
    pub fn new() -> Self {
        Self
    }
}

impl ComputeBackend for CpuBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Cpu
    }

    fn dispatch(
        &self,
        canvas: Canvas,
        out: &mut [Texel],
        kernel: &CellKernel<'_>,
    ) -> FlowResult<()> {
        check_dispatch_target(canvas, out)?;
        let w = canvas.width as usize;
        for (y, row) in out.chunks_exact_mut(w).enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = kernel(x as u32, y as u32);
            }
        }
        Ok(())
    }
}
