use rayon::prelude::*;

use crate::foundation::core::{Canvas, Texel};
use crate::foundation::error::{FlowError, FlowResult};
use crate::render::backend::{
    BackendKind, BackendSettings, CellKernel, ComputeBackend, check_dispatch_target,
};

/// Data-parallel backend: one rayon task per row on a dedicated pool.
///
/// Output rows are disjoint `&mut` chunks, so no synchronization is needed inside a dispatch.
pub struct ParallelBackend {
    pool: rayon::ThreadPool,
}

impl ParallelBackend {
    /// Build the worker pool.
    pub fn new(settings: &BackendSettings) -> FlowResult<Self> {
        Ok(Self {
            pool: build_thread_pool(settings.threads)?,
        })
    }

    /// Number of worker threads in the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl std::fmt::Debug for ParallelBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelBackend")
            .field("threads", &self.threads())
            .finish()
    }
}

impl ComputeBackend for ParallelBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Parallel
    }

    fn dispatch(
        &self,
        canvas: Canvas,
        out: &mut [Texel],
        kernel: &CellKernel<'_>,
    ) -> FlowResult<()> {
        check_dispatch_target(canvas, out)?;
        let w = canvas.width as usize;
        self.pool.install(|| {
            out.par_chunks_exact_mut(w)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, cell) in row.iter_mut().enumerate() {
                        *cell = kernel(x as u32, y as u32);
                    }
                });
        });
        Ok(())
    }
}

fn build_thread_pool(threads: Option<usize>) -> FlowResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FlowError::validation(
            "backend 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FlowError::config(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/parallel.rs"]
mod tests;
