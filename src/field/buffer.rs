use crate::foundation::core::{Canvas, Texel};
use crate::foundation::math::clamp_index;

/// One 2-D state array used by the ping-pong iteration.
///
/// Same dimensions as the raster it is iterated against. Cells are plain texels; the meaning of
/// the channels depends on the step rule (coordinates for mean-shift, colors for smoothing).
#[derive(Clone, Debug, PartialEq)]
pub struct FieldBuffer {
    canvas: Canvas,
    texels: Vec<Texel>,
}

impl FieldBuffer {
    /// Allocate a zero-filled buffer.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            texels: vec![[0.0; 4]; canvas.pixel_count()],
        }
    }

    /// Allocate a buffer and fill it from `f(x, y)` in row-major order.
    pub fn from_fn(canvas: Canvas, f: impl FnMut(u32, u32) -> Texel) -> Self {
        let mut buf = Self::new(canvas);
        buf.fill_with(f);
        buf
    }

    /// Buffer dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Row-major cells.
    pub fn texels(&self) -> &[Texel] {
        &self.texels
    }

    pub(crate) fn texels_mut(&mut self) -> &mut [Texel] {
        &mut self.texels
    }

    /// Cell at `(x, y)`.
    ///
    /// # Panics
    /// Panics if `(x, y)` lies outside the buffer.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Texel {
        assert!(
            x < self.canvas.width && y < self.canvas.height,
            "cell ({x}, {y}) outside {}x{} buffer",
            self.canvas.width,
            self.canvas.height
        );
        self.texels[y as usize * self.canvas.width as usize + x as usize]
    }

    /// Cell at signed coordinates, clamped to the edges.
    #[inline]
    pub fn sample_clamped(&self, x: i64, y: i64) -> Texel {
        let xi = clamp_index(x, self.canvas.width) as usize;
        let yi = clamp_index(y, self.canvas.height) as usize;
        self.texels[yi * self.canvas.width as usize + xi]
    }

    /// Overwrite every cell with `f(x, y)`.
    pub fn fill_with(&mut self, mut f: impl FnMut(u32, u32) -> Texel) {
        let w = self.canvas.width as usize;
        for (i, cell) in self.texels.iter_mut().enumerate() {
            *cell = f((i % w) as u32, (i / w) as u32);
        }
    }
}

/// Two interchangeable buffers plus the bit saying which one is current.
///
/// `current` is the last fully written buffer; the other one is the write target of the next
/// step. The pair never hands out the same buffer for both roles.
#[derive(Clone, Debug)]
pub struct PingPong {
    buffers: [FieldBuffer; 2],
    active: usize,
}

impl PingPong {
    /// Allocate both buffers zero-filled; buffer 0 is current.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            buffers: [FieldBuffer::new(canvas), FieldBuffer::new(canvas)],
            active: 0,
        }
    }

    /// Dimensions shared by both buffers.
    pub fn canvas(&self) -> Canvas {
        self.buffers[0].canvas()
    }

    /// Index (0 or 1) of the current buffer.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The last fully written buffer.
    pub fn current(&self) -> &FieldBuffer {
        &self.buffers[self.active]
    }

    /// The buffer that is not current (one generation older after a swap).
    pub fn previous(&self) -> &FieldBuffer {
        &self.buffers[1 - self.active]
    }

    /// Borrow `(current, next)`: one read-only, one exclusive.
    pub fn split(&mut self) -> (&FieldBuffer, &mut FieldBuffer) {
        let [b0, b1] = &mut self.buffers;
        if self.active == 0 {
            (&*b0, b1)
        } else {
            (&*b1, b0)
        }
    }

    /// Flip roles: `next` becomes `current`.
    pub fn swap(&mut self) {
        self.active = 1 - self.active;
    }

    /// Seed buffer 0 from `seed(x, y)` and make it current.
    pub fn reset(&mut self, seed: impl FnMut(u32, u32) -> Texel) {
        self.buffers[0].fill_with(seed);
        self.active = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/buffer.rs"]
mod tests;
