use crate::foundation::error::{FlowError, FlowResult};
use crate::foundation::math::{clamp_index, texel_index, texel_span};

/// One 4-channel floating-point cell (RGBA for colors, `(x, y, 0, 1)` for coordinates).
pub type Texel = [f32; 4];

/// Opaque black, the neutral texel.
pub const OPAQUE_BLACK: Texel = [0.0, 0.0, 0.0, 1.0];

/// Fixed raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create validated dimensions (both non-zero).
    pub fn new(width: u32, height: u32) -> FlowResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Reject zero-sized canvases.
    pub fn validate(self) -> FlowResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FlowError::validation(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Number of cells in the canvas.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Normalized coordinate of texel `(x, y)`, i.e. `(x / width, y / height)`.
    pub fn normalized(self, x: u32, y: u32) -> (f32, f32) {
        (x as f32 / self.width as f32, y as f32 / self.height as f32)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
        }
    }
}

/// Fixed reference image: `width × height` texels, row-major, channels nominally in `[0, 1]`.
///
/// A raster is never mutated once built. Loading a new image replaces it wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    canvas: Canvas,
    texels: Vec<Texel>,
}

impl Raster {
    /// Create a raster filled with a single color.
    pub fn filled(canvas: Canvas, fill: Texel) -> FlowResult<Self> {
        canvas.validate()?;
        Ok(Self {
            canvas,
            texels: vec![fill; canvas.pixel_count()],
        })
    }

    /// Build a raster from row-major texels.
    pub fn from_texels(canvas: Canvas, texels: Vec<Texel>) -> FlowResult<Self> {
        canvas.validate()?;
        if texels.len() != canvas.pixel_count() {
            return Err(FlowError::validation(format!(
                "raster expects {} texels for {}x{}, got {}",
                canvas.pixel_count(),
                canvas.width,
                canvas.height,
                texels.len()
            )));
        }
        if texels.iter().flatten().any(|c| !c.is_finite()) {
            return Err(FlowError::validation("raster channels must be finite"));
        }
        Ok(Self { canvas, texels })
    }

    /// Build a raster from tightly packed RGBA `f32` channels (`width * height * 4` values).
    pub fn from_rgba_f32(width: u32, height: u32, data: &[f32]) -> FlowResult<Self> {
        let canvas = Canvas::new(width, height)?;
        let expected = canvas
            .pixel_count()
            .checked_mul(4)
            .ok_or_else(|| FlowError::validation("raster buffer size overflow"))?;
        if data.len() != expected {
            return Err(FlowError::validation(format!(
                "rgba data length ({}) must equal width * height * 4 ({expected})",
                data.len()
            )));
        }
        let texels = data
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect();
        Self::from_texels(canvas, texels)
    }

    /// Raster dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Row-major texels.
    pub fn texels(&self) -> &[Texel] {
        &self.texels
    }

    /// Texel at integer coordinates, clamped to the edges.
    #[inline]
    pub fn sample_clamped(&self, x: i64, y: i64) -> Texel {
        let xi = clamp_index(x, self.canvas.width) as usize;
        let yi = clamp_index(y, self.canvas.height) as usize;
        self.texels[yi * self.canvas.width as usize + xi]
    }

    /// Bilinear sample at continuous texel coordinates (texel `i` centered at `i`), edges
    /// clamped.
    ///
    /// Integral coordinates return the texel exactly.
    pub fn sample_bilinear(&self, x: f32, y: f32) -> Texel {
        let (x0, x1, fx) = texel_span(x, self.canvas.width);
        let (y0, y1, fy) = texel_span(y, self.canvas.height);
        let w = self.canvas.width as usize;
        let at = |xi: u32, yi: u32| self.texels[yi as usize * w + xi as usize];
        let top = lerp_texel(at(x0, y0), at(x1, y0), fx);
        let bottom = lerp_texel(at(x0, y1), at(x1, y1), fx);
        lerp_texel(top, bottom, fy)
    }

    /// Nearest texel at normalized coordinates; outside `[0, 1]²` clamps to the edge.
    #[inline]
    pub fn sample_normalized(&self, u: f32, v: f32) -> Texel {
        let xi = texel_index(u, self.canvas.width) as usize;
        let yi = texel_index(v, self.canvas.height) as usize;
        self.texels[yi * self.canvas.width as usize + xi]
    }
}

#[inline]
fn lerp_texel(a: Texel, b: Texel, t: f32) -> Texel {
    std::array::from_fn(|c| a[c] + (b[c] - a[c]) * t)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
