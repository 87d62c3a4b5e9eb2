use crate::encode::color::{angle_degrees, hls_to_rgb};
use crate::field::buffer::FieldBuffer;
use crate::foundation::core::{Canvas, Texel};
use crate::foundation::error::FlowResult;
use crate::kernel::clamp_bandwidth;
use crate::render::backend::ComputeBackend;

/// Default multiplier turning small normalized displacements into visible brightness.
pub const DEFAULT_BRIGHTNESS_SCALE: f32 = 200.0;

/// An encoded, displayable frame: RGBA `f32`, row-major, not clamped.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA texels, tightly packed, row-major.
    pub texels: Vec<Texel>,
}

impl Frame {
    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Texel at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Texel {
        self.texels[y as usize * self.width as usize + x as usize]
    }

    /// Quantize to straight-alpha RGBA8 (clamp to `[0, 1]`, round).
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.texels
            .iter()
            .flat_map(|t| t.map(unit_to_u8))
            .collect()
    }
}

fn unit_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// How a field buffer becomes a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Encoding {
    /// Mean-shift displacement: hue from direction, brightness from length.
    FlowHue {
        /// Window half-width the field was computed with.
        bandwidth: f32,
        /// Brightness multiplier.
        brightness: f32,
    },
    /// Copy the cells unchanged.
    Direct,
}

/// Color of one mean-shift cell.
///
/// The displacement is `r - (x / width, y / height)`; its angle picks the hue and
/// `brightness * |d| / bandwidth` scales the color.
pub fn flow_color(
    canvas: Canvas,
    cell: Texel,
    x: u32,
    y: u32,
    bandwidth: f32,
    brightness: f32,
) -> Texel {
    let (ox, oy) = canvas.normalized(x, y);
    let (dx, dy) = (cell[0] - ox, cell[1] - oy);
    let hue = angle_degrees(dx, dy);
    let gain = brightness * dx.hypot(dy) / clamp_bandwidth(bandwidth);
    let [r, g, b] = hls_to_rgb(hue, 1.0, 1.0);
    [r * gain, g * gain, b * gain, 1.0]
}

/// Encode a whole buffer through `backend`.
pub fn encode_field(
    field: &FieldBuffer,
    encoding: Encoding,
    backend: &dyn ComputeBackend,
) -> FlowResult<Frame> {
    let canvas = field.canvas();
    let mut texels = vec![[0.0; 4]; canvas.pixel_count()];
    match encoding {
        Encoding::Direct => texels.copy_from_slice(field.texels()),
        Encoding::FlowHue {
            bandwidth,
            brightness,
        } => {
            backend.dispatch(canvas, &mut texels, &|x: u32, y: u32| {
                flow_color(canvas, field.get(x, y), x, y, bandwidth, brightness)
            })?;
        }
    }
    Ok(Frame {
        width: canvas.width,
        height: canvas.height,
        texels,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/frame.rs"]
mod tests;
