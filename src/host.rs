//! Glue between decoded images on disk and the fixed-size [`Raster`] the engine iterates on.

use std::path::Path;

use anyhow::Context as _;
use image::imageops::FilterType;

use crate::foundation::core::{Canvas, OPAQUE_BLACK, Raster, Texel};
use crate::foundation::error::FlowResult;

const TRANSPARENT: Texel = [0.0, 0.0, 0.0, 0.0];
const DEMO_SQUARE: Texel = [1.0, 1.0, 0.0, 1.0];

/// Fit `img` into `canvas`: aspect ratio preserved, anchored top-left, transparent black
/// elsewhere. Channels are normalized by 255.
pub fn raster_from_image(img: &image::DynamicImage, canvas: Canvas) -> FlowResult<Raster> {
    canvas.validate()?;
    let rgba = img.to_rgba8();
    let (iw, ih) = rgba.dimensions();
    if iw == 0 || ih == 0 {
        return Raster::filled(canvas, TRANSPARENT);
    }

    let scale = f64::min(
        f64::from(canvas.width) / f64::from(iw),
        f64::from(canvas.height) / f64::from(ih),
    );
    let fit_w = fit_extent(scale * f64::from(iw), canvas.width);
    let fit_h = fit_extent(scale * f64::from(ih), canvas.height);
    let fitted = if (fit_w, fit_h) == (iw, ih) {
        rgba
    } else {
        image::imageops::resize(&rgba, fit_w, fit_h, FilterType::Triangle)
    };
    tracing::debug!(
        src_width = iw,
        src_height = ih,
        fit_width = fit_w,
        fit_height = fit_h,
        "image fitted to canvas"
    );

    let mut texels = vec![TRANSPARENT; canvas.pixel_count()];
    for (x, y, px) in fitted.enumerate_pixels() {
        let i = y as usize * canvas.width as usize + x as usize;
        texels[i] = px.0.map(|c| f32::from(c) / 255.0);
    }
    Raster::from_texels(canvas, texels)
}

fn fit_extent(scaled: f64, max: u32) -> u32 {
    (scaled.round() as u32).clamp(1, max)
}

/// Decode the image at `path` and fit it into `canvas`.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_raster_from_path(path: impl AsRef<Path>, canvas: Canvas) -> FlowResult<Raster> {
    let path = path.as_ref();
    let img = image::open(path).with_context(|| format!("decode image '{}'", path.display()))?;
    raster_from_image(&img, canvas)
}

/// Opaque black canvas with a yellow square spanning `[0.5, 0.625)` of each dimension.
pub fn diffusion_demo_raster(canvas: Canvas) -> FlowResult<Raster> {
    canvas.validate()?;
    let span = |n: u32| (n / 2)..((u64::from(n) * 5 / 8) as u32);
    let (xs, ys) = (span(canvas.width), span(canvas.height));
    let texels = (0..canvas.height)
        .flat_map(|y| (0..canvas.width).map(move |x| (x, y)))
        .map(|(x, y)| {
            if xs.contains(&x) && ys.contains(&y) {
                DEMO_SQUARE
            } else {
                OPAQUE_BLACK
            }
        })
        .collect();
    Raster::from_texels(canvas, texels)
}

#[cfg(test)]
#[path = "../tests/unit/host.rs"]
mod tests;
