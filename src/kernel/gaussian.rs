/// Gaussian weight for an offset `(dx, dy)` in pixels.
///
/// The variance term is floored at 1, so `sigma < 1` still yields a smooth kernel instead of
/// an all-or-nothing spike.
#[inline]
pub fn gaussian_weight(dx: f32, dy: f32, sigma: f32) -> f32 {
    let denom = 2.0 * (sigma * sigma).max(1.0);
    (-(dx * dx + dy * dy) / denom).exp()
}

/// Half-width of the sampled window: three standard deviations.
#[inline]
pub fn gaussian_radius(sigma: f32) -> f32 {
    3.0 * sigma.max(0.0)
}

/// Number of taps along one axis, `2 * 3σ + 1` for integral `σ`.
pub fn gaussian_kernel_size(sigma: f32) -> u32 {
    (2.0 * gaussian_radius(sigma)).floor() as u32 + 1
}
