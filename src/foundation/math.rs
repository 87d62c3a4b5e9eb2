use crate::foundation::core::Texel;

/// Clamp a signed texel coordinate into `[0, n - 1]`.
#[inline]
pub(crate) fn clamp_index(i: i64, n: u32) -> u32 {
    let max = i64::from(n.saturating_sub(1));
    i.clamp(0, max) as u32
}

/// Texel index addressed by normalized coordinate `u` along an axis of `n` texels.
///
/// Texel `i` is centered at `i / n`; non-finite input lands on texel 0.
#[inline]
pub(crate) fn texel_index(u: f32, n: u32) -> u32 {
    let scaled = (u * n as f32).round();
    if !scaled.is_finite() {
        return 0;
    }
    clamp_index(scaled as i64, n)
}

/// Neighbouring texels around continuous texel coordinate `t` and the blend weight of the
/// upper one.
///
/// Texel `i` is centered at `t = i`; both indices clamp to `[0, n - 1]` and non-finite input
/// lands on texel 0.
#[inline]
pub(crate) fn texel_span(t: f32, n: u32) -> (u32, u32, f32) {
    if !t.is_finite() {
        return (0, 0, 0.0);
    }
    let lo = t.floor();
    let i = lo as i64;
    (clamp_index(i, n), clamp_index(i.saturating_add(1), n), t - lo)
}

/// Euclidean distance between the RGB parts of two texels (alpha ignored).
#[inline]
pub(crate) fn rgb_distance(a: Texel, b: Texel) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    (dr * dr + dg * dg + db * db).sqrt()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
