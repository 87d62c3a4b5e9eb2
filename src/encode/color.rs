/// Hexagonal hue/lightness/saturation to RGB.
///
/// `h` is in degrees `[0, 360)`. Channels span `[l - s/2, l + s/2]`, so with `l = s = 1` the
/// output lies in `[0.5, 1.5]` before any scaling.
pub fn hls_to_rgb(h: f32, l: f32, s: f32) -> [f32; 3] {
    let max = l + s * 0.5;
    let min = l - s * 0.5;
    let span = max - min;
    if h < 60.0 {
        [max, min + span * h / 60.0, min]
    } else if h < 120.0 {
        [min + span * (120.0 - h) / 60.0, max, min]
    } else if h < 180.0 {
        [min, max, min + span * (h - 120.0) / 60.0]
    } else if h < 240.0 {
        [min, min + span * (240.0 - h) / 60.0, max]
    } else if h < 300.0 {
        [min + span * (h - 240.0) / 60.0, min, max]
    } else {
        [max, min, min + span * (360.0 - h) / 60.0]
    }
}

/// Polar angle of `(dx, dy)` in degrees, mapped to `[0, 360)`.
///
/// `atan2(0, 0)` is 0, so the zero vector gets hue 0 rather than an error.
pub fn angle_degrees(dx: f32, dy: f32) -> f32 {
    let turns = dy.atan2(dx) / std::f32::consts::PI;
    let deg = if turns >= 0.0 {
        turns * 180.0
    } else {
        (turns + 2.0) * 180.0
    };
    // -0.0 and rounding at the seam
    if deg >= 360.0 { 0.0 } else { deg.max(0.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/color.rs"]
mod tests;
