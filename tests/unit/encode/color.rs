use super::*;

fn close(a: [f32; 3], b: [f32; 3]) -> bool {
    a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-4)
}

#[test]
fn primary_hues_at_full_lightness_and_saturation() {
    assert!(close(hls_to_rgb(0.0, 1.0, 1.0), [1.5, 0.5, 0.5]));
    assert!(close(hls_to_rgb(120.0, 1.0, 1.0), [0.5, 1.5, 0.5]));
    assert!(close(hls_to_rgb(240.0, 1.0, 1.0), [0.5, 0.5, 1.5]));
}

#[test]
fn sectors_are_continuous() {
    for edge in [60.0f32, 120.0, 180.0, 240.0, 300.0] {
        let below = hls_to_rgb(edge - 1e-3, 0.5, 1.0);
        let at = hls_to_rgb(edge, 0.5, 1.0);
        assert!(close(below, at), "discontinuity at {edge}");
    }
    assert!(close(hls_to_rgb(359.999, 0.5, 1.0), hls_to_rgb(0.0, 0.5, 1.0)));
}

#[test]
fn angle_degrees_covers_all_quadrants() {
    assert_eq!(angle_degrees(1.0, 0.0), 0.0);
    assert!((angle_degrees(0.0, 1.0) - 90.0).abs() < 1e-4);
    assert!((angle_degrees(-1.0, 0.0) - 180.0).abs() < 1e-4);
    assert!((angle_degrees(0.0, -1.0) - 270.0).abs() < 1e-4);
    assert!((angle_degrees(1.0, -1.0) - 315.0).abs() < 1e-4);
}

#[test]
fn zero_vector_has_a_defined_angle() {
    assert_eq!(angle_degrees(0.0, 0.0), 0.0);
    let a = angle_degrees(-0.0, -0.0);
    assert!((0.0..360.0).contains(&a));
}
