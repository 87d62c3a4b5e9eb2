use super::*;

const RED: Texel = [1.0, 0.0, 0.0, 1.0];
const GREEN: Texel = [0.0, 1.0, 0.0, 1.0];

fn raster_with(w: u32, h: u32, base: Texel, odd: &[(u32, u32, Texel)]) -> Raster {
    let canvas = Canvas::new(w, h).unwrap();
    let mut texels = vec![base; canvas.pixel_count()];
    for &(x, y, c) in odd {
        texels[(y * w + x) as usize] = c;
    }
    Raster::from_texels(canvas, texels).unwrap()
}

fn seeded(canvas: Canvas) -> FieldBuffer {
    FieldBuffer::from_fn(canvas, |x, y| mean_shift_seed(canvas, x, y))
}

fn params(bandwidth: f32) -> MeanShiftParams {
    MeanShiftParams {
        bandwidth,
        ..MeanShiftParams::default()
    }
}

#[test]
fn defaults_match_documented_constants() {
    let p = MeanShiftParams::default();
    assert_eq!(p.bandwidth, 25.0);
    assert_eq!(p.similarity_threshold, 0.1);
    assert_eq!(p.step_damping, 0.1);
}

#[test]
fn seed_is_identity_map() {
    let canvas = Canvas::new(4, 2).unwrap();
    assert_eq!(mean_shift_seed(canvas, 0, 0), [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(mean_shift_seed(canvas, 3, 1), [0.75, 0.5, 0.0, 1.0]);
}

#[test]
fn constant_raster_cells_stay_put() {
    let raster = raster_with(9, 7, RED, &[]);
    let cur = seeded(raster.canvas());
    for bw in [1.0, 2.0, 3.0] {
        for y in 0..7 {
            for x in 0..9 {
                let next = mean_shift_cell(&cur, &raster, &params(bw), x, y);
                let seed = cur.get(x, y);
                assert!((next[0] - seed[0]).abs() < 1e-6, "x drift at ({x},{y}) bw={bw}");
                assert!((next[1] - seed[1]).abs() < 1e-6, "y drift at ({x},{y}) bw={bw}");
                assert_eq!(&next[2..], &[0.0, 1.0]);
            }
        }
    }
}

#[test]
fn corner_cell_with_wide_window_clamps_samples() {
    let raster = raster_with(6, 6, RED, &[(5, 5, GREEN)]);
    let cur = seeded(raster.canvas());
    let next = mean_shift_cell(&cur, &raster, &params(5.0), 0, 0);
    assert!(next.iter().all(|c| c.is_finite()));
    // The green corner is the only non-matching sample; the estimate moves away from it.
    assert!(next[0] <= 0.0 && next[1] <= 0.0);
}

#[test]
fn isolated_pixel_does_not_move() {
    let raster = raster_with(5, 5, RED, &[(2, 2, GREEN)]);
    let cur = seeded(raster.canvas());
    let next = mean_shift_cell(&cur, &raster, &params(1.0), 2, 2);
    assert_eq!(next, cur.get(2, 2));
}

#[test]
fn neighbour_of_foreign_pixel_moves_away_from_it() {
    let raster = raster_with(4, 4, RED, &[(2, 2, GREEN)]);
    let cur = seeded(raster.canvas());
    let seed = cur.get(1, 1);
    let next = mean_shift_cell(&cur, &raster, &params(1.0), 1, 1);
    assert!(next[0] < seed[0]);
    assert!(next[1] < seed[1]);
    // one missing diagonal tap out of nine, damped by 0.1
    let tap = 0.25 * (1.0 - (2.0f32 * 0.25 * 0.25).sqrt());
    assert!((seed[0] - next[0] - 0.1 * tap / 8.0).abs() < 1e-6);
}

#[test]
fn threshold_and_damping_are_configurable() {
    let raster = raster_with(4, 4, RED, &[(2, 2, GREEN)]);
    let cur = seeded(raster.canvas());

    // A threshold above the red/green distance makes every tap match again.
    let loose = MeanShiftParams {
        bandwidth: 1.0,
        similarity_threshold: 2.0,
        step_damping: 0.1,
    };
    let next = mean_shift_cell(&cur, &raster, &loose, 1, 1);
    assert!((next[0] - cur.get(1, 1)[0]).abs() < 1e-6);

    let frozen = MeanShiftParams {
        bandwidth: 1.0,
        similarity_threshold: 0.1,
        step_damping: 0.0,
    };
    assert_eq!(mean_shift_cell(&cur, &raster, &frozen, 1, 1), cur.get(1, 1));
}

#[test]
fn non_positive_bandwidth_degenerates_to_tiny_window() {
    let raster = raster_with(4, 4, RED, &[(2, 2, GREEN)]);
    let cur = seeded(raster.canvas());
    for bw in [0.0, -3.0, f32::NAN] {
        let next = mean_shift_cell(&cur, &raster, &params(bw), 1, 1);
        assert!((next[0] - cur.get(1, 1)[0]).abs() < 1e-4);
        assert!(next.iter().all(|c| c.is_finite()));
    }
}
