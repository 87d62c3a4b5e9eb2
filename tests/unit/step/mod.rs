use super::*;
use crate::foundation::core::Canvas;

fn checker(w: u32, h: u32) -> Raster {
    let canvas = Canvas::new(w, h).unwrap();
    let texels = (0..h)
        .flat_map(|y| {
            (0..w).map(move |x| {
                if (x / 2 + y / 2) % 2 == 0 {
                    [1.0, 0.0, 0.0, 1.0]
                } else {
                    [0.0, 0.0, 1.0, 1.0]
                }
            })
        })
        .collect();
    Raster::from_texels(canvas, texels).unwrap()
}

#[test]
fn labels_are_stable() {
    assert_eq!(StepRule::MeanShift(MeanShiftParams::default()).label(), "mean_shift");
    assert_eq!(
        StepRule::Diffusion {
            seed: SmoothingSeed::Source
        }
        .label(),
        "diffusion"
    );
    assert_eq!(StepRule::GaussianBlur { sigma: 1.0 }.label(), "gaussian_blur");
}

#[test]
fn seeds_follow_the_rule() {
    let raster = checker(4, 4);
    let ms = StepRule::MeanShift(MeanShiftParams::default());
    assert_eq!(ms.seed(&raster, 2, 1), [0.5, 0.25, 0.0, 1.0]);
    let diff = StepRule::Diffusion {
        seed: SmoothingSeed::Source,
    };
    assert_eq!(diff.seed(&raster, 2, 1), raster.sample_clamped(2, 1));
    let blur = StepRule::GaussianBlur { sigma: 1.0 };
    assert_eq!(blur.seed(&raster, 2, 1), [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn step_reference_matches_per_cell_apply() {
    let raster = checker(6, 5);
    let rule = StepRule::MeanShift(MeanShiftParams {
        bandwidth: 2.0,
        ..MeanShiftParams::default()
    });
    let seed = FieldBuffer::from_fn(raster.canvas(), |x, y| rule.seed(&raster, x, y));
    let next = rule.step_reference(&seed, &raster);
    for y in 0..5 {
        for x in 0..6 {
            assert_eq!(next.get(x, y), rule.apply(&seed, &raster, x, y));
        }
    }
}

#[test]
fn gaussian_blur_ignores_current_buffer() {
    let raster = checker(5, 5);
    let rule = StepRule::GaussianBlur { sigma: 1.0 };
    let a = FieldBuffer::new(raster.canvas());
    let b = FieldBuffer::from_fn(raster.canvas(), |_, _| [9.0; 4]);
    assert_eq!(rule.step_reference(&a, &raster), rule.step_reference(&b, &raster));
}
