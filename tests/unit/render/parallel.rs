use super::*;
use crate::render::backend::create_backend;

fn kernel(x: u32, y: u32) -> Texel {
    [x as f32, y as f32, (x * y) as f32, 1.0]
}

#[test]
fn parallel_matches_cpu_dispatch() {
    let canvas = Canvas::new(13, 9).unwrap();
    let cpu = create_backend(BackendKind::Cpu, &BackendSettings::default()).unwrap();
    let par = create_backend(
        BackendKind::Parallel,
        &BackendSettings { threads: Some(3) },
    )
    .unwrap();
    assert_eq!(cpu.kind(), BackendKind::Cpu);
    assert_eq!(par.kind(), BackendKind::Parallel);

    let mut a = vec![[0.0; 4]; canvas.pixel_count()];
    let mut b = vec![[0.0; 4]; canvas.pixel_count()];
    cpu.dispatch(canvas, &mut a, &kernel).unwrap();
    par.dispatch(canvas, &mut b, &kernel).unwrap();
    assert_eq!(a, b);
    assert_eq!(a[2 * 13 + 5], [5.0, 2.0, 10.0, 1.0]);
}

#[test]
fn zero_threads_is_rejected() {
    let err = ParallelBackend::new(&BackendSettings { threads: Some(0) }).unwrap_err();
    assert!(err.to_string().contains("threads"));
}

#[test]
fn explicit_thread_count_is_honored() {
    let par = ParallelBackend::new(&BackendSettings { threads: Some(2) }).unwrap();
    assert_eq!(par.threads(), 2);
}

#[test]
fn mismatched_target_is_a_validation_error() {
    let canvas = Canvas::new(4, 4).unwrap();
    let par = ParallelBackend::new(&BackendSettings { threads: Some(1) }).unwrap();
    let mut short = vec![[0.0; 4]; 15];
    assert!(matches!(
        par.dispatch(canvas, &mut short, &kernel),
        Err(FlowError::Validation(_))
    ));
}
