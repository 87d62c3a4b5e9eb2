use super::*;

fn frame(v: f32) -> Frame {
    Frame {
        width: 2,
        height: 2,
        texels: vec![[v, v, v, 1.0]; 4],
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        rule: "diffusion",
    }
}

#[test]
fn in_memory_sink_records_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(1, &frame(0.1)).unwrap();
    sink.push_frame(2, &frame(0.2)).unwrap();
    sink.end().unwrap();

    assert!(sink.is_ended());
    assert_eq!(sink.config(), Some(cfg()));
    let ticks: Vec<u64> = sink.frames().iter().map(|(t, _)| *t).collect();
    assert_eq!(ticks, vec![1, 2]);
}

#[test]
fn begin_clears_previous_run() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(1, &frame(0.1)).unwrap();
    sink.begin(cfg()).unwrap();
    assert!(sink.frames().is_empty());
}

#[test]
fn png_sequence_sink_writes_numbered_files() {
    let dir = std::env::temp_dir().join(format!("modeflow_png_sink_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg()).unwrap();
    sink.push_frame(3, &frame(1.0)).unwrap();
    sink.end().unwrap();

    let path = dir.join("frame_00003.png");
    assert_eq!(sink.written(), &[path.clone()]);
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 2));
    assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn save_rejects_inconsistent_frames() {
    let bad = Frame {
        width: 3,
        height: 3,
        texels: vec![[0.0; 4]; 2],
    };
    let path = std::env::temp_dir().join("modeflow_bad_frame.png");
    assert!(matches!(
        save_frame_png(&bad, &path),
        Err(FlowError::Validation(_))
    ));
}
