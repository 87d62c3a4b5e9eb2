use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = FlowConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, FlowConfig::default());
    assert_eq!(cfg.mode, FlowMode::MeanShift);
    assert_eq!(cfg.canvas, Canvas::new(800, 800).unwrap());
    assert_eq!(cfg.bandwidth, 25.0);
    assert_eq!(cfg.similarity_threshold, 0.1);
    assert_eq!(cfg.step_damping, 0.1);
    assert_eq!(cfg.brightness_scale, 200.0);
    assert_eq!(cfg.backend, BackendKind::Cpu);
    cfg.validate().unwrap();
}

#[test]
fn parses_snake_case_enums() {
    let cfg = FlowConfig::from_json_str(
        r#"{
            "mode": "diffusion",
            "canvas": {"width": 64, "height": 32},
            "smoothing_seed": "neutral",
            "backend": "parallel",
            "threads": 2
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.mode, FlowMode::Diffusion);
    assert_eq!(cfg.canvas, Canvas::new(64, 32).unwrap());
    assert_eq!(
        cfg.rule(),
        StepRule::Diffusion {
            seed: SmoothingSeed::Neutral
        }
    );
    assert_eq!(cfg.encoding(), Encoding::Direct);
    assert_eq!(cfg.backend_settings().threads, Some(2));
}

#[test]
fn unknown_fields_are_serde_errors() {
    let err = FlowConfig::from_json_str(r#"{"bandwith": 3}"#).unwrap_err();
    assert!(matches!(err, FlowError::Serde(_)));
}

#[test]
fn missing_file_is_config_error() {
    let err = FlowConfig::from_path("/definitely/not/here/modeflow.json").unwrap_err();
    assert!(matches!(err, FlowError::Config(_)));
}

#[test]
fn json_round_trips() {
    let cfg = FlowConfig {
        mode: FlowMode::GaussianBlur,
        bandwidth: 2.5,
        ..FlowConfig::default()
    };
    let back = FlowConfig::from_json_str(&cfg.to_json_string().unwrap()).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn validate_rejects_unusable_values() {
    let zero = FlowConfig {
        canvas: Canvas {
            width: 0,
            height: 4,
        },
        ..FlowConfig::default()
    };
    assert!(zero.validate().is_err());

    let nan = FlowConfig {
        similarity_threshold: f32::NAN,
        ..FlowConfig::default()
    };
    assert!(nan.validate().is_err());

    let threads = FlowConfig {
        threads: Some(0),
        ..FlowConfig::default()
    };
    assert!(threads.validate().is_err());

    // clamped at use, not rejected
    let bw = FlowConfig {
        bandwidth: -3.0,
        ..FlowConfig::default()
    };
    bw.validate().unwrap();
}

#[test]
fn mean_shift_rule_and_encoding_follow_config() {
    let cfg = FlowConfig {
        bandwidth: 7.0,
        similarity_threshold: 0.2,
        step_damping: 0.5,
        brightness_scale: 10.0,
        ..FlowConfig::default()
    };
    assert_eq!(
        cfg.rule(),
        StepRule::MeanShift(MeanShiftParams {
            bandwidth: 7.0,
            similarity_threshold: 0.2,
            step_damping: 0.5,
        })
    );
    assert_eq!(
        cfg.encoding(),
        Encoding::FlowHue {
            bandwidth: 7.0,
            brightness: 10.0
        }
    );
}
