use std::io::Write;
use std::time::Duration;

use carousel_watch::{ObservationConfig, ObserveError};

#[test]
fn test_defaults() {
    let config = ObservationConfig::default();
    assert_eq!(config.container_selector, ".carousel-container");
    assert_eq!(config.stable_frames, 10);
    assert_eq!(config.velocity_eps, 0.5);
    assert!(config.include_initial);
    assert_eq!(config.max_events, None);
    assert_eq!(config.setup_timeout(), Duration::from_secs(15));
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config: ObservationConfig =
        serde_json::from_str(r#"{ "maxEvents": 4, "stableFrames": 3, "includeInitial": false }"#).unwrap();
    assert_eq!(config.max_events, Some(4));
    assert_eq!(config.stable_frames, 3);
    assert!(!config.include_initial);
    assert_eq!(config.velocity_eps, 0.5);
    assert_eq!(config.container_selector, ".carousel-container");
}

#[test]
fn test_validation_rejects_bad_values() {
    let bad = [
        ObservationConfig::default().with_stable_frames(0),
        ObservationConfig::default().with_velocity_eps(-0.1),
        ObservationConfig::default().with_velocity_eps(f64::NAN),
        ObservationConfig::default().with_max_events(Some(0)),
        ObservationConfig::default().with_container_selector(""),
        ObservationConfig::default().with_frame_interval(Duration::ZERO),
    ];
    for config in bad {
        assert!(
            matches!(config.validate(), Err(ObserveError::InvalidConfig(_))),
            "should reject {:?}",
            config
        );
    }
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r##"{{ "containerSelector": "#hero", "velocityEps": 1.5 }}"##).unwrap();

    let config = ObservationConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.container_selector, "#hero");
    assert_eq!(config.velocity_eps, 1.5);
}

#[test]
fn test_load_errors_are_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    assert!(matches!(
        ObservationConfig::from_json_file(file.path()),
        Err(ObserveError::Config { .. })
    ));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "stableFrames": 0 }}"#).unwrap();
    assert!(matches!(
        ObservationConfig::from_json_file(file.path()),
        Err(ObserveError::InvalidConfig(_))
    ));
}
