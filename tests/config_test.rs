use pinchboard::config::{Config, GestureParams, LayoutParams};
use pinchboard::error::PinchError;
use rstest::rstest;
use std::fs;
use std::time::Duration;

#[test]
fn test_defaults() {
    let c = Config::default();
    assert_eq!(c.gesture.dwell(), Duration::from_millis(800));
    assert_eq!(c.gesture.cooldown(), Duration::from_millis(300));
    assert_eq!(c.gesture.pinch_threshold_px, 50.0);
    assert_eq!(c.layout.margin, 20);
    assert_eq!(c.layout.key_gap, 8);
    assert_eq!(c.layout.max_key_size, 100);
    assert_eq!(c.layout.min_key_size, 50);
    assert!(c.validate().is_ok());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pinch.json");
    fs::write(
        &path,
        r#"{ "gesture": { "dwell_secs": 1.25 }, "layout": { "key_gap": 4 } }"#,
    )
    .unwrap();

    let c = Config::load_from_file(&path).unwrap();
    assert_eq!(c.gesture.dwell(), Duration::from_millis(1250));
    assert_eq!(c.gesture.cooldown_secs, 0.3);
    assert_eq!(c.layout.key_gap, 4);
    assert_eq!(c.layout.margin, 20);
}

#[test]
fn test_file_with_bad_values_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "layout": { "min_key_size": 0 } }"#).unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, PinchError::Config(_)), "got {}", err);
}

#[test]
fn test_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ gesture: ").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(PinchError::Json(_))
    ));
}

#[test]
fn test_round_trips_through_json() {
    let c = Config {
        gesture: GestureParams {
            dwell_secs: 0.5,
            ..Default::default()
        },
        layout: LayoutParams {
            band_ratio: 0.5,
            ..Default::default()
        },
    };
    let back: Config = serde_json::from_str(&serde_json::to_string(&c).unwrap()).unwrap();
    assert_eq!(back, c);
}

fn with_gesture(f: impl FnOnce(&mut GestureParams)) -> Config {
    let mut c = Config::default();
    f(&mut c.gesture);
    c
}

fn with_layout(f: impl FnOnce(&mut LayoutParams)) -> Config {
    let mut c = Config::default();
    f(&mut c.layout);
    c
}

#[rstest]
#[case(with_gesture(|g| g.dwell_secs = -0.1))]
#[case(with_gesture(|g| g.cooldown_secs = f32::NAN))]
#[case(with_gesture(|g| g.pinch_threshold_px = 0.0))]
#[case(with_layout(|l| l.margin = -1))]
#[case(with_layout(|l| l.min_key_size = 1))]
#[case(with_layout(|l| l.max_key_size = 40))]
#[case(with_layout(|l| l.band_ratio = 0.0))]
#[case(with_layout(|l| l.band_ratio = 1.5))]
#[case(with_layout(|l| l.space_share = 0.6))]
fn test_validation_errors(#[case] config: Config) {
    assert!(matches!(config.validate(), Err(PinchError::Config(_))));
}

#[test]
fn test_zero_times_are_allowed() {
    let c = with_gesture(|g| {
        g.dwell_secs = 0.0;
        g.cooldown_secs = 0.0;
    });
    assert!(c.validate().is_ok());
    assert_eq!(c.gesture.dwell(), Duration::ZERO);
}

#[test]
fn test_two_pixel_keys_are_allowed() {
    let c = with_layout(|l| {
        l.min_key_size = 2;
        l.max_key_size = 2;
    });
    assert!(c.validate().is_ok());
}
