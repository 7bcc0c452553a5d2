//! Config loading tests

use std::io::Write;

use gravitris::core::{ConfigError, GameConfig};
use serde_json::json;

#[test]
fn test_config_file_overrides_only_given_keys() {
    let path = std::env::temp_dir().join(format!("gravitris-config-{}.json", std::process::id()));
    let body = json!({
        "width": 12,
        "gravity_period_ms": 5000,
        "scoring": { "placement_points": 10 }
    });
    std::fs::File::create(&path)
        .unwrap()
        .write_all(body.to_string().as_bytes())
        .unwrap();

    let config = GameConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.width, 12);
    assert_eq!(config.height, 20);
    assert_eq!(config.gravity_period_ms, 5000);
    assert_eq!(config.scoring.placement_points, 10);
    assert_eq!(config.scoring.row_points, 100);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = GameConfig::load("/definitely/not/here/gravitris.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("gravitris.json"));
}

#[test]
fn test_config_serializes_every_field() {
    let value = serde_json::to_value(GameConfig::default()).unwrap();
    for key in [
        "width",
        "height",
        "gravity_period_ms",
        "rotation_duration_ms",
        "fall_interval_ms",
        "seed",
        "scoring",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    let back: GameConfig = serde_json::from_value(value).unwrap();
    assert_eq!(back, GameConfig::default());
}
