//! 설정 파일 파싱/검증 테스트.
use std::fs;
use std::path::PathBuf;

use chem_engineering_toolkit::config::{load_or_default, Config, ConfigError, UnitSystem};
use chem_engineering_toolkit::quantity::{QuantityKind, Unit};
use chem_engineering_toolkit::units::{FlowRateUnit, TemperatureUnit};

fn temp_config_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("chem_toolkit_{}_{name}.toml", std::process::id()))
}

#[test]
fn default_config_round_trips_through_toml() {
    let cfg = Config::default();
    let text = cfg.to_toml_string().expect("serialize");
    assert!(text.contains("unit_system = \"SI\""));
    assert!(text.contains("[history]"));
    assert_eq!(Config::from_toml_str(&text).expect("parse"), cfg);
}

#[test]
fn partial_file_fills_defaults() {
    let cfg = Config::from_toml_str(
        r#"
log_level = "debug"
[display]
precision = 3
"#,
    )
    .expect("parse");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.display.precision, 3);
    assert_eq!(cfg.history.capacity, 50);
    assert_eq!(cfg.sweep.max_steps, 500);
    assert_eq!(cfg.unit_system, UnitSystem::SI);
}

#[test]
fn invalid_values_are_rejected() {
    let err = Config::from_toml_str("[sweep]\ndefault_steps = 600\nmax_steps = 500\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    let err = Config::from_toml_str("[display]\nprecision = 40\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    let err = Config::from_toml_str("unit_system = \"Metric\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn imperial_preset_changes_default_units() {
    let mut cfg = Config::default();
    cfg.apply_unit_system(UnitSystem::Imperial);
    assert_eq!(cfg.default_units.temperature, TemperatureUnit::Fahrenheit);
    assert_eq!(
        cfg.default_units.for_kind(QuantityKind::FlowRate),
        Unit::FlowRate(FlowRateUnit::GallonPerMinute)
    );
    cfg.apply_unit_system(UnitSystem::SI);
    assert_eq!(cfg.default_units, UnitSystem::SI.default_units());
}

#[test]
fn missing_file_is_created_with_defaults() {
    let path = temp_config_path("created");
    let _ = fs::remove_file(&path);
    let cfg = load_or_default(&path).expect("load");
    assert_eq!(cfg, Config::default());
    assert!(path.exists());

    let mut changed = cfg.clone();
    changed.history.capacity = 7;
    changed.save(&path).expect("save");
    assert_eq!(load_or_default(&path).expect("reload").history.capacity, 7);
    let _ = fs::remove_file(&path);
}
