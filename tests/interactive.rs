//! 대화형 모드의 파일 저장: 실패해도 세션과 이력이 유지된다.
use std::fs;
use std::path::PathBuf;

use chem_engineering_toolkit::app::AppError;
use chem_engineering_toolkit::config::{Config, UnitSystem};
use chem_engineering_toolkit::equations::Equation;
use chem_engineering_toolkit::session::{ParamInput, Session};
use chem_engineering_toolkit::sweep::SweepRequest;
use chem_engineering_toolkit::ui_cli::{save_settings, save_sweep_csv};

fn missing_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chem_toolkit_missing_{}_{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn session_with_one_calculation() -> Session {
    let mut session = Session::new(Config::default());
    let inputs: Vec<ParamInput> = Equation::Reynolds
        .spec()
        .params
        .iter()
        .map(|p| ParamInput::new(p.key, p.default))
        .collect();
    session.calculate(Equation::Reynolds, &inputs).expect("calculate");
    session
}

#[test]
fn csv_save_to_missing_directory_is_recoverable() {
    let session = session_with_one_calculation();
    let sweep = session
        .sweep(&SweepRequest::with_defaults(Equation::Reynolds, "v", 0.1, 10.0, 5))
        .expect("sweep");
    let path = missing_dir("csv").join("x.csv");

    let err = save_sweep_csv(&sweep, &path).unwrap_err();
    assert!(matches!(err, AppError::Export { .. }), "{err:?}");
    assert!(err.is_user_error());
    assert!(err.to_string().contains("x.csv"));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn csv_save_writes_the_sweep() {
    let session = Session::new(Config::default());
    let sweep = session
        .sweep(&SweepRequest::with_defaults(Equation::Lmtd, "dT1", 10.0, 50.0, 3))
        .expect("sweep");
    let path = std::env::temp_dir().join(format!("chem_toolkit_{}_sweep.csv", std::process::id()));

    save_sweep_csv(&sweep, &path).expect("save");
    let written = fs::read_to_string(&path).expect("read back");
    let _ = fs::remove_file(&path);
    assert_eq!(written, sweep.to_csv());
}

#[test]
fn settings_save_failure_keeps_session_and_applies_change() {
    let mut session = session_with_one_calculation();
    let mut cfg = session.config().clone();
    cfg.apply_unit_system(UnitSystem::Imperial);
    let path = missing_dir("cfg").join("config.toml");

    let err = save_settings(&mut session, cfg, &path).unwrap_err();
    assert!(matches!(err, AppError::SettingsNotSaved { .. }), "{err:?}");
    assert!(err.is_user_error());
    assert_eq!(session.config().unit_system, UnitSystem::Imperial);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn settings_save_writes_the_file() {
    let mut session = Session::new(Config::default());
    let mut cfg = session.config().clone();
    cfg.display.precision = 3;
    let path = std::env::temp_dir().join(format!("chem_toolkit_{}_settings.toml", std::process::id()));

    save_settings(&mut session, cfg.clone(), &path).expect("save");
    let text = fs::read_to_string(&path).expect("read back");
    let _ = fs::remove_file(&path);
    assert_eq!(Config::from_toml_str(&text).expect("parse"), cfg);
    assert_eq!(session.config().display.precision, 3);
}

#[test]
fn only_stdio_and_config_load_errors_end_the_session() {
    let eof = AppError::Io(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "closed"));
    assert!(!eof.is_user_error());
    assert!(AppError::InvalidInput("x".into()).is_user_error());
}
