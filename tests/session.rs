//! 세션: 단위가 붙은 입력, 이력 기록, 오류 시 이력 불변.
use chem_engineering_toolkit::app::AppError;
use chem_engineering_toolkit::config::Config;
use chem_engineering_toolkit::equations::{Equation, EquationError};
use chem_engineering_toolkit::history::{CalculationRecord, History, RecordSource};
use chem_engineering_toolkit::quantity::{QuantityKind, Unit, UnitQuantity};
use chem_engineering_toolkit::session::{format_value, ParamInput, Session};
use chem_engineering_toolkit::sweep::SweepRequest;
use chem_engineering_toolkit::units::LengthUnit;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "actual={actual} expected={expected}"
    );
}

fn defaults(equation: Equation) -> Vec<ParamInput> {
    equation
        .spec()
        .params
        .iter()
        .map(|p| ParamInput::new(p.key, p.default))
        .collect()
}

fn with_override(equation: Equation, input: ParamInput) -> Vec<ParamInput> {
    let mut inputs: Vec<ParamInput> = defaults(equation)
        .into_iter()
        .filter(|i| i.key != input.key)
        .collect();
    inputs.push(input);
    inputs
}

fn length_record(value: f64) -> CalculationRecord {
    CalculationRecord::from_conversion(
        UnitQuantity::new(value, Unit::Length(LengthUnit::Meter)),
        UnitQuantity::new(value * 100.0, Unit::Length(LengthUnit::Centimeter)),
    )
}

#[test]
fn param_input_parses_value_and_unit() {
    let cases = [
        ("D=5cm", ParamInput::with_unit("D", 5.0, "cm")),
        ("T=77F", ParamInput::with_unit("T", 77.0, "F")),
        ("Q = 120 L/min", ParamInput::with_unit("Q", 120.0, "L/min")),
        ("rho=1e3", ParamInput::new("rho", 1000.0)),
        ("dT1=-5", ParamInput::new("dT1", -5.0)),
    ];
    for (text, expected) in cases {
        assert_eq!(text.parse::<ParamInput>().expect(text), expected);
    }
    for bad in ["D5", "=5", "v=fast"] {
        assert!(matches!(bad.parse::<ParamInput>(), Err(AppError::InvalidInput(_))), "{bad}");
    }
}

#[test]
fn calculation_is_recorded_with_canonical_inputs() {
    let mut session = Session::default();
    let inputs = with_override(Equation::Reynolds, ParamInput::with_unit("D", 5.0, "cm"));
    let record = session.calculate(Equation::Reynolds, &inputs).expect("calc");
    assert_eq!(record.source(), RecordSource::Equation(Equation::Reynolds));
    assert_close(record.result(), 50_000.0);
    assert_eq!(record.note(), Some("Turbulent flow"));
    let keys: Vec<&str> = record.inputs().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(keys, ["rho", "v", "D", "mu"]);
    let d = &record.inputs()[2];
    assert_close(d.value, 0.05);
    assert_eq!(d.unit, "m");
    assert_eq!(session.history().len(), 1);
}

#[test]
fn temperature_inputs_are_converted() {
    let mut session = Session::default();
    let celsius = session
        .calculate(Equation::Antoine, &defaults(Equation::Antoine))
        .expect("25 C")
        .result();
    let fahrenheit = session
        .calculate(
            Equation::Antoine,
            &with_override(Equation::Antoine, ParamInput::with_unit("T", 77.0, "F")),
        )
        .expect("77 F")
        .result();
    assert_close(fahrenheit, celsius);

    let arrhenius = session
        .calculate(
            Equation::Arrhenius,
            &with_override(Equation::Arrhenius, ParamInput::with_unit("T", 25.0, "C")),
        )
        .expect("arrhenius");
    assert_close(arrhenius.inputs()[2].value, 298.15);
}

#[test]
fn negative_pipe_length_creates_no_record() {
    let mut session = Session::default();
    let inputs = with_override(Equation::DarcyWeisbach, ParamInput::new("L", -1.0));
    let err = session.calculate(Equation::DarcyWeisbach, &inputs).unwrap_err();
    assert!(matches!(
        err,
        AppError::Equation(EquationError::OutOfDomain { .. })
    ));
    assert!(session.history().is_empty());
}

#[test]
fn missing_and_foreign_parameters_are_errors() {
    let mut session = Session::default();
    let mut inputs = defaults(Equation::Cstr);
    inputs.pop();
    assert!(matches!(
        session.calculate(Equation::Cstr, &inputs),
        Err(AppError::Equation(EquationError::MissingParameter { .. }))
    ));

    let inputs = with_override(Equation::Cstr, ParamInput::new("T", 300.0));
    assert!(matches!(
        session.calculate(Equation::Cstr, &inputs),
        Err(AppError::Equation(EquationError::UnknownParameter { .. }))
    ));

    let inputs = with_override(Equation::Reynolds, ParamInput::with_unit("rho", 1.0, "g/cm3"));
    assert!(matches!(
        session.calculate(Equation::Reynolds, &inputs),
        Err(AppError::UnitNotAccepted { param: "rho", .. })
    ));
    assert!(session.history().is_empty());
}

#[test]
fn conversion_is_recorded() {
    let mut session = Session::default();
    let record = session
        .convert(QuantityKind::Temperature, 100.0, "C", "F")
        .expect("convert");
    assert_close(record.result(), 212.0);
    assert_eq!(record.name(), "Temperature Conversion");
    assert_eq!(record.outputs()[0].unit, "°F");

    assert!(session.convert(QuantityKind::Pressure, 1.0, "bar", "ft").is_err());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn sweep_is_not_recorded() {
    let session = Session::default();
    let sweep = session
        .sweep(&SweepRequest::with_defaults(Equation::BatchReactor, "t", 0.0, 60.0, 25))
        .expect("sweep");
    assert_eq!(sweep.len(), 25);
    assert!(session.history().is_empty());
}

#[test]
fn sweep_respects_configured_step_limit() {
    let mut config = Config::default();
    config.sweep.max_steps = 20;
    config.sweep.default_steps = 10;
    let session = Session::new(config);
    let err = session
        .sweep(&SweepRequest::with_defaults(Equation::Lmtd, "dT1", 1.0, 50.0, 21))
        .unwrap_err();
    assert!(matches!(err, AppError::Sweep(_)));
}

#[test]
fn history_keeps_insertion_order_without_dedup() {
    let mut session = Session::default();
    for _ in 0..2 {
        session
            .calculate(Equation::Lmtd, &defaults(Equation::Lmtd))
            .expect("lmtd");
    }
    session
        .convert(QuantityKind::Length, 1.0, "ft", "m")
        .expect("convert");
    let names: Vec<String> = session.history().records().map(|r| r.name()).collect();
    assert_eq!(names, ["LMTD", "LMTD", "Length Conversion"]);
    let newest: Vec<String> = session.history().iter_newest_first().map(|r| r.name()).collect();
    assert_eq!(newest, ["Length Conversion", "LMTD", "LMTD"]);

    session.clear_history();
    assert!(session.history().is_empty());
}

#[test]
fn capacity_evicts_oldest_only() {
    let mut history = History::with_capacity(3);
    for v in 1..=5 {
        history.push(length_record(v as f64));
    }
    assert_eq!(history.len(), 3);
    let kept: Vec<f64> = history.records().map(|r| r.inputs()[0].value).collect();
    assert_eq!(kept, [3.0, 4.0, 5.0]);
    assert_eq!(history.latest().map(|r| r.inputs()[0].value), Some(5.0));

    history.set_capacity(2);
    let kept: Vec<f64> = history.records().map(|r| r.inputs()[0].value).collect();
    assert_eq!(kept, [4.0, 5.0]);
}

#[test]
fn zero_capacity_is_unlimited() {
    let mut history = History::with_capacity(0);
    for v in 0..120 {
        history.push(length_record(v as f64));
    }
    assert_eq!(history.len(), 120);
    assert_eq!(History::default().capacity(), 50);
}

#[test]
fn session_capacity_follows_config() {
    let mut config = Config::default();
    config.history.capacity = 2;
    let mut session = Session::new(config);
    for v in [1.0, 2.0, 3.0] {
        session
            .convert(QuantityKind::Length, v, "m", "cm")
            .expect("convert");
    }
    let kept: Vec<f64> = session.history().records().map(|r| r.inputs()[0].value).collect();
    assert_eq!(kept, [2.0, 3.0]);
}

#[test]
fn value_formatting() {
    assert_eq!(format_value(1226.25, 2), "1226.25");
    assert_eq!(format_value(0.0, 3), "0.000");
    assert_eq!(format_value(1.5e-6, 2), "1.50e-6");
    assert_eq!(format_value(2.5e8, 1), "2.5e8");
}
