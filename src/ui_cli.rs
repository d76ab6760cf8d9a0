use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::app::AppError;
use crate::config::{Config, UnitSystem};
use crate::conversion::unit_options;
use crate::equations::{Equation, ParamSpec};
use crate::history::CalculationRecord;
use crate::quantity::QuantityKind;
use crate::session::{format_value, ParamInput, Session};
use crate::sweep::{Sweep, SweepRequest};

/// 스윕 범위 입력의 기본값.
const DEFAULT_SWEEP_START: f64 = 0.1;
const DEFAULT_SWEEP_END: f64 = 10.0;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculator,
    UnitConversion,
    ParametricStudy,
    History,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(session: &Session) -> Result<MenuChoice, AppError> {
    println!("\n=== Chemical Engineering Toolkit ===");
    println!("1) Calculator");
    println!("2) Unit Converter");
    println!("3) Parametric Study");
    println!("4) History ({} calculations)", session.history().len());
    println!("5) Settings");
    println!("0) Exit");
    loop {
        let sel = read_line("Select a menu: ")?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Calculator),
            "2" => return Ok(MenuChoice::UnitConversion),
            "3" => return Ok(MenuChoice::ParametricStudy),
            "4" => return Ok(MenuChoice::History),
            "5" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("Invalid selection, try again."),
        }
    }
}

/// 공식 계산 메뉴를 처리한다.
pub fn handle_calculator(session: &mut Session) -> Result<(), AppError> {
    println!("\n-- Calculator --");
    let equation = select_equation()?;
    let spec = equation.spec();
    println!("{}", spec.description);
    println!("Press Enter to keep the default value. Lengths, flows and temperatures accept units (e.g. 5cm).");

    let mut inputs = Vec::with_capacity(spec.params.len());
    for param in spec.params {
        inputs.push(read_param(param)?);
    }
    let precision = session.config().display.precision;
    let record = session.calculate(equation, &inputs)?;
    print_record(record, precision);
    println!("Calculation saved to history.");
    Ok(())
}

/// 단위 변환 메뉴를 처리한다.
pub fn handle_unit_conversion(session: &mut Session) -> Result<(), AppError> {
    println!("\n-- Unit Converter --");
    for (i, kind) in QuantityKind::ALL.iter().enumerate() {
        println!("{}) {}", i + 1, kind);
    }
    let kind = QuantityKind::ALL[read_choice("Category: ", QuantityKind::ALL.len())?];
    println!("Units: {}", unit_options(kind).join(", "));
    let default_unit = session.config().default_units.for_kind(kind);
    let value = read_f64("Value: ")?;
    let from = read_line(&format!("From unit [{default_unit}]: "))?;
    let to = read_line("To unit: ")?;
    let from = match from.trim() {
        "" => default_unit.symbol().to_string(),
        s => s.to_string(),
    };

    let precision = session.config().display.precision;
    let record = session.convert(kind, value, &from, to.trim())?;
    if let Some(out) = record.outputs().first() {
        println!("Result: {} {}", format_value(out.value, precision), out.unit);
    }
    Ok(())
}

/// 파라메트릭 스터디 메뉴를 처리한다.
pub fn handle_parametric_study(session: &mut Session) -> Result<(), AppError> {
    println!("\n-- Parametric Study --");
    let equation = select_equation()?;
    let spec = equation.spec();
    println!("{}", spec.description);
    for (i, p) in spec.params.iter().enumerate() {
        println!("{}) {}", i + 1, p.display_label());
    }
    let variable = &spec.params[read_choice("Variable parameter: ", spec.params.len())?];
    let start = read_f64_or("Start value", DEFAULT_SWEEP_START)?;
    let end = read_f64_or("End value", DEFAULT_SWEEP_END)?;
    let steps = read_f64_or("Steps", session.config().sweep.default_steps as f64)?;
    if steps < 1.0 || steps.fract() != 0.0 {
        return Err(AppError::InvalidInput(format!("steps must be a positive whole number (got {steps})")));
    }

    println!("Constant parameters:");
    let mut fixed = Vec::new();
    for param in spec.params.iter().filter(|p| p.key != variable.key) {
        fixed.push(read_param(param)?);
    }
    let request = SweepRequest {
        equation,
        variable: variable.key.to_string(),
        start,
        end,
        steps: steps as usize,
        fixed: session.resolve_inputs(equation, &fixed)?,
    };
    let sweep = session.sweep(&request)?;
    print_sweep(&sweep, session.config().display.precision);

    let path = read_line(&format!("Save CSV to (Enter to skip, e.g. {}): ", sweep.default_file_name()))?;
    let path = path.trim();
    if !path.is_empty() {
        save_sweep_csv(&sweep, Path::new(path))?;
        println!("Saved {path}");
    }
    Ok(())
}

/// 스윕 결과를 CSV 파일로 저장한다. 쓰기 실패는 `AppError::Export`로 돌려준다.
pub fn save_sweep_csv(sweep: &Sweep, path: &Path) -> Result<(), AppError> {
    fs::write(path, sweep.to_csv()).map_err(|source| AppError::Export {
        path: path.to_path_buf(),
        source,
    })
}

/// 설정을 세션에 적용하고 파일에 저장한다.
///
/// 저장에 실패해도 세션에는 적용된 상태로 남는다.
pub fn save_settings(session: &mut Session, cfg: Config, config_path: &Path) -> Result<(), AppError> {
    let saved = cfg.save(config_path);
    session.set_config(cfg);
    saved.map_err(|source| AppError::SettingsNotSaved {
        path: config_path.to_path_buf(),
        source,
    })
}

/// 계산 이력 메뉴를 처리한다.
pub fn handle_history(session: &mut Session) -> Result<(), AppError> {
    println!("\n-- Calculation History --");
    if session.history().is_empty() {
        println!("No calculations yet. Start calculating in the Calculator menu!");
        return Ok(());
    }
    let precision = session.config().display.precision;
    println!("Total calculations: {}", session.history().len());
    for record in session.history().iter_newest_first() {
        print_record(record, precision);
    }
    let sel = read_line("c) Clear all history, Enter) Back: ")?;
    if sel.trim().eq_ignore_ascii_case("c") {
        session.clear_history();
        println!("History cleared.");
    }
    Ok(())
}

/// 설정 메뉴를 처리하고 변경 사항을 저장한다.
pub fn handle_settings(session: &mut Session, config_path: &Path) -> Result<(), AppError> {
    println!("\n-- Settings --");
    let mut cfg = session.config().clone();
    println!("Unit system: {:?}", cfg.unit_system);
    println!("History capacity: {} (0 = unlimited)", cfg.history.capacity);
    println!("Result precision: {} digits", cfg.display.precision);
    println!("1) Unit system  2) History capacity  3) Precision");
    let sel = read_line("Item to change (Enter to cancel): ")?;
    match sel.trim() {
        "" => return Ok(()),
        "1" => {
            println!("1) SI  2) Imperial");
            let system = match read_line("Select: ")?.trim() {
                "1" => UnitSystem::SI,
                "2" => UnitSystem::Imperial,
                _ => {
                    println!("Invalid input, nothing changed.");
                    return Ok(());
                }
            };
            cfg.apply_unit_system(system);
        }
        "2" => {
            let cap = read_f64("History capacity: ")?;
            if cap < 0.0 || cap.fract() != 0.0 {
                return Err(AppError::InvalidInput("capacity must be a whole number".into()));
            }
            cfg.history.capacity = cap as usize;
        }
        "3" => {
            let digits = read_f64("Digits after the decimal point (0-15): ")?;
            if !(0.0..=15.0).contains(&digits) || digits.fract() != 0.0 {
                return Err(AppError::InvalidInput("precision must be between 0 and 15".into()));
            }
            cfg.display.precision = digits as usize;
        }
        _ => {
            println!("Invalid input, nothing changed.");
            return Ok(());
        }
    }
    match save_settings(session, cfg, config_path) {
        Ok(()) => println!("Settings saved to {}.", config_path.display()),
        Err(e) => println!("Error: {e}\nThe new settings apply to this session only."),
    }
    Ok(())
}

/// 공식 목록과 파라미터를 출력한다.
pub fn print_equation_list() {
    for eq in Equation::ALL {
        let spec = eq.spec();
        println!("{:<15} {} - {}", eq.slug(), spec.name, spec.description);
        for p in spec.params {
            let convertible = if p.quantity.is_some() { " *" } else { "" };
            println!("    {:<4} {} = {}{}", p.key, p.display_label(), p.default, convertible);
        }
        println!("    -> {}", spec.result_display_label());
    }
    println!("(* accepts other units, e.g. D=5cm, T=77F, Q=120L/min)");
}

/// 이력 항목 하나를 출력한다.
pub fn print_record(record: &CalculationRecord, precision: usize) {
    println!("\n[{}] {}", record.timestamp_label(), record.name());
    println!("  Inputs:");
    for input in record.inputs() {
        println!("    - {}: {} {}", input.name, input.value, input.unit);
    }
    println!("  Result:");
    for out in record.outputs() {
        println!("    {}: {} {}", out.name, format_value(out.value, precision), out.unit);
    }
    if let Some(note) = record.note() {
        println!("  {note}");
    }
}

/// 스윕 결과를 표로 출력한다.
pub fn print_sweep(sweep: &Sweep, precision: usize) {
    println!("\n{}", sweep.title());
    println!("{:>20} | {}", sweep.x_label(), sweep.y_label());
    for p in sweep.points() {
        let y = p
            .output
            .map(|y| format_value(y, precision))
            .unwrap_or_else(|| "-".to_string());
        println!("{:>20} | {}", format_value(p.input, precision), y);
    }
    if sweep.gap_count() > 0 {
        println!("{} point(s) were outside the valid range.", sweep.gap_count());
    }
}

fn select_equation() -> Result<Equation, AppError> {
    for (i, eq) in Equation::ALL.iter().enumerate() {
        println!("{}) {}", i + 1, eq);
    }
    Ok(Equation::ALL[read_choice("Select equation: ", Equation::ALL.len())?])
}

fn read_param(param: &ParamSpec) -> Result<ParamInput, AppError> {
    loop {
        let s = read_line(&format!("{} [{}]: ", param.display_label(), param.default))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(ParamInput::new(param.key, param.default));
        }
        match format!("{}={s}", param.key).parse::<ParamInput>() {
            Ok(input) => return Ok(input),
            Err(e) => println!("{e}"),
        }
    }
}

/// 1..=n 범위의 번호를 받아 0부터 시작하는 인덱스로 돌려준다.
fn read_choice(prompt: &str, n: usize) -> Result<usize, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<usize>() {
            Ok(v) if (1..=n).contains(&v) => return Ok(v - 1),
            _ => println!("Enter a number between 1 and {n}."),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "standard input closed",
        )));
    }
    Ok(buf)
}

fn read_f64(prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn read_f64_or(label: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{label} [{default}]: "))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("Please enter a number."),
        }
    }
}
