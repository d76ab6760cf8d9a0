use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chem_engineering_toolkit::app::{self, AppError};
use chem_engineering_toolkit::config::{self, DEFAULT_CONFIG_PATH};
use chem_engineering_toolkit::equations::Equation;
use chem_engineering_toolkit::quantity::QuantityKind;
use chem_engineering_toolkit::session::{ParamInput, Session};
use chem_engineering_toolkit::sweep::SweepRequest;
use chem_engineering_toolkit::ui_cli;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "chem_engineering_toolkit_cli")]
#[command(about = "Chemical engineering formula calculator", long_about = None)]
struct Cli {
    /// Path to the configuration file (created with defaults if missing)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List equations and their parameters
    List,
    /// Evaluate one equation
    Calc {
        /// Equation name, e.g. reynolds, darcy-weisbach, cstr
        equation: Equation,
        /// Parameter override as key=value[unit], e.g. -p D=5cm
        #[arg(short, long = "param")]
        params: Vec<String>,
    },
    /// Convert a value between units
    Convert {
        kind: KindArg,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: String,
        to: String,
    },
    /// Run a parametric study over one parameter
    Sweep {
        equation: Equation,
        /// Parameter key to vary, e.g. v
        #[arg(long = "var")]
        variable: String,
        #[arg(long, allow_negative_numbers = true)]
        start: f64,
        #[arg(long, allow_negative_numbers = true)]
        end: f64,
        /// Number of points (defaults to the configured value)
        #[arg(long)]
        steps: Option<usize>,
        /// Constant parameter override as key=value[unit]
        #[arg(short, long = "param")]
        params: Vec<String>,
        /// Write the results as CSV instead of printing a table
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Interactive menu (default)
    Interactive,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Temperature,
    Pressure,
    Length,
    Flow,
}

impl From<KindArg> for QuantityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Temperature => QuantityKind::Temperature,
            KindArg::Pressure => QuantityKind::Pressure,
            KindArg::Length => QuantityKind::Length,
            KindArg::Flow => QuantityKind::FlowRate,
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령 또는 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let cfg = config::load_or_default(&cli.config)?;
    app::init_tracing(&cfg.log_level);
    let mut session = Session::new(cfg);

    match cli.command.unwrap_or(Command::Interactive) {
        Command::List => {
            ui_cli::print_equation_list();
            Ok(())
        }
        Command::Calc { equation, params } => cmd_calc(&mut session, equation, &params),
        Command::Convert {
            kind,
            value,
            from,
            to,
        } => cmd_convert(&mut session, kind.into(), value, &from, &to),
        Command::Sweep {
            equation,
            variable,
            start,
            end,
            steps,
            params,
            output,
        } => {
            let steps = steps.unwrap_or(session.config().sweep.default_steps);
            cmd_sweep(
                &session,
                SweepArgs {
                    equation,
                    variable,
                    start,
                    end,
                    steps,
                },
                &params,
                output.as_deref(),
            )
        }
        Command::Interactive => app::run(&mut session, &cli.config),
    }
}

struct SweepArgs {
    equation: Equation,
    variable: String,
    start: f64,
    end: f64,
    steps: usize,
}

/// 명령줄 `-p` 값을 해석하고, 빠진 파라미터는 기본값으로 채운다.
fn with_defaults(
    equation: Equation,
    raw: &[String],
    skip: Option<&str>,
) -> Result<Vec<ParamInput>, AppError> {
    let overrides = raw
        .iter()
        .map(|s| s.parse::<ParamInput>())
        .collect::<Result<Vec<_>, _>>()?;
    let mut inputs: Vec<ParamInput> = equation
        .spec()
        .params
        .iter()
        .filter(|p| Some(p.key) != skip)
        .filter(|p| !overrides.iter().any(|o| o.key == p.key))
        .map(|p| ParamInput::new(p.key, p.default))
        .collect();
    inputs.extend(overrides);
    Ok(inputs)
}

fn cmd_calc(session: &mut Session, equation: Equation, raw: &[String]) -> Result<(), AppError> {
    let inputs = with_defaults(equation, raw, None)?;
    let precision = session.config().display.precision;
    let record = session.calculate(equation, &inputs)?;
    ui_cli::print_record(record, precision);
    Ok(())
}

fn cmd_convert(
    session: &mut Session,
    kind: QuantityKind,
    value: f64,
    from: &str,
    to: &str,
) -> Result<(), AppError> {
    let precision = session.config().display.precision;
    let record = session.convert(kind, value, from, to)?;
    ui_cli::print_record(record, precision);
    Ok(())
}

fn cmd_sweep(
    session: &Session,
    args: SweepArgs,
    raw: &[String],
    output: Option<&Path>,
) -> Result<(), AppError> {
    let fixed = with_defaults(args.equation, raw, Some(&args.variable))?;
    let request = SweepRequest {
        equation: args.equation,
        fixed: session.resolve_inputs(args.equation, &fixed)?,
        variable: args.variable,
        start: args.start,
        end: args.end,
        steps: args.steps,
    };
    let sweep = session.sweep(&request)?;
    match output {
        Some(path) => {
            ui_cli::save_sweep_csv(&sweep, path)?;
            println!("Wrote {} points to {}", sweep.len(), path.display());
        }
        None => ui_cli::print_sweep(&sweep, session.config().display.precision),
    }
    Ok(())
}
