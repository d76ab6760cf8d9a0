//! 한 변수를 선형으로 바꿔가며 공식을 반복 계산하는 파라메트릭 스터디.

use std::fmt::Write as _;

use thiserror::Error;

use crate::equations::{Equation, EquationError, ParamSpec, ParamValues};

/// 기본 샘플 수.
pub const DEFAULT_STEPS: usize = 50;
/// 허용하는 최대 샘플 수.
pub const DEFAULT_MAX_STEPS: usize = 500;

/// 파라메트릭 스터디 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    #[error("{equation} has no parameter '{variable}'")]
    UnknownVariable {
        equation: &'static str,
        variable: String,
    },
    #[error("sweep bounds must be finite numbers")]
    NonFiniteBound,
    #[error("step count must be between 1 and {max} (got {steps})")]
    InvalidSteps { steps: usize, max: usize },
    #[error(transparent)]
    Equation(#[from] EquationError),
}

/// 스윕 요청. `fixed`에는 변수 외의 모든 파라미터가 기준 단위로 들어 있어야 한다.
#[derive(Debug, Clone)]
pub struct SweepRequest {
    pub equation: Equation,
    pub variable: String,
    pub start: f64,
    pub end: f64,
    pub steps: usize,
    pub fixed: ParamValues,
}

impl SweepRequest {
    /// 공식 기본값을 고정값으로 쓰는 요청.
    pub fn with_defaults(equation: Equation, variable: &str, start: f64, end: f64, steps: usize) -> Self {
        Self {
            equation,
            variable: variable.to_string(),
            start,
            end,
            steps,
            fixed: equation.default_values(),
        }
    }
}

/// (입력, 출력) 샘플 한 점. 유효 범위를 벗어난 점은 출력이 `None`이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub input: f64,
    pub output: Option<f64>,
}

/// 스윕 결과.
#[derive(Debug, Clone)]
pub struct Sweep {
    equation: Equation,
    variable: &'static ParamSpec,
    points: Vec<SweepPoint>,
}

impl Sweep {
    pub fn equation(&self) -> Equation {
        self.equation
    }

    pub fn variable(&self) -> &'static ParamSpec {
        self.variable
    }

    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 출력이 있는 점만 `[x, y]` 형태로. 그래프용.
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .filter_map(|p| p.output.map(|y| [p.input, y]))
            .collect()
    }

    /// 출력이 없는 점의 개수.
    pub fn gap_count(&self) -> usize {
        self.points.iter().filter(|p| p.output.is_none()).count()
    }

    pub fn x_label(&self) -> String {
        self.variable.display_label()
    }

    pub fn y_label(&self) -> String {
        self.equation.spec().result_display_label()
    }

    pub fn title(&self) -> String {
        format!("{} vs {}", self.equation.name(), self.variable.label)
    }

    /// 헤더 한 줄과 점마다 한 줄의 CSV. 출력이 없는 칸은 비워 둔다.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{},{}", csv_field(&self.x_label()), csv_field(&self.y_label()));
        for p in &self.points {
            match p.output {
                Some(y) => {
                    let _ = writeln!(out, "{},{}", p.input, y);
                }
                None => {
                    let _ = writeln!(out, "{},", p.input);
                }
            }
        }
        out
    }

    /// CSV 저장 시 기본 파일 이름.
    pub fn default_file_name(&self) -> String {
        format!("{}_parametric_study.csv", self.equation.slug())
    }
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// 양 끝을 포함해 `n`개의 등간격 값을 만든다. `n == 1`이면 `start`만 돌려준다.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        end
                    } else {
                        start + (end - start) * (i as f64) / last
                    }
                })
                .collect()
        }
    }
}

/// 스윕을 실행한다. 개별 점의 계산 실패는 전체 실패가 아니라 빈 점으로 남긴다.
pub fn run_sweep(request: &SweepRequest, max_steps: usize) -> Result<Sweep, SweepError> {
    let spec = request.equation.spec();
    let variable = spec
        .param(&request.variable)
        .ok_or_else(|| SweepError::UnknownVariable {
            equation: spec.name,
            variable: request.variable.clone(),
        })?;
    if !request.start.is_finite() || !request.end.is_finite() {
        return Err(SweepError::NonFiniteBound);
    }
    if request.steps == 0 || request.steps > max_steps {
        return Err(SweepError::InvalidSteps {
            steps: request.steps,
            max: max_steps,
        });
    }
    if let Some(unknown) = request.fixed.keys().find(|k| spec.param(k).is_none()) {
        return Err(EquationError::UnknownParameter {
            equation: spec.name,
            param: unknown.to_string(),
        }
        .into());
    }
    if let Some(missing) = spec
        .params
        .iter()
        .find(|p| p.key != variable.key && request.fixed.get(p.key).is_none())
    {
        return Err(EquationError::MissingParameter {
            equation: spec.name,
            param: missing.key.to_string(),
        }
        .into());
    }

    let mut values = request.fixed.clone();
    let points = linspace(request.start, request.end, request.steps)
        .into_iter()
        .map(|x| {
            values.insert(variable.key, x);
            let output = match request.equation.evaluate(&values) {
                Ok(eval) => Some(eval.value()),
                Err(e) => {
                    tracing::debug!(input = x, error = %e, "sweep sample out of domain");
                    None
                }
            };
            SweepPoint { input: x, output }
        })
        .collect();

    Ok(Sweep {
        equation: request.equation,
        variable,
        points,
    })
}
