//! GUI와 CLI가 공유하는 계산 세션. 입력 해석, 계산, 이력 기록을 한 곳에서 처리한다.

use std::str::FromStr;

use crate::app::AppError;
use crate::config::Config;
use crate::conversion::{convert_quantity, parse_unit};
use crate::equations::{Equation, EquationError, ParamValues};
use crate::history::{CalculationRecord, History, RecordValue};
use crate::quantity::{QuantityKind, UnitQuantity};
use crate::sweep::{run_sweep, Sweep, SweepRequest};

/// 폼/CLI에서 들어온 파라미터 하나. 단위가 없으면 기준 단위로 본다.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInput {
    pub key: String,
    pub value: f64,
    pub unit: Option<String>,
}

impl ParamInput {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
            unit: None,
        }
    }

    pub fn with_unit(key: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value,
            unit: Some(unit.into()),
        }
    }
}

impl FromStr for ParamInput {
    type Err = AppError;

    /// `key=value` 또는 `key=value단위` (예: `D=5cm`, `T=77F`, `Q=120L/min`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, rest) = s
            .split_once('=')
            .ok_or_else(|| AppError::InvalidInput(format!("expected key=value, got '{s}'")))?;
        let key = key.trim();
        let rest = rest.trim();
        if key.is_empty() {
            return Err(AppError::InvalidInput(format!("missing parameter name in '{s}'")));
        }
        let split = rest
            .char_indices()
            .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (number, unit) = rest.split_at(split);
        let value = number
            .parse::<f64>()
            .map_err(|_| AppError::InvalidInput(format!("'{number}' is not a number ({key})")))?;
        let unit = unit.trim();
        Ok(if unit.is_empty() {
            ParamInput::new(key, value)
        } else {
            ParamInput::with_unit(key, value, unit)
        })
    }
}

/// 설정과 이력을 가진 사용자 세션.
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    history: History,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Session {
    pub fn new(config: Config) -> Self {
        let history = History::with_capacity(config.history.capacity);
        Self { config, history }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 설정을 교체한다. 이력 용량도 새 값에 맞춘다.
    pub fn set_config(&mut self, config: Config) {
        self.history.set_capacity(config.history.capacity);
        self.config = config;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clear_history(&mut self) {
        tracing::info!(cleared = self.history.len(), "history cleared");
        self.history.clear();
    }

    /// 입력을 기준 단위로 환산한다. 계산이나 기록은 하지 않는다.
    pub fn resolve_inputs(
        &self,
        equation: Equation,
        inputs: &[ParamInput],
    ) -> Result<ParamValues, AppError> {
        let spec = equation.spec();
        let mut values = ParamValues::new();
        for input in inputs {
            let param = spec
                .param(&input.key)
                .ok_or_else(|| EquationError::UnknownParameter {
                    equation: spec.name,
                    param: input.key.clone(),
                })?;
            let value = match input.unit.as_deref().map(str::trim) {
                None | Some("") => input.value,
                Some(unit) if unit == param.unit => input.value,
                Some(unit) => match param.quantity {
                    Some(kind) => {
                        let from = parse_unit(kind, unit)?;
                        let to = parse_unit(kind, param.unit)?;
                        convert_quantity(UnitQuantity::new(input.value, from), to)?.value
                    }
                    None => {
                        return Err(AppError::UnitNotAccepted {
                            param: param.key,
                            unit: unit.to_string(),
                            expected: param.unit,
                        })
                    }
                },
            };
            values.insert(param.key, value);
        }
        Ok(values)
    }

    /// 공식을 계산하고 성공하면 이력에 기록한다. 실패하면 이력은 바뀌지 않는다.
    pub fn calculate(
        &mut self,
        equation: Equation,
        inputs: &[ParamInput],
    ) -> Result<&CalculationRecord, AppError> {
        let outcome = self
            .resolve_inputs(equation, inputs)
            .and_then(|values| Ok((equation.evaluate(&values)?, values)));
        let (evaluation, values) = match outcome {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!(equation = %equation, error = %e, "calculation rejected");
                return Err(e);
            }
        };

        let recorded_inputs = equation
            .spec()
            .params
            .iter()
            .filter_map(|p| values.get(p.key).map(|v| RecordValue::new(p.key, v, p.unit)))
            .collect();
        tracing::info!(equation = %equation, result = evaluation.value(), "calculation done");
        let record = CalculationRecord::from_evaluation(equation, recorded_inputs, &evaluation);
        Ok(self.history.push(record))
    }

    /// 단위 변환을 하고 성공하면 이력에 기록한다.
    pub fn convert(
        &mut self,
        kind: QuantityKind,
        value: f64,
        from: &str,
        to: &str,
    ) -> Result<&CalculationRecord, AppError> {
        let converted = parse_unit(kind, from)
            .and_then(|f| parse_unit(kind, to).map(|t| (f, t)))
            .and_then(|(f, t)| {
                let source = UnitQuantity::new(value, f);
                convert_quantity(source, t).map(|res| (source, res))
            });
        match converted {
            Ok((source, result)) => {
                tracing::info!(%kind, from = %source, to = %result, "conversion done");
                Ok(self.history.push(CalculationRecord::from_conversion(source, result)))
            }
            Err(e) => {
                tracing::warn!(%kind, error = %e, "conversion rejected");
                Err(e.into())
            }
        }
    }

    /// 파라메트릭 스터디를 실행한다. 스윕은 이력에 남기지 않는다.
    pub fn sweep(&self, request: &SweepRequest) -> Result<Sweep, AppError> {
        match run_sweep(request, self.config.sweep.max_steps) {
            Ok(sweep) => {
                tracing::info!(
                    equation = %request.equation,
                    variable = %request.variable,
                    points = sweep.len(),
                    gaps = sweep.gap_count(),
                    "sweep done"
                );
                Ok(sweep)
            }
            Err(e) => {
                tracing::warn!(equation = %request.equation, error = %e, "sweep rejected");
                Err(e.into())
            }
        }
    }

    /// 설정된 자릿수로 값을 문자열로 만든다.
    pub fn format_value(&self, value: f64) -> String {
        format_value(value, self.config.display.precision)
    }
}

/// 아주 크거나 작은 값은 지수 표기, 나머지는 고정 소수점.
pub fn format_value(value: f64, precision: usize) -> String {
    let abs = value.abs();
    if value != 0.0 && value.is_finite() && !(1e-4..1e7).contains(&abs) {
        format!("{value:.precision$e}")
    } else {
        format!("{value:.precision$}")
    }
}
