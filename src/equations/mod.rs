//! 교과서 화학공학 공식 모음.
//!
//! 공식마다 타입이 지정된 입력/결과 구조체와 순수 함수가 있고, [`Equation`]은 이름으로
//! 파라미터를 받아 같은 함수로 전달하는 폼/CLI용 디스패처이다.

pub mod fluid;
pub mod reactor;
pub mod thermo;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::quantity::QuantityKind;

pub use fluid::{
    darcy_weisbach, pump_power, reynolds_number, DarcyWeisbachInput, DarcyWeisbachResult,
    FlowRegime, PumpPowerInput, PumpPowerResult, ReynoldsInput, ReynoldsResult,
};
pub use reactor::{batch_reactor, cstr, BatchReactorInput, CstrInput, ReactorResult};
pub use thermo::{
    antoine_vapor_pressure, arrhenius_rate_constant, lmtd, AntoineInput, AntoineResult,
    ArrheniusInput, LmtdInput,
};

/// 공식 계산 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EquationError {
    /// NaN 또는 무한대 입력
    #[error("{param} is not a finite number")]
    NonFinite { param: &'static str },
    /// 유효 범위를 벗어난 입력
    #[error("{param} {requirement} (got {value})")]
    OutOfDomain {
        param: &'static str,
        requirement: &'static str,
        value: f64,
    },
    /// 분모가 0이 되는 입력 조합
    #[error("{0}")]
    Singular(&'static str),
    /// 계산 결과가 유한하지 않음
    #[error("{equation} result is not a finite number")]
    NonFiniteResult { equation: &'static str },
    /// 필수 파라미터 누락
    #[error("{equation}: missing parameter '{param}'")]
    MissingParameter { equation: &'static str, param: String },
    /// 공식에 없는 파라미터
    #[error("{equation}: unknown parameter '{param}'")]
    UnknownParameter { equation: &'static str, param: String },
    /// 알 수 없는 공식 이름
    #[error("unknown equation: {0}")]
    UnknownEquation(String),
}

pub(crate) fn finite(param: &'static str, value: f64) -> Result<f64, EquationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EquationError::NonFinite { param })
    }
}

pub(crate) fn positive(param: &'static str, value: f64) -> Result<f64, EquationError> {
    if finite(param, value)? > 0.0 {
        Ok(value)
    } else {
        Err(EquationError::OutOfDomain {
            param,
            requirement: "must be greater than zero",
            value,
        })
    }
}

pub(crate) fn non_negative(param: &'static str, value: f64) -> Result<f64, EquationError> {
    if finite(param, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(EquationError::OutOfDomain {
            param,
            requirement: "must not be negative",
            value,
        })
    }
}

pub(crate) fn finite_result(equation: &'static str, value: f64) -> Result<f64, EquationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EquationError::NonFiniteResult { equation })
    }
}

/// 폼 입력 한 칸의 정의.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// 파라미터 키 (예: `rho`, `D`)
    pub key: &'static str,
    pub label: &'static str,
    /// 계산에 사용하는 기준 단위. 무차원이면 빈 문자열.
    pub unit: &'static str,
    pub default: f64,
    /// 다른 단위 입력을 허용하는 물리량. `None`이면 기준 단위만 받는다.
    pub quantity: Option<QuantityKind>,
}

impl ParamSpec {
    const fn fixed(key: &'static str, label: &'static str, unit: &'static str, default: f64) -> Self {
        Self {
            key,
            label,
            unit,
            default,
            quantity: None,
        }
    }

    const fn convertible(
        key: &'static str,
        label: &'static str,
        unit: &'static str,
        default: f64,
        quantity: QuantityKind,
    ) -> Self {
        Self {
            key,
            label,
            unit,
            default,
            quantity: Some(quantity),
        }
    }

    /// `Label (unit)` 형태의 표시 문자열.
    pub fn display_label(&self) -> String {
        if self.unit.is_empty() {
            self.label.to_string()
        } else {
            format!("{} ({})", self.label, self.unit)
        }
    }
}

/// 공식의 정적 메타데이터.
#[derive(Debug)]
pub struct EquationSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    pub result_label: &'static str,
    pub result_unit: &'static str,
}

impl EquationSpec {
    pub fn param(&self, key: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|p| p.key == key)
    }

    pub fn result_display_label(&self) -> String {
        if self.result_unit.is_empty() {
            self.result_label.to_string()
        } else {
            format!("{} ({})", self.result_label, self.result_unit)
        }
    }
}

static REYNOLDS: EquationSpec = EquationSpec {
    name: "Reynolds Number",
    description: "Determines flow regime (laminar, transitional, turbulent)",
    params: &[
        ParamSpec::fixed("rho", "Fluid Density", "kg/m³", 1000.0),
        ParamSpec::fixed("v", "Fluid Velocity", "m/s", 1.0),
        ParamSpec::convertible("D", "Pipe Diameter", "m", 0.05, QuantityKind::Length),
        ParamSpec::fixed("mu", "Dynamic Viscosity", "Pa·s", 0.001),
    ],
    result_label: "Reynolds Number",
    result_unit: "",
};

static DARCY_WEISBACH: EquationSpec = EquationSpec {
    name: "Darcy-Weisbach",
    description: "Calculates pressure drop due to friction in a pipe",
    params: &[
        ParamSpec::fixed("f", "Friction Factor", "", 0.02),
        ParamSpec::convertible("L", "Pipe Length", "m", 100.0, QuantityKind::Length),
        ParamSpec::convertible("D", "Pipe Diameter", "m", 0.05, QuantityKind::Length),
        ParamSpec::fixed("rho", "Fluid Density", "kg/m³", 1000.0),
        ParamSpec::fixed("v", "Velocity", "m/s", 2.0),
    ],
    result_label: "Pressure Drop",
    result_unit: "Pa",
};

static PUMP_POWER: EquationSpec = EquationSpec {
    name: "Pump Power",
    description: "Calculates pump power needed for fluid transport",
    params: &[
        ParamSpec::fixed("rho", "Density", "kg/m³", 1000.0),
        ParamSpec::convertible("Q", "Flow Rate", "m³/s", 0.01, QuantityKind::FlowRate),
        ParamSpec::convertible("H", "Head", "m", 10.0, QuantityKind::Length),
        ParamSpec::fixed("eff", "Pump Efficiency", "0-1", 0.8),
    ],
    result_label: "Pump Power",
    result_unit: "W",
};

static ANTOINE: EquationSpec = EquationSpec {
    name: "Antoine Equation",
    description: "Gives vapor pressure of a pure component",
    params: &[
        ParamSpec::fixed("A", "Coefficient A", "", 8.07131),
        ParamSpec::fixed("B", "Coefficient B", "", 1730.63),
        ParamSpec::fixed("C", "Coefficient C", "", 233.426),
        ParamSpec::convertible("T", "Temperature", "°C", 25.0, QuantityKind::Temperature),
    ],
    result_label: "Vapor Pressure",
    result_unit: "mmHg",
};

static BATCH_REACTOR: EquationSpec = EquationSpec {
    name: "Batch Reactor",
    description: "1st-order batch reactor concentration",
    params: &[
        ParamSpec::fixed("k", "Rate Constant k", "1/s", 0.1),
        ParamSpec::fixed("t", "Time", "s", 10.0),
        ParamSpec::fixed("C0", "Initial Concentration", "mol/L", 1.0),
    ],
    result_label: "Concentration",
    result_unit: "mol/L",
};

static CSTR: EquationSpec = EquationSpec {
    name: "CSTR",
    description: "Steady-state CSTR for 1st order reaction",
    params: &[
        ParamSpec::fixed("k", "Rate Constant k", "1/s", 0.1),
        ParamSpec::fixed("tau", "Residence Time", "s", 10.0),
        ParamSpec::fixed("C0", "Feed Concentration", "mol/L", 1.0),
    ],
    result_label: "Outlet Concentration",
    result_unit: "mol/L",
};

// 온도차는 아핀 변환 대상이 아니므로 변환 가능 파라미터로 두지 않는다.
static LMTD: EquationSpec = EquationSpec {
    name: "LMTD",
    description: "Log-Mean Temperature Difference for heat exchangers",
    params: &[
        ParamSpec::fixed("dT1", "ΔT₁", "K", 30.0),
        ParamSpec::fixed("dT2", "ΔT₂", "K", 10.0),
    ],
    result_label: "LMTD",
    result_unit: "K",
};

static ARRHENIUS: EquationSpec = EquationSpec {
    name: "Arrhenius Equation",
    description: "Temperature dependence of rate constant",
    params: &[
        ParamSpec::fixed("A", "Frequency Factor A", "", 1e10),
        ParamSpec::fixed("Ea", "Activation Energy", "J/mol", 50000.0),
        ParamSpec::convertible("T", "Temperature", "K", 298.0, QuantityKind::Temperature),
    ],
    result_label: "Rate Constant k",
    result_unit: "",
};

/// 계산기에서 고를 수 있는 공식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Equation {
    Reynolds,
    DarcyWeisbach,
    PumpPower,
    Antoine,
    BatchReactor,
    Cstr,
    Lmtd,
    Arrhenius,
}

impl Equation {
    pub const ALL: [Equation; 8] = [
        Equation::Reynolds,
        Equation::DarcyWeisbach,
        Equation::PumpPower,
        Equation::Antoine,
        Equation::BatchReactor,
        Equation::Cstr,
        Equation::Lmtd,
        Equation::Arrhenius,
    ];

    pub fn spec(self) -> &'static EquationSpec {
        match self {
            Equation::Reynolds => &REYNOLDS,
            Equation::DarcyWeisbach => &DARCY_WEISBACH,
            Equation::PumpPower => &PUMP_POWER,
            Equation::Antoine => &ANTOINE,
            Equation::BatchReactor => &BATCH_REACTOR,
            Equation::Cstr => &CSTR,
            Equation::Lmtd => &LMTD,
            Equation::Arrhenius => &ARRHENIUS,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// CLI에서 사용하는 짧은 식별자.
    pub fn slug(self) -> &'static str {
        match self {
            Equation::Reynolds => "reynolds",
            Equation::DarcyWeisbach => "darcy-weisbach",
            Equation::PumpPower => "pump-power",
            Equation::Antoine => "antoine",
            Equation::BatchReactor => "batch-reactor",
            Equation::Cstr => "cstr",
            Equation::Lmtd => "lmtd",
            Equation::Arrhenius => "arrhenius",
        }
    }

    /// 기본값으로 채운 파라미터 집합.
    pub fn default_values(self) -> ParamValues {
        self.spec()
            .params
            .iter()
            .map(|p| (p.key.to_string(), p.default))
            .collect()
    }

    /// 이름으로 전달된 파라미터를 검증하고 공식을 계산한다.
    ///
    /// 모든 파라미터는 기준 단위 값이어야 한다.
    pub fn evaluate(self, values: &ParamValues) -> Result<Evaluation, EquationError> {
        let spec = self.spec();
        if let Some(unknown) = values.keys().find(|k| spec.param(k).is_none()) {
            return Err(EquationError::UnknownParameter {
                equation: spec.name,
                param: unknown.to_string(),
            });
        }
        let p = |key: &str| values.require(spec.name, key);

        let evaluation = match self {
            Equation::Reynolds => {
                let res = reynolds_number(&ReynoldsInput {
                    density_kg_per_m3: p("rho")?,
                    velocity_m_per_s: p("v")?,
                    diameter_m: p("D")?,
                    viscosity_pa_s: p("mu")?,
                })?;
                Evaluation::new(spec, res.reynolds).with_note(res.regime.to_string())
            }
            Equation::DarcyWeisbach => {
                let res = darcy_weisbach(&DarcyWeisbachInput {
                    friction_factor: p("f")?,
                    length_m: p("L")?,
                    diameter_m: p("D")?,
                    density_kg_per_m3: p("rho")?,
                    velocity_m_per_s: p("v")?,
                })?;
                Evaluation::new(spec, res.pressure_drop_pa).with_output(
                    "Head Loss",
                    res.head_loss_m,
                    "m",
                )
            }
            Equation::PumpPower => {
                let res = pump_power(&PumpPowerInput {
                    density_kg_per_m3: p("rho")?,
                    flow_m3_per_s: p("Q")?,
                    head_m: p("H")?,
                    efficiency: p("eff")?,
                })?;
                Evaluation::new(spec, res.shaft_power_w).with_output(
                    "Hydraulic Power",
                    res.hydraulic_power_w,
                    "W",
                )
            }
            Equation::Antoine => {
                let res = antoine_vapor_pressure(&AntoineInput {
                    a: p("A")?,
                    b: p("B")?,
                    c: p("C")?,
                    temperature_c: p("T")?,
                })?;
                Evaluation::new(spec, res.vapor_pressure_mmhg).with_output(
                    "Vapor Pressure",
                    res.vapor_pressure_pa,
                    "Pa",
                )
            }
            Equation::BatchReactor => {
                let res = batch_reactor(&BatchReactorInput {
                    rate_constant_per_s: p("k")?,
                    time_s: p("t")?,
                    initial_concentration_mol_per_l: p("C0")?,
                })?;
                Evaluation::new(spec, res.concentration_mol_per_l).with_output(
                    "Conversion",
                    res.conversion,
                    "",
                )
            }
            Equation::Cstr => {
                let res = cstr(&CstrInput {
                    rate_constant_per_s: p("k")?,
                    residence_time_s: p("tau")?,
                    feed_concentration_mol_per_l: p("C0")?,
                })?;
                Evaluation::new(spec, res.concentration_mol_per_l).with_output(
                    "Conversion",
                    res.conversion,
                    "",
                )
            }
            Equation::Lmtd => {
                let value = lmtd(&LmtdInput {
                    delta_t1_k: p("dT1")?,
                    delta_t2_k: p("dT2")?,
                })?;
                Evaluation::new(spec, value)
            }
            Equation::Arrhenius => {
                let value = arrhenius_rate_constant(&ArrheniusInput {
                    pre_exponential: p("A")?,
                    activation_energy_j_per_mol: p("Ea")?,
                    temperature_k: p("T")?,
                })?;
                Evaluation::new(spec, value)
            }
        };
        Ok(evaluation)
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Equation {
    type Err = EquationError;

    /// 식별자(`darcy-weisbach`) 또는 표시 이름(`Darcy-Weisbach`)을 받는다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace(['_', ' '], "-");
        Equation::ALL
            .into_iter()
            .find(|eq| eq.slug() == needle || eq.name().to_lowercase().replace(' ', "-") == needle)
            .or(match needle.as_str() {
                "re" => Some(Equation::Reynolds),
                "darcy" => Some(Equation::DarcyWeisbach),
                "pump" => Some(Equation::PumpPower),
                "batch" => Some(Equation::BatchReactor),
                _ => None,
            })
            .ok_or_else(|| EquationError::UnknownEquation(s.to_string()))
    }
}

/// 파라미터 키 → 기준 단위 값.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamValues(BTreeMap<String, f64>);

impl ParamValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn require(&self, equation: &'static str, key: &str) -> Result<f64, EquationError> {
        self.get(key).ok_or_else(|| EquationError::MissingParameter {
            equation,
            param: key.to_string(),
        })
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ParamValues {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// 이름과 단위가 붙은 결과 값.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

/// 공식 계산 결과. 첫 번째 값이 폼/그래프에 쓰는 주 결과이다.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub primary: Output,
    pub secondary: Vec<Output>,
    /// 유동 영역처럼 수치가 아닌 부가 정보
    pub note: Option<String>,
}

impl Evaluation {
    fn new(spec: &EquationSpec, value: f64) -> Self {
        Self {
            primary: Output {
                label: spec.result_label,
                value,
                unit: spec.result_unit,
            },
            secondary: Vec::new(),
            note: None,
        }
    }

    fn with_output(mut self, label: &'static str, value: f64, unit: &'static str) -> Self {
        self.secondary.push(Output { label, value, unit });
        self
    }

    fn with_note(mut self, note: String) -> Self {
        self.note = Some(note);
        self
    }

    pub fn value(&self) -> f64 {
        self.primary.value
    }

    /// 주 결과와 부 결과를 순서대로 돌려준다.
    pub fn outputs(&self) -> impl Iterator<Item = &Output> {
        std::iter::once(&self.primary).chain(self.secondary.iter())
    }
}
