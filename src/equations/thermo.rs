//! 열역학/반응속도 공식: Antoine 증기압, LMTD, Arrhenius.

use super::{finite, finite_result, non_negative, positive, EquationError};
use crate::units::pressure::{to_pascal, PressureUnit};
use crate::units::temperature::ABSOLUTE_ZERO_C;

/// 기체상수 [J/(mol·K)].
pub const R_GAS: f64 = 8.314;

/// ΔT1, ΔT2가 이 상대 오차 이내이면 산술평균과 같다고 본다.
const LMTD_EQUAL_TOL: f64 = 1e-9;

/// Antoine 식 입력. 계수는 log10(P[mmHg]) = A − B/(T[°C] + C) 형식이다.
#[derive(Debug, Clone)]
pub struct AntoineInput {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// 온도 [°C]
    pub temperature_c: f64,
}

/// Antoine 식 결과.
#[derive(Debug, Clone)]
pub struct AntoineResult {
    pub vapor_pressure_mmhg: f64,
    pub vapor_pressure_pa: f64,
}

/// P = 10^(A − B/(T + C))
pub fn antoine_vapor_pressure(input: &AntoineInput) -> Result<AntoineResult, EquationError> {
    let a = finite("coefficient A", input.a)?;
    let b = finite("coefficient B", input.b)?;
    let c = finite("coefficient C", input.c)?;
    let t = finite("temperature", input.temperature_c)?;
    if t < ABSOLUTE_ZERO_C {
        return Err(EquationError::OutOfDomain {
            param: "temperature",
            requirement: "must not be below absolute zero (-273.15 °C)",
            value: t,
        });
    }
    let denom = t + c;
    if denom == 0.0 {
        return Err(EquationError::Singular("Antoine equation: T + C must not be zero"));
    }

    let p_mmhg = finite_result("Antoine equation", 10_f64.powf(a - b / denom))?;
    Ok(AntoineResult {
        vapor_pressure_mmhg: p_mmhg,
        vapor_pressure_pa: finite_result("Antoine equation", to_pascal(p_mmhg, PressureUnit::MmHg))?,
    })
}

/// LMTD 입력. 양단의 온도차 [K].
#[derive(Debug, Clone)]
pub struct LmtdInput {
    pub delta_t1_k: f64,
    pub delta_t2_k: f64,
}

/// LMTD = (ΔT1 − ΔT2) / ln(ΔT1/ΔT2). ΔT1 ≈ ΔT2 이면 극한값 ΔT1.
pub fn lmtd(input: &LmtdInput) -> Result<f64, EquationError> {
    let dt1 = positive("ΔT1", input.delta_t1_k)?;
    let dt2 = positive("ΔT2", input.delta_t2_k)?;

    if ((dt1 - dt2) / dt1.max(dt2)).abs() < LMTD_EQUAL_TOL {
        return Ok((dt1 + dt2) / 2.0);
    }
    finite_result("LMTD", (dt1 - dt2) / (dt1 / dt2).ln())
}

/// Arrhenius 식 입력.
#[derive(Debug, Clone)]
pub struct ArrheniusInput {
    /// 빈도인자 A (k와 같은 단위)
    pub pre_exponential: f64,
    /// 활성화 에너지 [J/mol]
    pub activation_energy_j_per_mol: f64,
    /// 절대온도 [K]
    pub temperature_k: f64,
}

/// k = A exp(−Ea / (R T))
pub fn arrhenius_rate_constant(input: &ArrheniusInput) -> Result<f64, EquationError> {
    let a = positive("frequency factor", input.pre_exponential)?;
    let ea = non_negative("activation energy", input.activation_energy_j_per_mol)?;
    let t = positive("absolute temperature", input.temperature_k)?;

    finite_result("Arrhenius equation", a * (-ea / (R_GAS * t)).exp())
}
