//! 1차 반응 이상 반응기 모델.

use super::{finite_result, non_negative, positive, EquationError};

/// 회분식 반응기 입력.
#[derive(Debug, Clone)]
pub struct BatchReactorInput {
    /// 속도상수 k [1/s]
    pub rate_constant_per_s: f64,
    /// 반응 시간 [s]
    pub time_s: f64,
    /// 초기 농도 [mol/L]
    pub initial_concentration_mol_per_l: f64,
}

/// CSTR 입력.
#[derive(Debug, Clone)]
pub struct CstrInput {
    /// 속도상수 k [1/s]
    pub rate_constant_per_s: f64,
    /// 체류시간 τ [s]
    pub residence_time_s: f64,
    /// 공급 농도 [mol/L]
    pub feed_concentration_mol_per_l: f64,
}

/// 반응기 결과.
#[derive(Debug, Clone)]
pub struct ReactorResult {
    /// 출구(또는 시간 t) 농도 [mol/L]
    pub concentration_mol_per_l: f64,
    /// 전화율 X = 1 − C/C0
    pub conversion: f64,
}

/// C = C0 exp(−k t)
pub fn batch_reactor(input: &BatchReactorInput) -> Result<ReactorResult, EquationError> {
    let k = non_negative("rate constant", input.rate_constant_per_s)?;
    let t = non_negative("time", input.time_s)?;
    let c0 = positive("initial concentration", input.initial_concentration_mol_per_l)?;

    let remaining = finite_result("Batch reactor", (-k * t).exp())?;
    Ok(ReactorResult {
        concentration_mol_per_l: c0 * remaining,
        conversion: 1.0 - remaining,
    })
}

/// C = C0 / (1 + k τ)
pub fn cstr(input: &CstrInput) -> Result<ReactorResult, EquationError> {
    let k = non_negative("rate constant", input.rate_constant_per_s)?;
    let tau = non_negative("residence time", input.residence_time_s)?;
    let c0 = positive("feed concentration", input.feed_concentration_mol_per_l)?;

    let damkohler = finite_result("CSTR", k * tau)?;
    Ok(ReactorResult {
        concentration_mol_per_l: c0 / (1.0 + damkohler),
        conversion: damkohler / (1.0 + damkohler),
    })
}
