//! 유체 유동 관련 공식: 레이놀즈수, Darcy-Weisbach 압력손실, 펌프 동력.

use std::fmt;

use super::{finite_result, non_negative, positive, EquationError};

/// 중력가속도 [m/s²].
pub const G: f64 = 9.81;

/// 층류 상한 레이놀즈수.
pub const LAMINAR_LIMIT: f64 = 2300.0;
/// 난류 하한 레이놀즈수.
pub const TURBULENT_LIMIT: f64 = 4000.0;

/// 관 내 유동 영역.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRegime {
    Laminar,
    Transitional,
    Turbulent,
}

impl FlowRegime {
    pub fn from_reynolds(re: f64) -> Self {
        if re < LAMINAR_LIMIT {
            FlowRegime::Laminar
        } else if re <= TURBULENT_LIMIT {
            FlowRegime::Transitional
        } else {
            FlowRegime::Turbulent
        }
    }
}

impl fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlowRegime::Laminar => "Laminar flow",
            FlowRegime::Transitional => "Transitional flow",
            FlowRegime::Turbulent => "Turbulent flow",
        };
        f.write_str(s)
    }
}

/// 레이놀즈수 계산 입력.
#[derive(Debug, Clone)]
pub struct ReynoldsInput {
    /// 유체 밀도 [kg/m3]
    pub density_kg_per_m3: f64,
    /// 유속 [m/s]
    pub velocity_m_per_s: f64,
    /// 배관 내경 [m]
    pub diameter_m: f64,
    /// 점도 [Pa·s]
    pub viscosity_pa_s: f64,
}

/// 레이놀즈수 계산 결과.
#[derive(Debug, Clone)]
pub struct ReynoldsResult {
    pub reynolds: f64,
    pub regime: FlowRegime,
}

/// Re = ρ v D / μ
pub fn reynolds_number(input: &ReynoldsInput) -> Result<ReynoldsResult, EquationError> {
    let rho = positive("density", input.density_kg_per_m3)?;
    let v = non_negative("velocity", input.velocity_m_per_s)?;
    let d = positive("diameter", input.diameter_m)?;
    let mu = positive("viscosity", input.viscosity_pa_s)?;

    let reynolds = finite_result("Reynolds number", rho * v * d / mu)?;
    Ok(ReynoldsResult {
        reynolds,
        regime: FlowRegime::from_reynolds(reynolds),
    })
}

/// Darcy-Weisbach 압력손실 입력.
#[derive(Debug, Clone)]
pub struct DarcyWeisbachInput {
    /// Darcy 마찰계수 [-]
    pub friction_factor: f64,
    /// 배관 길이 [m]
    pub length_m: f64,
    /// 배관 내경 [m]
    pub diameter_m: f64,
    /// 유체 밀도 [kg/m3]
    pub density_kg_per_m3: f64,
    /// 유속 [m/s]
    pub velocity_m_per_s: f64,
}

/// 압력손실 결과.
#[derive(Debug, Clone)]
pub struct DarcyWeisbachResult {
    /// 압력강하 [Pa]
    pub pressure_drop_pa: f64,
    /// 손실수두 [m]
    pub head_loss_m: f64,
}

/// ΔP = f (L/D) ρ v² / 2
pub fn darcy_weisbach(input: &DarcyWeisbachInput) -> Result<DarcyWeisbachResult, EquationError> {
    let f = positive("friction factor", input.friction_factor)?;
    let l = positive("pipe length", input.length_m)?;
    let d = positive("diameter", input.diameter_m)?;
    let rho = positive("density", input.density_kg_per_m3)?;
    let v = non_negative("velocity", input.velocity_m_per_s)?;

    let dp = finite_result("Darcy-Weisbach", f * (l / d) * (rho * v * v / 2.0))?;
    Ok(DarcyWeisbachResult {
        pressure_drop_pa: dp,
        head_loss_m: dp / (rho * G),
    })
}

/// 펌프 동력 입력.
#[derive(Debug, Clone)]
pub struct PumpPowerInput {
    /// 유체 밀도 [kg/m3]
    pub density_kg_per_m3: f64,
    /// 체적 유량 [m3/s]
    pub flow_m3_per_s: f64,
    /// 양정 [m]
    pub head_m: f64,
    /// 펌프 효율 (0, 1]
    pub efficiency: f64,
}

/// 펌프 동력 결과.
#[derive(Debug, Clone)]
pub struct PumpPowerResult {
    /// 축동력 [W]
    pub shaft_power_w: f64,
    /// 수동력 ρgQH [W]
    pub hydraulic_power_w: f64,
}

/// P = ρ g Q H / η
pub fn pump_power(input: &PumpPowerInput) -> Result<PumpPowerResult, EquationError> {
    let rho = positive("density", input.density_kg_per_m3)?;
    let q = non_negative("flow rate", input.flow_m3_per_s)?;
    let h = non_negative("head", input.head_m)?;
    let eff = positive("efficiency", input.efficiency)?;
    if eff > 1.0 {
        return Err(EquationError::OutOfDomain {
            param: "efficiency",
            requirement: "must not exceed 1",
            value: eff,
        });
    }

    let hydraulic = rho * G * q * h;
    Ok(PumpPowerResult {
        shaft_power_w: finite_result("Pump power", hydraulic / eff)?,
        hydraulic_power_w: hydraulic,
    })
}
