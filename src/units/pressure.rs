use serde::{Deserialize, Serialize};

const PA_PER_KPA: f64 = 1_000.0;
const PA_PER_MPA: f64 = 1_000_000.0;
const PA_PER_MBAR: f64 = 100.0;
const PA_PER_BAR: f64 = 100_000.0;
const PA_PER_PSI: f64 = 6_894.76;
const PA_PER_ATM: f64 = 101_325.0;
const PA_PER_MMHG: f64 = 133.322;

/// 압력 단위. 내부 기준은 Pa(절대압)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Pascal,
    KiloPascal,
    MegaPascal,
    MilliBar,
    Bar,
    Psi,
    Atm,
    MmHg,
}

impl PressureUnit {
    pub const ALL: [PressureUnit; 8] = [
        PressureUnit::Pascal,
        PressureUnit::KiloPascal,
        PressureUnit::MegaPascal,
        PressureUnit::MilliBar,
        PressureUnit::Bar,
        PressureUnit::Psi,
        PressureUnit::Atm,
        PressureUnit::MmHg,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            PressureUnit::Pascal => "Pa",
            PressureUnit::KiloPascal => "kPa",
            PressureUnit::MegaPascal => "MPa",
            PressureUnit::MilliBar => "mbar",
            PressureUnit::Bar => "bar",
            PressureUnit::Psi => "psi",
            PressureUnit::Atm => "atm",
            PressureUnit::MmHg => "mmHg",
        }
    }

    /// 1 단위당 Pa.
    fn pascals(self) -> f64 {
        match self {
            PressureUnit::Pascal => 1.0,
            PressureUnit::KiloPascal => PA_PER_KPA,
            PressureUnit::MegaPascal => PA_PER_MPA,
            PressureUnit::MilliBar => PA_PER_MBAR,
            PressureUnit::Bar => PA_PER_BAR,
            PressureUnit::Psi => PA_PER_PSI,
            PressureUnit::Atm => PA_PER_ATM,
            PressureUnit::MmHg => PA_PER_MMHG,
        }
    }
}

/// 주어진 압력을 Pa 로 변환한다.
pub fn to_pascal(value: f64, unit: PressureUnit) -> f64 {
    value * unit.pascals()
}

/// Pa 값을 원하는 단위로 변환한다.
pub fn from_pascal(value_pa: f64, unit: PressureUnit) -> f64 {
    value_pa / unit.pascals()
}

/// 압력을 원하는 단위로 변환한다.
pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    let pa = to_pascal(value, from);
    from_pascal(pa, to)
}
