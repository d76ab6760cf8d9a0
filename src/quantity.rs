use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::{FlowRateUnit, LengthUnit, PressureUnit, TemperatureUnit};

/// 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityKind {
    Temperature,
    Pressure,
    Length,
    FlowRate,
}

impl QuantityKind {
    pub const ALL: [QuantityKind; 4] = [
        QuantityKind::Temperature,
        QuantityKind::Pressure,
        QuantityKind::Length,
        QuantityKind::FlowRate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuantityKind::Temperature => "Temperature",
            QuantityKind::Pressure => "Pressure",
            QuantityKind::Length => "Length",
            QuantityKind::FlowRate => "Flow Rate",
        }
    }

    /// 해당 물리량의 내부 기준 단위.
    pub fn base_unit(self) -> Unit {
        match self {
            QuantityKind::Temperature => Unit::Temperature(TemperatureUnit::Kelvin),
            QuantityKind::Pressure => Unit::Pressure(PressureUnit::Pascal),
            QuantityKind::Length => Unit::Length(LengthUnit::Meter),
            QuantityKind::FlowRate => Unit::FlowRate(FlowRateUnit::CubicMeterPerSecond),
        }
    }

    /// 해당 물리량이 지원하는 모든 단위.
    pub fn units(self) -> Vec<Unit> {
        match self {
            QuantityKind::Temperature => {
                TemperatureUnit::ALL.iter().copied().map(Unit::Temperature).collect()
            }
            QuantityKind::Pressure => PressureUnit::ALL.iter().copied().map(Unit::Pressure).collect(),
            QuantityKind::Length => LengthUnit::ALL.iter().copied().map(Unit::Length).collect(),
            QuantityKind::FlowRate => FlowRateUnit::ALL.iter().copied().map(Unit::FlowRate).collect(),
        }
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 물리량 종류와 묶인 단위 태그.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Temperature(TemperatureUnit),
    Pressure(PressureUnit),
    Length(LengthUnit),
    FlowRate(FlowRateUnit),
}

impl Unit {
    pub fn kind(self) -> QuantityKind {
        match self {
            Unit::Temperature(_) => QuantityKind::Temperature,
            Unit::Pressure(_) => QuantityKind::Pressure,
            Unit::Length(_) => QuantityKind::Length,
            Unit::FlowRate(_) => QuantityKind::FlowRate,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Temperature(u) => u.symbol(),
            Unit::Pressure(u) => u.symbol(),
            Unit::Length(u) => u.symbol(),
            Unit::FlowRate(u) => u.symbol(),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// 단위가 붙은 스칼라 값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitQuantity {
    pub value: f64,
    pub unit: Unit,
}

impl UnitQuantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn kind(&self) -> QuantityKind {
        self.unit.kind()
    }
}

impl fmt::Display for UnitQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
