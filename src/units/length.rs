use serde::{Deserialize, Serialize};

/// 길이 단위. 내부 기준은 미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Meter,
    Centimeter,
    Millimeter,
    Kilometer,
    Inch,
    Foot,
    Yard,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 7] = [
        LengthUnit::Meter,
        LengthUnit::Centimeter,
        LengthUnit::Millimeter,
        LengthUnit::Kilometer,
        LengthUnit::Inch,
        LengthUnit::Foot,
        LengthUnit::Yard,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Meter => "m",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Millimeter => "mm",
            LengthUnit::Kilometer => "km",
            LengthUnit::Inch => "in",
            LengthUnit::Foot => "ft",
            LengthUnit::Yard => "yd",
        }
    }
}

fn to_meter(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Meter => value,
        LengthUnit::Centimeter => value / 100.0,
        LengthUnit::Millimeter => value / 1000.0,
        LengthUnit::Kilometer => value * 1000.0,
        LengthUnit::Inch => value * 0.0254,
        LengthUnit::Foot => value * 0.3048,
        LengthUnit::Yard => value * 0.9144,
    }
}

fn from_meter(value_m: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Meter => value_m,
        LengthUnit::Centimeter => value_m * 100.0,
        LengthUnit::Millimeter => value_m * 1000.0,
        LengthUnit::Kilometer => value_m / 1000.0,
        LengthUnit::Inch => value_m / 0.0254,
        LengthUnit::Foot => value_m / 0.3048,
        LengthUnit::Yard => value_m / 0.9144,
    }
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    let m = to_meter(value, from);
    from_meter(m, to)
}
