use thiserror::Error;

use crate::quantity::{QuantityKind, Unit, UnitQuantity};
use crate::units::temperature::to_kelvin;
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("unknown {kind} unit: {unit}")]
    UnknownUnit { kind: QuantityKind, unit: String },
    /// 서로 다른 물리량 사이의 변환
    #[error("cannot convert {from} ({from_kind}) to {to} ({to_kind})")]
    UnsupportedPair {
        from: Unit,
        from_kind: QuantityKind,
        to: Unit,
        to_kind: QuantityKind,
    },
    /// NaN 또는 무한대 입력
    #[error("value is not a finite number: {0}")]
    NonFinite(f64),
    /// 절대영도 미만의 온도
    #[error("{value} {unit} is below absolute zero")]
    BelowAbsoluteZero { value: f64, unit: Unit },
}

/// 단위가 붙은 값을 목표 단위로 환산한다.
///
/// 두 단위는 같은 물리량이어야 하며, 온도는 절대영도 이상이어야 한다.
pub fn convert_quantity(quantity: UnitQuantity, to: Unit) -> Result<UnitQuantity, ConversionError> {
    if !quantity.value.is_finite() {
        return Err(ConversionError::NonFinite(quantity.value));
    }
    let value = quantity.value;
    let converted = match (quantity.unit, to) {
        (Unit::Temperature(from), Unit::Temperature(target)) => {
            if to_kelvin(value, from) < 0.0 {
                return Err(ConversionError::BelowAbsoluteZero {
                    value,
                    unit: quantity.unit,
                });
            }
            convert_temperature(value, from, target)
        }
        (Unit::Pressure(from), Unit::Pressure(target)) => convert_pressure(value, from, target),
        (Unit::Length(from), Unit::Length(target)) => convert_length(value, from, target),
        (Unit::FlowRate(from), Unit::FlowRate(target)) => convert_flow_rate(value, from, target),
        (from, to) => {
            return Err(ConversionError::UnsupportedPair {
                from,
                from_kind: from.kind(),
                to,
                to_kind: to.kind(),
            })
        }
    };
    Ok(UnitQuantity::new(converted, to))
}

/// 문자열로 전달된 단위명을 enum으로 변환한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `C`, `°F`, `kPa`, `mmHg`, `ft`, `L/min`, `gpm` 등을 사용할 수 있다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    let from = parse_unit(kind, from_unit_str)?;
    let to = parse_unit(kind, to_unit_str)?;
    convert_quantity(UnitQuantity::new(value, from), to).map(|q| q.value)
}

/// 물리량 종류를 기준으로 단위 문자열을 해석한다. 대소문자를 구분하지 않는다.
pub fn parse_unit(kind: QuantityKind, s: &str) -> Result<Unit, ConversionError> {
    let unit = match kind {
        QuantityKind::Temperature => parse_temperature_unit(s).map(Unit::Temperature),
        QuantityKind::Pressure => parse_pressure_unit(s).map(Unit::Pressure),
        QuantityKind::Length => parse_length_unit(s).map(Unit::Length),
        QuantityKind::FlowRate => parse_flow_rate_unit(s).map(Unit::FlowRate),
    };
    unit.ok_or_else(|| ConversionError::UnknownUnit {
        kind,
        unit: s.to_string(),
    })
}

fn parse_temperature_unit(s: &str) -> Option<TemperatureUnit> {
    match s.trim().to_lowercase().as_str() {
        "k" | "kelvin" => Some(TemperatureUnit::Kelvin),
        "c" | "celsius" | "°c" | "degc" => Some(TemperatureUnit::Celsius),
        "f" | "fahrenheit" | "°f" | "degf" => Some(TemperatureUnit::Fahrenheit),
        "r" | "rankine" | "°r" => Some(TemperatureUnit::Rankine),
        _ => None,
    }
}

fn parse_pressure_unit(s: &str) -> Option<PressureUnit> {
    match s.trim().to_lowercase().as_str() {
        "pa" | "pascal" => Some(PressureUnit::Pascal),
        "kpa" | "kilopascal" => Some(PressureUnit::KiloPascal),
        "mpa" | "megapascal" => Some(PressureUnit::MegaPascal),
        "mbar" | "millibar" => Some(PressureUnit::MilliBar),
        "bar" => Some(PressureUnit::Bar),
        "psi" => Some(PressureUnit::Psi),
        "atm" => Some(PressureUnit::Atm),
        "mmhg" | "torr" => Some(PressureUnit::MmHg),
        _ => None,
    }
}

fn parse_length_unit(s: &str) -> Option<LengthUnit> {
    match s.trim().to_lowercase().as_str() {
        "m" | "meter" | "metre" => Some(LengthUnit::Meter),
        "cm" => Some(LengthUnit::Centimeter),
        "mm" => Some(LengthUnit::Millimeter),
        "km" => Some(LengthUnit::Kilometer),
        "in" | "inch" => Some(LengthUnit::Inch),
        "ft" | "foot" | "feet" => Some(LengthUnit::Foot),
        "yd" | "yard" => Some(LengthUnit::Yard),
        _ => None,
    }
}

fn parse_flow_rate_unit(s: &str) -> Option<FlowRateUnit> {
    match s.trim().to_lowercase().as_str() {
        "m3/s" | "m³/s" | "m^3/s" => Some(FlowRateUnit::CubicMeterPerSecond),
        "m3/h" | "m³/h" | "m^3/h" => Some(FlowRateUnit::CubicMeterPerHour),
        "l/s" | "lps" => Some(FlowRateUnit::LiterPerSecond),
        "l/min" | "lpm" => Some(FlowRateUnit::LiterPerMinute),
        "gpm" | "gal/min" => Some(FlowRateUnit::GallonPerMinute),
        _ => None,
    }
}

/// UI 선택 목록용 단위 기호.
pub fn unit_options(kind: QuantityKind) -> Vec<&'static str> {
    kind.units().into_iter().map(Unit::symbol).collect()
}
