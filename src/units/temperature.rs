use serde::{Deserialize, Serialize};

/// 절대영도 [°C].
pub const ABSOLUTE_ZERO_C: f64 = -273.15;

/// 온도 단위를 정의한다. 내부 기준은 켈빈이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Kelvin,
    Fahrenheit,
    Rankine,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 4] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Kelvin,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Rankine,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Kelvin => "K",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Rankine => "R",
        }
    }
}

/// 주어진 값을 켈빈으로 변환한다.
pub fn to_kelvin(value: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Kelvin => value,
        TemperatureUnit::Celsius => value + 273.15,
        TemperatureUnit::Fahrenheit => (value + 459.67) * 5.0 / 9.0,
        TemperatureUnit::Rankine => value * 5.0 / 9.0,
    }
}

/// 켈빈 값을 원하는 단위로 변환한다.
pub fn from_kelvin(value_k: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Kelvin => value_k,
        TemperatureUnit::Celsius => value_k - 273.15,
        TemperatureUnit::Fahrenheit => value_k * 9.0 / 5.0 - 459.67,
        TemperatureUnit::Rankine => value_k * 9.0 / 5.0,
    }
}

/// 온도를 서로 다른 단위로 변환한다. 오프셋이 있는 아핀 변환이다.
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    let k = to_kelvin(value, from);
    from_kelvin(k, to)
}
