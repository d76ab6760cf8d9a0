use serde::{Deserialize, Serialize};

/// 미국 갤런/분 → m³/s.
const M3S_PER_GPM: f64 = 0.000_063_09;

/// 체적 유량 단위. 내부 기준은 m³/s 이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowRateUnit {
    CubicMeterPerSecond,
    CubicMeterPerHour,
    LiterPerSecond,
    LiterPerMinute,
    GallonPerMinute,
}

impl FlowRateUnit {
    pub const ALL: [FlowRateUnit; 5] = [
        FlowRateUnit::CubicMeterPerSecond,
        FlowRateUnit::CubicMeterPerHour,
        FlowRateUnit::LiterPerSecond,
        FlowRateUnit::LiterPerMinute,
        FlowRateUnit::GallonPerMinute,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            FlowRateUnit::CubicMeterPerSecond => "m³/s",
            FlowRateUnit::CubicMeterPerHour => "m³/h",
            FlowRateUnit::LiterPerSecond => "L/s",
            FlowRateUnit::LiterPerMinute => "L/min",
            FlowRateUnit::GallonPerMinute => "gpm",
        }
    }
}

fn to_m3_per_s(value: f64, unit: FlowRateUnit) -> f64 {
    match unit {
        FlowRateUnit::CubicMeterPerSecond => value,
        FlowRateUnit::CubicMeterPerHour => value / 3600.0,
        FlowRateUnit::LiterPerSecond => value / 1000.0,
        FlowRateUnit::LiterPerMinute => value / 60_000.0,
        FlowRateUnit::GallonPerMinute => value * M3S_PER_GPM,
    }
}

fn from_m3_per_s(value: f64, unit: FlowRateUnit) -> f64 {
    match unit {
        FlowRateUnit::CubicMeterPerSecond => value,
        FlowRateUnit::CubicMeterPerHour => value * 3600.0,
        FlowRateUnit::LiterPerSecond => value * 1000.0,
        FlowRateUnit::LiterPerMinute => value * 60_000.0,
        FlowRateUnit::GallonPerMinute => value / M3S_PER_GPM,
    }
}

/// 체적 유량을 변환한다.
pub fn convert_flow_rate(value: f64, from: FlowRateUnit, to: FlowRateUnit) -> f64 {
    let base = to_m3_per_s(value, from);
    from_m3_per_s(base, to)
}
