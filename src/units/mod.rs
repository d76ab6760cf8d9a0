//! 단위 정의 및 변환 모듈 모음.

pub mod flow_rate;
pub mod length;
pub mod pressure;
pub mod temperature;

pub use flow_rate::{convert_flow_rate, FlowRateUnit};
pub use length::{convert_length, LengthUnit};
pub use pressure::{convert_pressure, PressureUnit};
pub use temperature::{convert_temperature, TemperatureUnit};
