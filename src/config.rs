use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::quantity::{QuantityKind, Unit};
use crate::sweep::{DEFAULT_MAX_STEPS, DEFAULT_STEPS};
use crate::units::*;

/// 설정 파일 기본 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 사용 가능한 단위 시스템 프리셋을 정의한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    /// SI (°C, Pa, m, m³/s)
    SI,
    /// 영국식/야드파운드법
    Imperial,
}

impl UnitSystem {
    /// 프리셋에 해당하는 기본 단위.
    pub fn default_units(self) -> DefaultUnits {
        match self {
            UnitSystem::SI => DefaultUnits::default(),
            UnitSystem::Imperial => DefaultUnits {
                temperature: TemperatureUnit::Fahrenheit,
                pressure: PressureUnit::Psi,
                length: LengthUnit::Foot,
                flow_rate: FlowRateUnit::GallonPerMinute,
            },
        }
    }
}

/// 각 물리량별 기본 단위 설정을 담는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultUnits {
    pub temperature: TemperatureUnit,
    pub pressure: PressureUnit,
    pub length: LengthUnit,
    pub flow_rate: FlowRateUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self {
            temperature: TemperatureUnit::Celsius,
            pressure: PressureUnit::Pascal,
            length: LengthUnit::Meter,
            flow_rate: FlowRateUnit::CubicMeterPerSecond,
        }
    }
}

impl DefaultUnits {
    pub fn for_kind(&self, kind: QuantityKind) -> Unit {
        match kind {
            QuantityKind::Temperature => Unit::Temperature(self.temperature),
            QuantityKind::Pressure => Unit::Pressure(self.pressure),
            QuantityKind::Length => Unit::Length(self.length),
            QuantityKind::FlowRate => Unit::FlowRate(self.flow_rate),
        }
    }
}

/// 계산 이력 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// 보관할 최대 항목 수. 0이면 제한 없음.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// 파라메트릭 스터디 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub default_steps: usize,
    pub max_steps: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            default_steps: DEFAULT_STEPS,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// 결과 표시 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// 소수점 이하 자릿수
    pub precision: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { precision: 6 }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub unit_system: UnitSystem,
    /// `RUST_LOG`가 없을 때 쓰는 tracing 필터
    pub log_level: String,
    pub default_units: DefaultUnits,
    pub history: HistoryConfig,
    pub sweep: SweepConfig,
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::SI,
            log_level: "warn".to_string(),
            default_units: DefaultUnits::default(),
            history: HistoryConfig::default(),
            sweep: SweepConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("config file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 값은 읽혔으나 의미가 맞지 않음
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg = Config::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        tracing::debug!(path = %path.display(), "wrote default config");
        Ok(cfg)
    }
}

impl Config {
    /// TOML 문자열을 읽고 값을 검증한다. 빠진 항목은 기본값으로 채운다.
    pub fn from_toml_str(content: &str) -> Result<Config, ConfigError> {
        let cfg: Config = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// 단위 시스템을 바꾸고 기본 단위를 프리셋으로 덮어쓴다.
    pub fn apply_unit_system(&mut self, system: UnitSystem) {
        self.unit_system = system;
        self.default_units = system.default_units();
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sweep.max_steps == 0 {
            return Err(ConfigError::Invalid("sweep.max_steps must be at least 1"));
        }
        if self.sweep.default_steps == 0 || self.sweep.default_steps > self.sweep.max_steps {
            return Err(ConfigError::Invalid(
                "sweep.default_steps must be between 1 and sweep.max_steps",
            ));
        }
        if self.display.precision > 15 {
            return Err(ConfigError::Invalid("display.precision must not exceed 15"));
        }
        Ok(())
    }
}
