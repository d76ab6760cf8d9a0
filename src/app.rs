use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::Level;

use crate::config::ConfigError;
use crate::conversion::ConversionError;
use crate::equations::EquationError;
use crate::session::Session;
use crate::sweep::SweepError;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// 단위 변환 오류
    #[error("unit conversion error: {0}")]
    Conversion(#[from] ConversionError),
    /// 공식 계산 오류
    #[error("calculation error: {0}")]
    Equation(#[from] EquationError),
    /// 파라메트릭 스터디 오류
    #[error("parametric study error: {0}")]
    Sweep(#[from] SweepError),
    /// 단위 변환이 불가능한 파라미터에 다른 단위가 붙음
    #[error("parameter '{param}' does not accept unit '{unit}' (expected '{expected}')")]
    UnitNotAccepted {
        param: &'static str,
        unit: String,
        expected: &'static str,
    },
    /// 형식이 잘못된 사용자 입력
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// 사용자가 지정한 경로에 결과 파일을 쓰지 못함
    #[error("could not write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 변경한 설정을 파일에 저장하지 못함
    #[error("could not save settings to {}: {source}", path.display())]
    SettingsNotSaved {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

impl AppError {
    /// 입력을 고치면 다시 시도할 수 있는 오류인지.
    ///
    /// 표준 입출력 오류와 설정 로드 오류만 대화형 세션을 끝낸다.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, AppError::Io(_) | AppError::Config(_))
    }
}

/// tracing 구독자를 설치한다. `RUST_LOG`가 있으면 그 레벨을, 없으면 `default_level`을 쓴다.
///
/// 알 수 없는 레벨 문자열은 `warn`으로 본다.
pub fn init_tracing(default_level: &str) {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.trim().parse::<Level>().ok())
        .or_else(|| default_level.trim().parse::<Level>().ok())
        .unwrap_or(Level::WARN);
    // 이미 설치된 경우(테스트 등)는 무시한다
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// CLI 대화형 모드의 메인 루프를 실행한다.
///
/// 입력 오류와 파일 저장 실패는 메시지만 출력하고 메뉴로 돌아간다. 표준 입출력 오류는 호출자에게 전달한다.
pub fn run(session: &mut Session, config_path: &Path) -> Result<(), AppError> {
    loop {
        let outcome = match ui_cli::main_menu(session)? {
            MenuChoice::Calculator => ui_cli::handle_calculator(session),
            MenuChoice::UnitConversion => ui_cli::handle_unit_conversion(session),
            MenuChoice::ParametricStudy => ui_cli::handle_parametric_study(session),
            MenuChoice::History => ui_cli::handle_history(session),
            MenuChoice::Settings => ui_cli::handle_settings(session, config_path),
            MenuChoice::Exit => {
                println!("Bye.");
                break;
            }
        };
        match outcome {
            Ok(()) => {}
            Err(e) if e.is_user_error() => println!("Error: {e}"),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
