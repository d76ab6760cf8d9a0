//! 화학공학 공식 계산, 단위 변환, 파라메트릭 스터디 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod equations;
pub mod history;
pub mod quantity;
pub mod session;
pub mod sweep;
pub mod ui_cli;
pub mod units;
