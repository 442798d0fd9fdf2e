//! 로깅 유틸리티
//!
//! 로그 초기화 및 유틸리티 함수 제공

use env_logger::Builder;
use log::LevelFilter;
use std::env;

use crate::error::TickerError;

/// 로깅 시스템 초기화
pub fn init() -> Result<(), TickerError> {
    let mut builder = Builder::from_default_env();

    // RUST_LOG 환경변수 확인
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    // 로그 레벨 파싱
    let level_filter = match log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    builder
      .filter_level(level_filter)
      .format_timestamp_millis()
      .init();

    log::info!("로깅 시스템 초기화 완료: 레벨 = {}", log_level);

    Ok(())
}

/// 모니터링 시작 로그
pub fn log_monitor_start(code: &str, period: &str) {
    log::info!("모니터링 시작: {} - 주기: {}", code, period);
}

/// 모니터링 종료 로그
pub fn log_monitor_stop(code: &str) {
    log::info!("모니터링 종료: {}", code);
}

/// 시세 조회 실패 로그 (루프는 계속 진행)
pub fn log_fetch_skipped(code: &str, error: &TickerError) {
    log::warn!("시세 조회 실패, 다음 주기로 건너뜀 - {}: {}", code, error);
}

/// 오류 로그
pub fn log_error(context: &str, error: &TickerError) {
    log::error!("오류 발생 - {}: {}", context, error);
}
