//! 주식 시세 모니터링 라이브러리
//!
//! 원격 시세 소스를 주기적으로 폴링하여 거래 시간 그리드에 정렬된
//! 스냅샷과 기술적 지표(이동평균, KDJ)를 생성하는 파이프라인입니다.

pub mod config;
pub mod error;
pub mod indicators;
pub mod market_data;
pub mod models;
pub mod monitor;
pub mod utils;

// 핵심 타입 재노출
pub use crate::error::TickerError;
pub use crate::models::market::{ChartPeriod, MarketKind};
pub use crate::models::snapshot::StockSnapshot;
pub use crate::market_data::calendar::TradingCalendar;
pub use crate::market_data::client::QuoteSource;
pub use crate::monitor::{MonitorEvent, StockMonitor};

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, TickerError>;
