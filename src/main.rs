/**
* filename : main
* author : HAMA
* date: 2025. 6. 15.
* description:
**/

mod config;
mod error;
mod indicators;
mod market_data;
mod models;
mod monitor;
mod utils;

use std::sync::Arc;

use chrono::Local;
use tokio::time::Duration;

use crate::config::Config;
use crate::indicators::oscillators::{has_kdj_death_cross, has_kdj_golden_cross};
use crate::market_data::client::{EastmoneyClient, QuoteSource};
use crate::market_data::mocks::MockQuoteSource;
use crate::models::market::{ChartPeriod, MarketKind};
use crate::models::snapshot::StockSnapshot;
use crate::monitor::{EventCallback, MonitorEvent, StockMonitor};
use crate::utils::logging;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // 로깅 초기화
    logging::init()?;
    log::info!("주식 모니터링 시스템 시작...");

    // 설정 로드
    let config = Config::load()?;
    log::info!("설정 로드 완료");

    // 명령줄 인수: <종목코드> [시장: a|hk|us] [주기: intraday|daily|weekly|monthly|quarterly|yearly]
    let args: Vec<String> = std::env::args().collect();
    let code = args.get(1).cloned().unwrap_or_else(|| "600519".to_string());
    let market: MarketKind = match args.get(2) {
        Some(s) => s.parse()?,
        None => MarketKind::StockA,
    };
    let period: ChartPeriod = match args.get(3) {
        Some(s) => s.parse()?,
        None => ChartPeriod::Intraday,
    };

    let source: Arc<dyn QuoteSource> = if config.upstream.use_mock {
        log::info!("모의 시세 소스 사용");
        Arc::new(MockQuoteSource::new(market))
    } else {
        Arc::new(EastmoneyClient::new(config.upstream.clone())?)
    };

    // 상태/신호 이벤트는 로그와 표준 출력으로 내보낸다
    let events: EventCallback = Arc::new(|event| match event {
        MonitorEvent::Status(text) => log::info!("상태: {}", text),
        MonitorEvent::GoldenCross { code, time } => {
            println!("*************** {} KDJ 골든 크로스: {} ***************", time, code);
        }
        MonitorEvent::DeathCross { code, time } => {
            println!("*************** {} KDJ 데드 크로스: {} ***************", time, code);
        }
    });

    let mut monitor = StockMonitor::new(source, &config.monitor, events);
    monitor.start(&code, market, period, Local::now().date_naive())?;

    // 소비 루프: 고정 주기로 최신 스냅샷을 한 건씩만 드레인한다
    let mut drain = tokio::time::interval(Duration::from_secs(config.monitor.drain_interval_secs));
    loop {
        tokio::select! {
            _ = drain.tick() => {
                if let Some(snapshot) = monitor.try_latest() {
                    print_snapshot(&snapshot);
                    // K선 모드에서는 드레인한 스냅샷으로 바로 교차를 검사한다
                    if !period.is_intraday() {
                        check_cross(&snapshot);
                    }
                }
                // 1회 조회 모드는 발행 후 스스로 끝난다
                if !monitor.is_running() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("종료 신호 수신");
                break;
            }
        }
    }

    monitor.stop();
    Ok(())
}

fn check_cross(snapshot: &StockSnapshot) {
    if has_kdj_golden_cross(&snapshot.prices, &snapshot.highs, &snapshot.lows) {
        println!("*************** KDJ 골든 크로스: {} ***************", snapshot.code);
    } else if has_kdj_death_cross(&snapshot.prices, &snapshot.highs, &snapshot.lows) {
        println!("*************** KDJ 데드 크로스: {} ***************", snapshot.code);
    }
}

fn print_snapshot(snapshot: &StockSnapshot) {
    let change = snapshot
        .change_percent
        .map(|v| format!("{:.2}%", v))
        .unwrap_or_else(|| "--%".to_string());

    println!(
        "{} {}  현재가 {:.2}  등락률 {}  슬롯 {}",
        snapshot.code,
        snapshot.name,
        snapshot.current_price,
        change,
        snapshot.len(),
    );
}
