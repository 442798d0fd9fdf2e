/**
* filename : mod
* author : HAMA
* date: 2025. 6. 15.
* description:
**/

pub mod mailbox;

pub use mailbox::Mailbox;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};
use tokio::sync::watch;
use tokio::time::{sleep, Duration};

use crate::config::MonitorConfig;
use crate::error::TickerError;
use crate::indicators::oscillators::{has_kdj_death_cross, has_kdj_golden_cross, KDJ_MIN_LEN};
use crate::market_data::calendar::{self, TradingCalendar};
use crate::market_data::client::QuoteSource;
use crate::market_data::normalizer;
use crate::market_data::symbol::to_secid;
use crate::models::market::{ChartPeriod, MarketKind};
use crate::models::snapshot::StockSnapshot;
use crate::utils::logging;

/// 취소 신호 확인 간격. 대기는 이 간격의 서브 대기로 쪼개진다
const CANCEL_POLL: Duration = Duration::from_millis(100);

/// 모니터가 소비측에 알리는 이벤트
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
  /// 사용자에게 보여줄 상태 텍스트
  Status(String),
  /// KDJ 골든 크로스 감지
  GoldenCross { code: String, time: String },
  /// KDJ 데드 크로스 감지
  DeathCross { code: String, time: String },
}

pub type EventCallback = Arc<dyn Fn(MonitorEvent) + Send + Sync>;

/// 시작 모드: 장중이면 연속 폴링, 장외면 1회 조회로 대체
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartMode {
  Continuous,
  Once,
}

/// 시작 요청 검증.
///
/// 빈 코드는 거부한다. 장외 시각의 분시 요청은 개장 전이면 거부하고,
/// 그 외(장 마감 후 등)에는 1회 조회 모드로 대체한다.
fn validate_start(
  code: &str,
  market: MarketKind,
  period: ChartPeriod,
  now: NaiveDateTime,
) -> Result<StartMode, TickerError> {
  if code.trim().is_empty() {
    return Err(TickerError::InvalidParameter("Please enter a stock code".to_string()));
  }

  if calendar::is_trading_time(market, now) {
    return Ok(StartMode::Continuous);
  }

  if period.is_intraday() {
    if let Some(open) = calendar::session_open(market, now.date()) {
      if now < open {
        return Err(TickerError::OutsideTradingHours);
      }
    }
  }

  Ok(StartMode::Once)
}

/// 주식 시세 모니터.
///
/// 시작 시 주 폴링 태스크와(분시 연속 모드에서는) KDJ 감시 태스크를 띄우고,
/// 각 주기의 결과를 용량 1 메일박스로 발행한다. 중지는 watch 채널로
/// 협조적으로 이루어지며, 루프는 매 서브 대기마다 신호를 확인한다.
pub struct StockMonitor {
  source: Arc<dyn QuoteSource>,
  events: EventCallback,
  fetch_interval: Duration,
  kdj_interval: Duration,
  mailbox: Arc<Mailbox<StockSnapshot>>,
  running: Arc<AtomicBool>,
  cancel: Option<watch::Sender<bool>>,
  kdj_cancel: Option<watch::Sender<bool>>,
}

impl StockMonitor {
  pub fn new(source: Arc<dyn QuoteSource>, config: &MonitorConfig, events: EventCallback) -> Self {
    StockMonitor::with_intervals(
      source,
      events,
      Duration::from_secs(config.fetch_interval_secs),
      Duration::from_secs(config.kdj_interval_secs),
    )
  }

  /// 임의 주기를 직접 지정하는 생성자
  pub fn with_intervals(
    source: Arc<dyn QuoteSource>,
    events: EventCallback,
    fetch_interval: Duration,
    kdj_interval: Duration,
  ) -> Self {
    StockMonitor {
      source,
      events,
      fetch_interval,
      kdj_interval,
      mailbox: Arc::new(Mailbox::new()),
      running: Arc::new(AtomicBool::new(false)),
      cancel: None,
      kdj_cancel: None,
    }
  }

  pub fn is_running(&self) -> bool {
    self.running.load(Ordering::SeqCst)
  }

  /// 최신 스냅샷 드레인 (비차단). 새로 발행된 값이 없으면 None
  pub fn try_latest(&self) -> Option<StockSnapshot> {
    self.mailbox.try_take()
  }

  /// 모니터링 시작 (현재 시각 기준으로 거래 시간 검증)
  pub fn start(
    &mut self,
    code: &str,
    market: MarketKind,
    period: ChartPeriod,
    date: NaiveDate,
  ) -> Result<(), TickerError> {
    self.start_at(code, market, period, date, Local::now().naive_local())
  }

  /// 기준 시각을 주입할 수 있는 시작 경로
  pub fn start_at(
    &mut self,
    code: &str,
    market: MarketKind,
    period: ChartPeriod,
    date: NaiveDate,
    now: NaiveDateTime,
  ) -> Result<(), TickerError> {
    let mode = match validate_start(code, market, period, now) {
      Ok(mode) => mode,
      Err(e) => {
        (*self.events)(MonitorEvent::Status(format!("Error: {}", e)));
        return Err(e);
      }
    };

    // 재시작 안전: 이전 실행을 먼저 취소하고, 메일박스와 실행 플래그를
    // 새로 만들어 이전 실행의 잔여 발행이 섞여 들지 못하게 한다
    self.stop();
    let mailbox = Arc::new(Mailbox::new());
    self.mailbox = mailbox.clone();
    let running = Arc::new(AtomicBool::new(true));
    self.running = running.clone();

    let (cancel_tx, cancel_rx) = watch::channel(false);
    self.cancel = Some(cancel_tx);

    let secid = to_secid(code, market);
    let calendar = Arc::new(TradingCalendar::build(market, date));

    logging::log_monitor_start(code, &period.to_string());
    (*self.events)(MonitorEvent::Status(format!("Monitoring {}", code)));

    {
      let source = self.source.clone();
      let code = code.to_string();
      let secid = secid.clone();
      let interval = self.fetch_interval;
      tokio::spawn(fetch_loop(
        source, code, secid, period, date, calendar, mailbox, interval, mode, running, cancel_rx,
      ));
    }

    // 분시 연속 모드에서만 KDJ 감시 루프를 띄운다
    if period.is_intraday() && mode == StartMode::Continuous {
      let (kdj_tx, kdj_rx) = watch::channel(false);
      self.kdj_cancel = Some(kdj_tx);

      let source = self.source.clone();
      let events = self.events.clone();
      let code = code.to_string();
      let interval = self.kdj_interval;
      tokio::spawn(kdj_watch_loop(source, code, secid, date, interval, events, kdj_rx));
    }

    Ok(())
  }

  /// 모니터링 중지. 유휴 상태면 아무 일도 하지 않는다
  pub fn stop(&mut self) {
    if let Some(tx) = self.cancel.take() {
      let _ = tx.send(true);
    }
    if let Some(tx) = self.kdj_cancel.take() {
      let _ = tx.send(true);
    }
    self.running.store(false, Ordering::SeqCst);
  }
}

/// 한 주기의 조회 + 정규화 파이프라인
async fn fetch_snapshot(
  source: &dyn QuoteSource,
  code: &str,
  secid: &str,
  period: ChartPeriod,
  date: NaiveDate,
  calendar: &TradingCalendar,
) -> Result<StockSnapshot, TickerError> {
  if period.is_intraday() {
    let payload = source.fetch_trends(secid, date).await?;
    normalizer::normalize_intraday(code, &payload, calendar)
  } else {
    let payload = source.fetch_klines(secid, period, date).await?;
    normalizer::normalize_klines(code, &payload)
  }
}

async fn fetch_loop(
  source: Arc<dyn QuoteSource>,
  code: String,
  secid: String,
  period: ChartPeriod,
  date: NaiveDate,
  calendar: Arc<TradingCalendar>,
  mailbox: Arc<Mailbox<StockSnapshot>>,
  interval: Duration,
  mode: StartMode,
  running: Arc<AtomicBool>,
  cancel: watch::Receiver<bool>,
) {
  loop {
    if *cancel.borrow() {
      break;
    }

    match fetch_snapshot(source.as_ref(), &code, &secid, period, date, &calendar).await {
      Ok(snapshot) => {
        // 취소된 실행은 다음 실행의 메일박스에 발행하면 안 된다
        if *cancel.borrow() {
          break;
        }
        mailbox.publish(snapshot);
      }
      // 조회 실패는 이번 주기만 건너뛴다
      Err(e) => logging::log_fetch_skipped(&code, &e),
    }

    if mode == StartMode::Once {
      break;
    }

    // 취소 지연이 서브 대기 한 번을 넘지 않도록 짧게 쪼개서 기다린다
    let mut waited = Duration::ZERO;
    while waited < interval {
      if *cancel.borrow() {
        running.store(false, Ordering::SeqCst);
        return;
      }
      sleep(CANCEL_POLL).await;
      waited += CANCEL_POLL;
    }
  }

  running.store(false, Ordering::SeqCst);
  logging::log_monitor_stop(&code);
}

/// 일봉 스냅샷으로 KDJ 교차만 검사하는 저주기 감시 루프 (먼저 기다린 뒤 조회)
async fn kdj_watch_loop(
  source: Arc<dyn QuoteSource>,
  code: String,
  secid: String,
  date: NaiveDate,
  interval: Duration,
  events: EventCallback,
  cancel: watch::Receiver<bool>,
) {
  loop {
    let mut waited = Duration::ZERO;
    while waited < interval {
      if *cancel.borrow() {
        return;
      }
      sleep(CANCEL_POLL).await;
      waited += CANCEL_POLL;
    }

    let result = match source.fetch_klines(&secid, ChartPeriod::DailyK, date).await {
      Ok(payload) => normalizer::normalize_klines(&code, &payload),
      Err(e) => Err(e),
    };

    match result {
      Ok(snapshot) => {
        if let Some(event) = check_kdj_cross(&code, &snapshot) {
          (*events)(event);
        }
      }
      Err(e) => (*events)(MonitorEvent::Status(format!("KDJ check error: {}", e))),
    }
  }
}

/// 스냅샷에서 KDJ 교차 신호를 뽑아낸다. 시리즈가 짧으면 신호 없음
fn check_kdj_cross(code: &str, snapshot: &StockSnapshot) -> Option<MonitorEvent> {
  if snapshot.prices.len() < KDJ_MIN_LEN {
    return None;
  }

  let time = Local::now().format("%H:%M:%S").to_string();
  if has_kdj_golden_cross(&snapshot.prices, &snapshot.highs, &snapshot.lows) {
    Some(MonitorEvent::GoldenCross { code: code.to_string(), time })
  } else if has_kdj_death_cross(&snapshot.prices, &snapshot.highs, &snapshot.lows) {
    Some(MonitorEvent::DeathCross { code: code.to_string(), time })
  } else {
    None
  }
}
