//! 스냅샷 정규화 테스트
//!
//! 그리드 정렬, 결측 센티넬, 거래량 분배, K선 투영 검증

use chrono::NaiveDate;

use xTicker::market_data::calendar::TradingCalendar;
use xTicker::market_data::client::{KlinePayload, TrendsPayload};
use xTicker::market_data::normalizer::{normalize_intraday, normalize_klines};
use xTicker::models::market::MarketKind;
use xTicker::models::snapshot::MA_WINDOWS;

fn calendar() -> TradingCalendar {
  TradingCalendar::build(MarketKind::StockA, NaiveDate::from_ymd_opt(2025, 6, 11).unwrap())
}

/// 분시 행 구성: time,open,price,high,low,volume,amount,avg
fn trend_row(time: &str, price: &str, volume: &str, avg: &str) -> String {
  format!("{},0,{},0,0,{},0,{}", time, price, volume, avg)
}

fn trends(rows: Vec<String>, pre_close: Option<f64>) -> TrendsPayload {
  TrendsPayload {
    name: "테스트종목".to_string(),
    pre_close,
    trends: rows,
  }
}

#[test]
fn test_intraday_arrays_match_calendar_length() {
  let cal = calendar();
  let payload = trends(
    vec![trend_row("2025-06-11 09:30", "10.0", "100", "10.0")],
    Some(10.0),
  );

  let snap = normalize_intraday("600519", &payload, &cal).unwrap();
  assert_eq!(snap.prices.len(), cal.len());
  assert_eq!(snap.avg_prices.len(), cal.len());
  assert_eq!(snap.volumes.len(), cal.len());
  assert_eq!(snap.buy_volumes.len(), cal.len());
  assert_eq!(snap.sell_volumes.len(), cal.len());
}

#[test]
fn test_unmatched_slots_are_missing_not_zero() {
  let cal = calendar();
  let payload = trends(
    vec![trend_row("2025-06-11 09:30", "10.0", "100", "10.0")],
    Some(10.0),
  );

  let snap = normalize_intraday("600519", &payload, &cal).unwrap();
  assert_eq!(snap.prices[0], 10.0);
  // 표본이 없는 슬롯: 가격류는 NaN, 거래량만 0
  assert!(snap.prices[1].is_nan());
  assert!(snap.avg_prices[1].is_nan());
  assert_eq!(snap.volumes[1], 0.0);
}

#[test]
fn test_off_grid_sample_discarded() {
  let cal = calendar();
  let payload = trends(
    vec![
      trend_row("2025-06-11 09:30", "10.0", "100", "10.0"),
      trend_row("2025-06-11 12:00", "99.0", "999", "99.0"), // 점심 시간, 그리드 밖
    ],
    Some(10.0),
  );

  let snap = normalize_intraday("600519", &payload, &cal).unwrap();
  assert!(!snap.prices.contains(&99.0));
  let total: f64 = snap.volumes.iter().sum();
  assert_eq!(total, 100.0);
}

#[test]
fn test_volume_attribution_by_direction() {
  let cal = calendar();
  let payload = trends(
    vec![
      trend_row("2025-06-11 09:30", "10.0", "100", "10.0"),
      trend_row("2025-06-11 09:31", "11.0", "200", "10.5"), // 상승
      trend_row("2025-06-11 09:32", "10.5", "300", "10.4"), // 하락
      trend_row("2025-06-11 09:33", "10.5", "400", "10.4"), // 보합
    ],
    Some(10.0),
  );

  let snap = normalize_intraday("600519", &payload, &cal).unwrap();
  // 첫 슬롯은 기준이 없으므로 절반씩
  assert_eq!(snap.buy_volumes[0], 50.0);
  assert_eq!(snap.sell_volumes[0], 50.0);
  assert_eq!(snap.buy_volumes[1], 200.0);
  assert_eq!(snap.sell_volumes[1], 0.0);
  assert_eq!(snap.buy_volumes[2], 0.0);
  assert_eq!(snap.sell_volumes[2], 300.0);
  assert_eq!(snap.buy_volumes[3], 200.0);
  assert_eq!(snap.sell_volumes[3], 200.0);
}

#[test]
fn test_change_percent_from_pre_close() {
  let cal = calendar();
  let payload = trends(
    vec![
      trend_row("2025-06-11 09:30", "10.0", "100", "10.0"),
      trend_row("2025-06-11 09:31", "11.0", "200", "10.5"),
    ],
    Some(10.0),
  );

  let snap = normalize_intraday("600519", &payload, &cal).unwrap();
  assert_eq!(snap.current_price, 11.0);
  let change = snap.change_percent.unwrap();
  assert!((change - 10.0).abs() < 1e-9);
}

#[test]
fn test_missing_pre_close_yields_no_change_percent() {
  let cal = calendar();
  let payload = trends(
    vec![trend_row("2025-06-11 09:30", "10.0", "100", "10.0")],
    None,
  );

  let snap = normalize_intraday("600519", &payload, &cal).unwrap();
  assert!(snap.change_percent.is_none());
}

#[test]
fn test_unparsable_price_becomes_missing() {
  let cal = calendar();
  let payload = trends(
    vec![
      trend_row("2025-06-11 09:30", "abc", "100", "xyz"),
      trend_row("2025-06-11 09:31", "11.0", "bad", "10.5"),
    ],
    Some(10.0),
  );

  let snap = normalize_intraday("600519", &payload, &cal).unwrap();
  assert!(snap.prices[0].is_nan());
  assert!(snap.avg_prices[0].is_nan());
  assert_eq!(snap.volumes[0], 100.0);
  // 거래량 파싱 실패는 0
  assert_eq!(snap.volumes[1], 0.0);
  assert_eq!(snap.prices[1], 11.0);
}

#[test]
fn test_short_row_skipped_entirely() {
  let cal = calendar();
  let payload = trends(
    vec![
      "2025-06-11 09:30,1,2".to_string(), // 필드 부족
      trend_row("2025-06-11 09:31", "11.0", "200", "10.5"),
    ],
    Some(10.0),
  );

  let snap = normalize_intraday("600519", &payload, &cal).unwrap();
  assert!(snap.prices[0].is_nan());
  assert_eq!(snap.prices[1], 11.0);
}

#[test]
fn test_empty_payload_is_error() {
  let cal = calendar();
  let payload = trends(vec![], Some(10.0));
  assert!(normalize_intraday("600519", &payload, &cal).is_err());

  let only_bad = trends(vec!["1,2,3".to_string()], Some(10.0));
  assert!(normalize_intraday("600519", &only_bad, &cal).is_err());
}

#[test]
fn test_out_of_order_samples_still_pick_chronological_last() {
  let cal = calendar();
  let payload = trends(
    vec![
      trend_row("2025-06-11 09:32", "12.0", "300", "11.0"),
      trend_row("2025-06-11 09:30", "10.0", "100", "10.0"),
    ],
    Some(10.0),
  );

  let snap = normalize_intraday("600519", &payload, &cal).unwrap();
  assert_eq!(snap.current_price, 12.0);
}

// ---------------- K선 모드 ----------------

/// K선 행 구성: time,open,close,low,high,volume
fn kline_payload(rows: Vec<&str>) -> KlinePayload {
  KlinePayload {
    name: "테스트종목".to_string(),
    klines: rows.into_iter().map(|s| s.to_string()).collect(),
  }
}

#[test]
fn test_kline_projection() {
  let payload = kline_payload(vec![
    "2025-06-09,10.0,11.0,9.5,11.5,1000",
    "2025-06-10,11.0,12.0,10.5,12.5,2000",
  ]);

  let snap = normalize_klines("600519", &payload).unwrap();
  assert_eq!(snap.open, vec![10.0, 11.0]);
  assert_eq!(snap.prices, vec![11.0, 12.0]);
  assert_eq!(snap.lows, vec![9.5, 10.5]);
  assert_eq!(snap.highs, vec![11.5, 12.5]);
  assert_eq!(snap.volumes, vec![1000.0, 2000.0]);
  // 균가는 OHLC 평균
  assert!((snap.avg_prices[0] - 10.5).abs() < 1e-9);
  // K선 모드 매수/매도는 절반씩
  assert_eq!(snap.buy_volumes[1], 1000.0);
  assert_eq!(snap.sell_volumes[1], 1000.0);
}

#[test]
fn test_kline_change_percent_vs_previous_bar() {
  let payload = kline_payload(vec![
    "2025-06-09,10.0,10.0,9.5,10.5,1000",
    "2025-06-10,10.0,11.0,9.5,11.5,1000",
  ]);
  let snap = normalize_klines("600519", &payload).unwrap();
  assert!((snap.change_percent.unwrap() - 10.0).abs() < 1e-9);

  // 봉이 하나뿐이면 등락률 0
  let single = kline_payload(vec!["2025-06-10,10.0,11.0,9.5,11.5,1000"]);
  let snap = normalize_klines("600519", &single).unwrap();
  assert_eq!(snap.change_percent, Some(0.0));
}

#[test]
fn test_kline_moving_averages_precomputed() {
  let rows: Vec<String> = (1..=6)
    .map(|i| format!("2025-06-{:02},{}.0,{}.0,{}.0,{}.0,1000", i, i, i, i, i))
    .collect();
  let payload = KlinePayload {
    name: "테스트종목".to_string(),
    klines: rows,
  };

  let snap = normalize_klines("600519", &payload).unwrap();
  for window in MA_WINDOWS {
    let ma = snap.moving_average(window).unwrap();
    assert_eq!(ma.len(), 6);
  }

  // 종가 1..6 의 5일 엄격 윈도우: 인덱스 4 에서 3.0, 5 에서 4.0
  let ma5 = snap.moving_average(5).unwrap();
  assert!(ma5[3].is_nan());
  assert!((ma5[4] - 3.0).abs() < 1e-9);
  assert!((ma5[5] - 4.0).abs() < 1e-9);
}

#[test]
fn test_malformed_kline_row_dropped() {
  let payload = kline_payload(vec![
    "2025-06-09,10.0,11.0,9.5,11.5,1000",
    "2025-06-10,bad,12.0,10.5,12.5,2000", // 숫자 필드 파싱 실패
    "2025-06-11,12.0,13.0,11.5,13.5,3000",
  ]);

  let snap = normalize_klines("600519", &payload).unwrap();
  assert_eq!(snap.prices, vec![11.0, 13.0]);
}

#[test]
fn test_empty_klines_is_error() {
  let payload = kline_payload(vec![]);
  assert!(normalize_klines("600519", &payload).is_err());
}
