//! 지표 파이프라인 통합 테스트
//!
//! 정규화된 스냅샷 위에서 이동평균과 KDJ 교차 감지가 함께 도는지 검증

use xTicker::indicators::moving_averages::{exact_window_sma, lenient_sma};
use xTicker::indicators::oscillators::{compute_kdj, has_kdj_death_cross, has_kdj_golden_cross};
use xTicker::indicators::volume::attribute_volume;
use xTicker::market_data::client::KlinePayload;
use xTicker::market_data::normalizer::normalize_klines;

fn kline_payload_from_closes(closes: &[f64]) -> KlinePayload {
  let klines = closes
    .iter()
    .enumerate()
    .map(|(i, c)| format!("bar-{},{:.2},{:.2},{:.2},{:.2},1000", i, c, c, c - 0.5, c + 0.5))
    .collect();

  KlinePayload {
    name: "테스트종목".to_string(),
    klines,
  }
}

#[test]
fn test_snapshot_ma_matches_direct_computation() {
  let closes: Vec<f64> = (1..=30).map(|i| i as f64).collect();
  let snap = normalize_klines("600519", &kline_payload_from_closes(&closes)).unwrap();

  let expected = exact_window_sma(&closes, 5);
  let ma5 = snap.moving_average(5).unwrap();
  for (a, e) in ma5.iter().zip(expected.iter()) {
    if e.is_nan() {
      assert!(a.is_nan());
    } else {
      assert!((a - e).abs() < 1e-9);
    }
  }
}

#[test]
fn test_kdj_cross_detection_on_snapshot() {
  // 하락 후 반등: 마지막 두 점에서 골든 크로스
  let mut closes: Vec<f64> = (0..15).map(|i| 30.0 - i as f64).collect();
  closes.push(17.5);
  closes.push(19.0);

  let snap = normalize_klines("600519", &kline_payload_from_closes(&closes)).unwrap();
  assert!(has_kdj_golden_cross(&snap.prices, &snap.highs, &snap.lows));
  assert!(!has_kdj_death_cross(&snap.prices, &snap.highs, &snap.lows));
}

#[test]
fn test_kdj_series_stays_in_band() {
  let closes: Vec<f64> = (0..60).map(|i| 50.0 + ((i as f64) * 0.4).sin() * 10.0).collect();
  let highs: Vec<f64> = closes.iter().map(|c| c + 1.0).collect();
  let lows: Vec<f64> = closes.iter().map(|c| c - 1.0).collect();

  let series = compute_kdj(&closes, &highs, &lows);
  for i in 0..closes.len() {
    assert!(series.k[i] >= 0.0 && series.k[i] <= 100.0, "k[{}] = {}", i, series.k[i]);
    assert!(series.d[i] >= 0.0 && series.d[i] <= 100.0, "d[{}] = {}", i, series.d[i]);
  }
}

#[test]
fn test_lenient_and_exact_agree_on_full_windows() {
  // 갭이 없으면 윈도우가 다 찬 구간에서 두 알고리즘이 일치해야 한다
  let series: Vec<f64> = (1..=20).map(|i| (i * i) as f64).collect();
  let lenient = lenient_sma(&series, 5);
  let exact = exact_window_sma(&series, 5);

  for i in 4..series.len() {
    assert!((lenient[i] - exact[i]).abs() < 1e-9, "index {}", i);
  }
  // 워밍업 구간은 관대한 쪽만 값이 있다
  assert!(!lenient[0].is_nan());
  assert!(exact[0].is_nan());
}

#[test]
fn test_attribution_conserves_volume() {
  let prices = [10.0, 10.5, f64::NAN, 10.2, 10.2, 11.0];
  let volumes = [100.0, 200.0, 300.0, 400.0, 500.0, 600.0];
  let (buy, sell) = attribute_volume(&prices, &volumes);

  for i in 0..volumes.len() {
    assert!((buy[i] + sell[i] - volumes[i]).abs() < 1e-9, "index {}", i);
  }
}
