/**
* filename : calendar
* author : HAMA
* date: 2025. 6. 14.
* description:
**/

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::models::market::MarketKind;

/// 분 단위 시간 라벨 포맷
pub const TIME_LABEL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// 한 거래일의 분 단위 거래 시간 그리드.
///
/// 기준일과 시장 구분의 순수 함수로, 같은 입력이면 항상 같은 시퀀스를 만든다.
/// 라벨은 중복 없이 엄격하게 증가하며, 기준일이나 시장이 바뀌면 다시 만든다.
#[derive(Debug, Clone)]
pub struct TradingCalendar {
  market: MarketKind,
  date: NaiveDate,
  minutes: Vec<String>,
  index: HashMap<String, usize>,
}

impl TradingCalendar {
  pub fn build(market: MarketKind, date: NaiveDate) -> Self {
    let mut minutes = Vec::new();

    for (start, end) in session_windows(market, date) {
      let mut t = start;
      while t <= end {
        minutes.push(t.format(TIME_LABEL_FORMAT).to_string());
        t = t + Duration::minutes(1);
      }
    }

    let index = minutes
      .iter()
      .enumerate()
      .map(|(i, label)| (label.clone(), i))
      .collect();

    TradingCalendar { market, date, minutes, index }
  }

  pub fn market(&self) -> MarketKind {
    self.market
  }

  pub fn date(&self) -> NaiveDate {
    self.date
  }

  pub fn len(&self) -> usize {
    self.minutes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.minutes.is_empty()
  }

  pub fn labels(&self) -> &[String] {
    &self.minutes
  }

  /// 라벨의 그리드 위치. 그리드에 없는 라벨이면 None
  pub fn position(&self, label: &str) -> Option<usize> {
    self.index.get(label).copied()
  }
}

/// 시장별 세션 구간 (양 끝 포함).
///
/// 미국장은 기준일 전날 저녁에 시작해 기준일 새벽에 끝나는 단일 구간이며,
/// 서머타임 여부는 기준일 자체로 판정한다.
pub fn session_windows(market: MarketKind, date: NaiveDate) -> Vec<(NaiveDateTime, NaiveDateTime)> {
  let at = |d: NaiveDate, h: u32, m: u32| {
    d.and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN))
  };

  match market {
    MarketKind::StockA => vec![
      (at(date, 9, 30), at(date, 11, 30)),
      (at(date, 13, 0), at(date, 15, 0)),
    ],
    MarketKind::StockHk => vec![
      (at(date, 9, 30), at(date, 12, 0)),
      (at(date, 13, 0), at(date, 16, 0)),
    ],
    MarketKind::StockUs => {
      let prev = date - Duration::days(1);
      // 서머타임: 21:30 - 익일 04:00 / 표준시: 22:30 - 익일 05:00
      if us_dst_in_effect(date) {
        vec![(at(prev, 21, 30), at(date, 4, 0))]
      } else {
        vec![(at(prev, 22, 30), at(date, 5, 0))]
      }
    }
  }
}

/// 해당 기준일의 첫 세션 시작 시각
pub fn session_open(market: MarketKind, date: NaiveDate) -> Option<NaiveDateTime> {
  session_windows(market, date).first().map(|(start, _)| *start)
}

pub fn is_weekend(date: NaiveDate) -> bool {
  matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 현재 시각이 거래 시간인지.
///
/// 미국장 세션은 자정을 넘기므로 현재 날짜와 다음 날짜를 기준일로 하는
/// 세션 구간을 모두 확인한다. 주말은 어느 시장이든 거래 시간이 아니다.
pub fn is_trading_time(market: MarketKind, now: NaiveDateTime) -> bool {
  if is_weekend(now.date()) {
    return false;
  }

  for reference in [now.date(), now.date() + Duration::days(1)] {
    for (start, end) in session_windows(market, reference) {
      if now >= start && now <= end {
        return true;
      }
    }
  }

  false
}

/// 기준일에 미국 서머타임이 적용되는지 (3월 둘째 일요일 ~ 11월 첫째 일요일)
pub fn us_dst_in_effect(date: NaiveDate) -> bool {
  let start = NaiveDate::from_weekday_of_month_opt(date.year(), 3, Weekday::Sun, 2);
  let end = NaiveDate::from_weekday_of_month_opt(date.year(), 11, Weekday::Sun, 1);

  match (start, end) {
    (Some(start), Some(end)) => date >= start && date < end,
    _ => false,
  }
}
