/**
* filename : normalizer
* author : HAMA
* date: 2025. 6. 15.
* description:
**/

use std::collections::HashMap;

use crate::error::TickerError;
use crate::indicators::moving_averages::exact_window_sma;
use crate::indicators::volume::attribute_volume;
use crate::market_data::calendar::TradingCalendar;
use crate::market_data::client::{KlinePayload, TrendsPayload};
use crate::models::snapshot::{StockSnapshot, MA_WINDOWS};

/// 파싱된 분시 표본 한 건
#[derive(Debug)]
struct TrendRow {
    time: String,
    price: f64,
    volume: f64,
    avg: f64,
}

/// 분시 행 파싱: `time,...,price(2),...,volume(5),...,avg(7)`, 최소 8필드.
/// 가격/균가 파싱 실패는 결측(NaN), 거래량 실패는 0 으로 처리한다.
fn parse_trend_row(line: &str) -> Option<TrendRow> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 8 {
        return None;
    }

    Some(TrendRow {
        time: parts[0].to_string(),
        price: parts[2].trim().parse().unwrap_or(f64::NAN),
        volume: parts[5].trim().parse().unwrap_or(0.0),
        avg: parts[7].trim().parse().unwrap_or(f64::NAN),
    })
}

/// 파싱된 봉 한 건
#[derive(Debug)]
struct BarRow {
    open: f64,
    close: f64,
    low: f64,
    high: f64,
    volume: f64,
}

/// K선 행 파싱: `time,open,close,low,high,volume,...`.
/// 숫자 필드 하나라도 깨진 표본은 통째로 버린다.
fn parse_kline_row(line: &str) -> Option<BarRow> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 6 {
        return None;
    }

    Some(BarRow {
        open: parts[1].trim().parse().ok()?,
        close: parts[2].trim().parse().ok()?,
        low: parts[3].trim().parse().ok()?,
        high: parts[4].trim().parse().ok()?,
        volume: parts[5].trim().parse().ok()?,
    })
}

/// 분시 표본을 거래 캘린더 그리드에 정렬한 스냅샷을 만든다.
///
/// 캘린더에 없는 시간 라벨의 표본은 버리고, 매칭되지 않은 슬롯은
/// 가격류 NaN / 거래량 0 으로 남긴다. 현재가는 시간순 마지막 표본에서,
/// 등락률은 별도 공급되는 전일 종가에서 구한다.
pub fn normalize_intraday(
    code: &str,
    payload: &TrendsPayload,
    calendar: &TradingCalendar,
) -> Result<StockSnapshot, TickerError> {
    let rows: Vec<TrendRow> = payload.trends.iter().filter_map(|l| parse_trend_row(l)).collect();
    if rows.is_empty() {
        return Err(TickerError::MalformedPayload("no parseable trend rows".to_string()));
    }

    let n = calendar.len();
    let mut prices = vec![f64::NAN; n];
    let mut avg_prices = vec![f64::NAN; n];
    let mut volumes = vec![0.0; n];

    for row in &rows {
        // 그리드에 없는 표본은 폐기
        let idx = match calendar.position(&row.time) {
            Some(idx) => idx,
            None => continue,
        };
        prices[idx] = row.price;
        avg_prices[idx] = row.avg;
        volumes[idx] = row.volume;
    }

    let (buy_volumes, sell_volumes) = attribute_volume(&prices, &volumes);

    // 표본이 순서 없이 올 수 있으므로 라벨 기준으로 시간순 마지막을 고른다
    let current_price = rows
        .iter()
        .max_by(|a, b| a.time.cmp(&b.time))
        .map(|r| r.price)
        .unwrap_or(f64::NAN);

    let change_percent = payload.pre_close.and_then(|pre| {
        if pre != 0.0 && !current_price.is_nan() {
            Some((current_price - pre) / pre * 100.0)
        } else {
            None
        }
    });

    Ok(StockSnapshot {
        code: code.to_string(),
        name: payload.name.clone(),
        current_price,
        change_percent,
        open: Vec::new(),
        prices,
        avg_prices,
        highs: Vec::new(),
        lows: Vec::new(),
        volumes,
        buy_volumes,
        sell_volumes,
        moving_averages: HashMap::new(),
    })
}

/// 시간순으로 정렬된 봉 목록을 필드별 배열로 투영한 스냅샷을 만든다.
///
/// 봉은 연속적이라고 가정하므로 갭 채움이 없다. 균가는 OHLC 평균,
/// 매수/매도 거래량은 절반씩(틱 규칙은 봉 단위에 적용할 수 없다),
/// 이동평균은 고정 윈도우 집합에 대해 엄격 윈도우 방식으로 미리 계산한다.
pub fn normalize_klines(code: &str, payload: &KlinePayload) -> Result<StockSnapshot, TickerError> {
    let bars: Vec<BarRow> = payload.klines.iter().filter_map(|l| parse_kline_row(l)).collect();
    if bars.is_empty() {
        return Err(TickerError::MalformedPayload("no parseable kline rows".to_string()));
    }

    let count = bars.len();
    let mut open = Vec::with_capacity(count);
    let mut prices = Vec::with_capacity(count);
    let mut avg_prices = Vec::with_capacity(count);
    let mut highs = Vec::with_capacity(count);
    let mut lows = Vec::with_capacity(count);
    let mut volumes = Vec::with_capacity(count);

    for bar in &bars {
        open.push(bar.open);
        prices.push(bar.close);
        highs.push(bar.high);
        lows.push(bar.low);
        avg_prices.push((bar.open + bar.close + bar.high + bar.low) / 4.0);
        volumes.push(bar.volume);
    }

    let buy_volumes: Vec<f64> = volumes.iter().map(|v| v * 0.5).collect();
    let sell_volumes: Vec<f64> = volumes.iter().map(|v| v * 0.5).collect();

    let current_price = prices[count - 1];
    let change_percent = if count >= 2 {
        let prev = prices[count - 2];
        if prev != 0.0 {
            Some((current_price - prev) / prev * 100.0)
        } else {
            Some(0.0)
        }
    } else {
        Some(0.0)
    };

    let moving_averages: HashMap<usize, Vec<f64>> = MA_WINDOWS
        .iter()
        .map(|&w| (w, exact_window_sma(&prices, w)))
        .collect();

    Ok(StockSnapshot {
        code: code.to_string(),
        name: payload.name.clone(),
        current_price,
        change_percent,
        open,
        prices,
        avg_prices,
        highs,
        lows,
        volumes,
        buy_volumes,
        sell_volumes,
        moving_averages,
    })
}
