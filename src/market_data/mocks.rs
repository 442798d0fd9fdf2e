/**
* filename : mocks
* author : HAMA
* date: 2025. 6. 15.
* description:
**/

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::error::TickerError;
use crate::market_data::calendar::TradingCalendar;
use crate::market_data::client::{KlinePayload, QuoteSource, TrendsPayload};
use crate::models::market::{ChartPeriod, MarketKind};

/// A mock implementation of the QuoteSource trait for testing and development
///
/// 실제 업스트림과 동일한 행 포맷의 문자열을 랜덤 워크로 생성한다.
pub struct MockQuoteSource {
    market: MarketKind,
    base_price: f64,
}

impl MockQuoteSource {
    pub fn new(market: MarketKind) -> Self {
        MockQuoteSource {
            market,
            base_price: 100.0,
        }
    }

    pub fn with_base_price(market: MarketKind, base_price: f64) -> Self {
        MockQuoteSource { market, base_price }
    }
}

#[async_trait]
impl QuoteSource for MockQuoteSource {
    async fn fetch_trends(&self, _secid: &str, date: NaiveDate) -> Result<TrendsPayload, TickerError> {
        let calendar = TradingCalendar::build(self.market, date);
        let mut rng = rand::thread_rng();

        let mut price = self.base_price;
        let mut cum_volume = 0.0;
        let mut cum_amount = 0.0;
        let mut rows = Vec::new();

        // 장 전반부만 채워 그리드 후반의 결측 슬롯을 재현한다
        let filled = calendar.len() / 2 + 1;
        for label in calendar.labels().iter().take(filled) {
            price = (price + rng.gen_range(-0.5..0.5)).max(1.0);
            let volume: f64 = rng.gen_range(100.0..10_000.0);
            cum_volume += volume;
            cum_amount += price * volume;
            let avg = cum_amount / cum_volume;

            // time,open,price,high,low,volume,amount,avg
            rows.push(format!(
                "{},{:.2},{:.2},{:.2},{:.2},{:.0},{:.0},{:.3}",
                label,
                price,
                price,
                price + 0.1,
                price - 0.1,
                volume,
                price * volume,
                avg,
            ));
        }

        Ok(TrendsPayload {
            name: "MOCK STOCK".to_string(),
            pre_close: Some(self.base_price),
            trends: rows,
        })
    }

    async fn fetch_klines(
        &self,
        _secid: &str,
        period: ChartPeriod,
        date: NaiveDate,
    ) -> Result<KlinePayload, TickerError> {
        period.klt_code().ok_or_else(|| {
            TickerError::InvalidParameter("Intraday period has no kline code".to_string())
        })?;

        let mut rng = rand::thread_rng();
        let mut close = self.base_price;
        let mut rows = Vec::new();

        let count: i64 = 80;
        for i in 0..count {
            let open = close;
            close = (close + rng.gen_range(-2.0..2.0)).max(1.0);
            let high = open.max(close) + rng.gen_range(0.0..1.0);
            let low = (open.min(close) - rng.gen_range(0.0..1.0)).max(0.5);
            let volume: f64 = rng.gen_range(10_000.0..500_000.0);
            let day = date - Duration::days(count - i);

            // time,open,close,low,high,volume
            rows.push(format!(
                "{},{:.2},{:.2},{:.2},{:.2},{:.0}",
                day.format("%Y-%m-%d"),
                open,
                close,
                low,
                high,
                volume,
            ));
        }

        Ok(KlinePayload {
            name: "MOCK STOCK".to_string(),
            klines: rows,
        })
    }
}
