/**
* filename : market
* author : HAMA
* date: 2025. 6. 14.
* description:
**/

use std::str::FromStr;

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::TickerError;

/// 시장 구분 (A주 / 홍콩 / 미국)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketKind {
    StockA,
    StockHk,
    StockUs,
}

impl FromStr for MarketKind {
    type Err = TickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a" | "cn" => Ok(MarketKind::StockA),
            "hk" => Ok(MarketKind::StockHk),
            "us" => Ok(MarketKind::StockUs),
            other => Err(TickerError::InvalidParameter(format!("Unknown market: {}", other))),
        }
    }
}

/// 차트 주기 (분시 / 일봉 / 주봉 / 월봉 / 분기봉 / 연봉)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartPeriod {
    Intraday,
    DailyK,
    WeeklyK,
    MonthlyK,
    QuarterlyK,
    YearlyK,
}

impl ChartPeriod {
    /// 업스트림 K선 주기 코드. 분시 차트는 별도 엔드포인트를 사용하므로 None
    pub fn klt_code(&self) -> Option<&'static str> {
        match self {
            ChartPeriod::Intraday => None,
            ChartPeriod::DailyK => Some("101"),
            ChartPeriod::WeeklyK => Some("102"),
            ChartPeriod::MonthlyK => Some("103"),
            ChartPeriod::QuarterlyK => Some("104"),
            ChartPeriod::YearlyK => Some("105"),
        }
    }

    /// 조회 시작일. 가장 긴 이동평균 윈도우(60)를 채울 만큼 과거로 거슬러 올라간다
    pub fn begin_date(&self, date: NaiveDate) -> NaiveDate {
        match self {
            ChartPeriod::Intraday | ChartPeriod::DailyK => date - Duration::days(240),
            ChartPeriod::WeeklyK => date - Duration::days(240 * 7),
            ChartPeriod::MonthlyK => date
                .checked_sub_months(Months::new(240))
                .unwrap_or(date),
            ChartPeriod::QuarterlyK => date
                .checked_sub_months(Months::new(240 * 4))
                .unwrap_or(date),
            ChartPeriod::YearlyK => date
                .checked_sub_months(Months::new(12 * 10))
                .unwrap_or(date),
        }
    }

    pub fn is_intraday(&self) -> bool {
        matches!(self, ChartPeriod::Intraday)
    }
}

impl FromStr for ChartPeriod {
    type Err = TickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "intraday" => Ok(ChartPeriod::Intraday),
            "daily" | "day" => Ok(ChartPeriod::DailyK),
            "weekly" | "week" => Ok(ChartPeriod::WeeklyK),
            "monthly" | "month" => Ok(ChartPeriod::MonthlyK),
            "quarterly" | "quarter" => Ok(ChartPeriod::QuarterlyK),
            "yearly" | "year" => Ok(ChartPeriod::YearlyK),
            other => Err(TickerError::InvalidParameter(format!("Unknown period: {}", other))),
        }
    }
}

impl std::fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChartPeriod::Intraday => "Intraday",
            ChartPeriod::DailyK => "Daily K",
            ChartPeriod::WeeklyK => "Weekly K",
            ChartPeriod::MonthlyK => "Monthly K",
            ChartPeriod::QuarterlyK => "Quarterly K",
            ChartPeriod::YearlyK => "Yearly K",
        };
        write!(f, "{}", name)
    }
}
