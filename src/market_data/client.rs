/**
* filename : client
* author : HAMA
* date: 2025. 6. 14.
* description:
**/

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::UpstreamConfig;
use crate::error::TickerError;
use crate::models::market::ChartPeriod;

/// 분시 응답 페이로드 (행은 아직 파싱 전의 원문)
#[derive(Debug, Clone)]
pub struct TrendsPayload {
    pub name: String,
    pub pre_close: Option<f64>,
    pub trends: Vec<String>,
}

/// K선 응답 페이로드
#[derive(Debug, Clone)]
pub struct KlinePayload {
    pub name: String,
    pub klines: Vec<String>,
}

/// 시세 소스 인터페이스
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// 해당 일자의 분시 데이터 조회
    async fn fetch_trends(&self, secid: &str, date: NaiveDate) -> Result<TrendsPayload, TickerError>;

    /// K선 데이터 조회 (조회 시작일은 주기별 규칙으로 계산)
    async fn fetch_klines(
        &self,
        secid: &str,
        period: ChartPeriod,
        date: NaiveDate,
    ) -> Result<KlinePayload, TickerError>;
}

// ---------------- 와이어 포맷 ----------------

#[derive(Debug, Deserialize)]
struct TrendsResponse {
    data: Option<TrendsData>,
}

#[derive(Debug, Deserialize)]
struct TrendsData {
    name: Option<String>,
    #[serde(default, rename = "preClose")]
    pre_close: Option<f64>,
    trends: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct KlineResponse {
    data: Option<KlineData>,
}

#[derive(Debug, Deserialize)]
struct KlineData {
    name: Option<String>,
    klines: Option<Vec<String>>,
}

/// Eastmoney HTTP 시세 클라이언트
pub struct EastmoneyClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl EastmoneyClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, TickerError> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(std::time::Duration::from_millis(ms));
        }
        let http = builder.build()?;

        Ok(EastmoneyClient { http, config })
    }
}

#[async_trait]
impl QuoteSource for EastmoneyClient {
    async fn fetch_trends(&self, secid: &str, date: NaiveDate) -> Result<TrendsPayload, TickerError> {
        let date_str = date.format("%Y%m%d").to_string();
        let url = format!(
            "{}?fields1=f1,f2,f3,f4,f5,f6,f7,f8&fields2=f51,f52,f53,f54,f55,f56,f57,f58&iscr=0&ndays=1&secid={}&ut={}&trends={}",
            self.config.trend_url, secid, self.config.token, date_str,
        );

        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(TickerError::UpstreamStatus(resp.status().as_u16()));
        }

        let body: TrendsResponse = resp.json().await?;
        let data = body
            .data
            .ok_or_else(|| TickerError::MalformedPayload("missing data".to_string()))?;

        let trends = data.trends.unwrap_or_default();
        if trends.is_empty() {
            return Err(TickerError::MalformedPayload("empty trends".to_string()));
        }

        Ok(TrendsPayload {
            name: data.name.unwrap_or_default(),
            pre_close: data.pre_close,
            trends,
        })
    }

    async fn fetch_klines(
        &self,
        secid: &str,
        period: ChartPeriod,
        date: NaiveDate,
    ) -> Result<KlinePayload, TickerError> {
        let klt = period.klt_code().ok_or_else(|| {
            TickerError::InvalidParameter("Intraday period has no kline code".to_string())
        })?;

        let beg = period.begin_date(date).format("%Y%m%d").to_string();
        let end = date.format("%Y%m%d").to_string();
        let url = format!(
            "{}?secid={}&klt={}&fqt=1&beg={}&end={}&fields1=f1,f2,f3&fields2=f51,f52,f53,f54,f55,f56,f57,f58",
            self.config.kline_url, secid, klt, beg, end,
        );

        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(TickerError::UpstreamStatus(resp.status().as_u16()));
        }

        let body: KlineResponse = resp.json().await?;
        let data = body
            .data
            .ok_or_else(|| TickerError::MalformedPayload("missing data".to_string()))?;

        let klines = data.klines.unwrap_or_default();
        if klines.is_empty() {
            return Err(TickerError::MalformedPayload("empty klines".to_string()));
        }

        Ok(KlinePayload {
            name: data.name.unwrap_or_default(),
            klines,
        })
    }
}
