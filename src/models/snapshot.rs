use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 스냅샷에 미리 계산해 두는 이동평균 윈도우 집합
pub const MA_WINDOWS: [usize; 5] = [5, 10, 20, 30, 60];

/// 한 번의 폴링 주기가 만들어내는 정규화 결과.
///
/// 모든 배열은 분시 모드에서는 거래 캘린더와, K선 모드에서는 봉 인덱스와
/// 1:1 로 정렬된다. 가격류 배열의 결측 슬롯은 NaN, 거래량은 0 이 기본값이다.
/// 생성 후에는 변경하지 않으며, 다음 주기의 스냅샷이 통째로 대체한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub code: String,
    pub name: String,
    /// 마지막 유효 가격
    pub current_price: f64,
    /// 전일 종가(분시) 또는 직전 봉 종가(K선) 대비 등락률. 기준이 없으면 None
    pub change_percent: Option<f64>,
    /// 시가 (분시 모드에서는 비어 있음)
    pub open: Vec<f64>,
    /// 종가 / 실시간가
    pub prices: Vec<f64>,
    /// 균가
    pub avg_prices: Vec<f64>,
    /// 최고가 (분시 모드에서는 비어 있음)
    pub highs: Vec<f64>,
    /// 최저가 (분시 모드에서는 비어 있음)
    pub lows: Vec<f64>,
    /// 총 거래량
    pub volumes: Vec<f64>,
    /// 매수측 거래량
    pub buy_volumes: Vec<f64>,
    /// 매도측 거래량
    pub sell_volumes: Vec<f64>,
    /// 윈도우 길이별 엄격 윈도우 이동평균 (K선 모드에서만 채워짐)
    pub moving_averages: HashMap<usize, Vec<f64>>,
}

impl StockSnapshot {
    /// 정렬 대상 슬롯 수
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// 특정 윈도우의 이동평균 조회
    pub fn moving_average(&self, window: usize) -> Option<&[f64]> {
        self.moving_averages.get(&window).map(|v| v.as_slice())
    }
}
