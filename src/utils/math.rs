//! 수학 관련 유틸리티
//!
//! 결측값(NaN)을 건너뛰는 슬라이스 계산 함수 제공

/// 결측값을 제외한 최대값
pub fn nan_max(values: &[f64]) -> Option<f64> {
  values.iter()
    .copied()
    .filter(|v| !v.is_nan())
    .fold(None, |acc, v| match acc {
      Some(m) if m >= v => Some(m),
      _ => Some(v),
    })
}

/// 결측값을 제외한 최소값
pub fn nan_min(values: &[f64]) -> Option<f64> {
  values.iter()
    .copied()
    .filter(|v| !v.is_nan())
    .fold(None, |acc, v| match acc {
      Some(m) if m <= v => Some(m),
      _ => Some(v),
    })
}

/// 결측값을 제외한 평균
pub fn average(values: &[f64]) -> Option<f64> {
  let valid: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
  if valid.is_empty() {
    return None;
  }

  Some(valid.iter().sum::<f64>() / valid.len() as f64)
}
