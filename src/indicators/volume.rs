/**
* filename : volume
* author : HAMA
* date: 2025. 6. 15.
* description:
**/

/// 가격 방향 틱 규칙으로 거래량을 매수/매도로 분배한다.
///
/// 직전 슬롯 대비 가격이 오르면 전량 매수, 내리면 전량 매도, 보합이거나
/// 어느 한쪽 가격이 결측이면 절반씩 나눈다. 첫 슬롯은 비교 대상이 없으므로
/// 항상 절반씩이다. 실제 체결 방향의 분류가 아니라 근사 휴리스틱이다.
pub fn attribute_volume(prices: &[f64], volumes: &[f64]) -> (Vec<f64>, Vec<f64>) {
  let n = prices.len().min(volumes.len());
  let mut buy = vec![0.0; n];
  let mut sell = vec![0.0; n];

  for i in 0..n {
    let vol = volumes[i];

    let even_split = if i == 0 {
      true
    } else {
      let cur = prices[i];
      let prev = prices[i - 1];
      cur.is_nan() || prev.is_nan() || cur == prev
    };

    if even_split {
      buy[i] = vol * 0.5;
      sell[i] = vol * 0.5;
    } else if prices[i] > prices[i - 1] {
      buy[i] = vol;
    } else {
      sell[i] = vol;
    }
  }

  (buy, sell)
}
