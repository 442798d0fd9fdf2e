/**
* filename : symbol
* author : HAMA
* date: 2025. 6. 14.
* description:
**/

use crate::models::market::MarketKind;

/// 종목 코드를 시장 접두사가 붙은 업스트림 식별자(secid)로 변환한다.
///
/// 이미 `N.` 형태의 접두사나 sz/sh 문자 접두사를 달고 있는 코드는 대소문자만
/// 정규화해서 통과시키고, 순수 숫자 코드는 선행 숫자 규칙으로 거래소를 고른다.
pub fn to_secid(code: &str, market: MarketKind) -> String {
    let code = code.trim();

    // 명시적 접두사가 있으면 재매핑하지 않는다
    if let Some((prefix, rest)) = code.split_once('.') {
        return format!("{}.{}", prefix, rest.to_uppercase());
    }

    let lower = code.to_lowercase();
    if let Some(rest) = lower.strip_prefix("sz") {
        return format!("0.{}", rest);
    }
    if let Some(rest) = lower.strip_prefix("sh") {
        return format!("1.{}", rest);
    }

    match market {
        MarketKind::StockA => {
            if code.starts_with('3') {
                format!("0.{}", code)
            } else if code.starts_with('6') || code.starts_with('0') {
                format!("1.{}", code)
            } else {
                code.to_string()
            }
        }
        MarketKind::StockHk => format!("116.{}", code),
        MarketKind::StockUs => format!("105.{}", code.to_uppercase()),
    }
}
