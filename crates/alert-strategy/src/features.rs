//! 캔들 형태 비율 계산.
//!
//! 원시 OHLC 값을 몸통/꼬리 크기와 범위 대비 비율로 정규화합니다.
//! 패턴 규칙은 전부 이 비율 위에서 동작합니다.

use alert_core::{Candle, CandleError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 범위가 0인 평평한 캔들에 사용하는 대체 범위.
///
/// 비율 분모가 0이 되는 것을 막아 모든 비율이 유한하게 유지됩니다.
pub const RANGE_EPSILON: Decimal = dec!(0.000000001);

/// 캔들 하나에서 유도된 형태 특징.
///
/// 비율 값은 정상적인 캔들에서 [0, 1] 범위에 들어갑니다.
/// 장악형 규칙이 원시 시가/종가를 비교하므로 함께 보관합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleFeatures {
    /// 시가
    pub open: Decimal,
    /// 종가
    pub close: Decimal,
    /// 몸통 크기 |종가 - 시가|
    pub body: Decimal,
    /// 범위 (고가 - 저가, 0이면 epsilon으로 대체)
    pub range: Decimal,
    /// 상단 꼬리 크기
    pub upper_wick: Decimal,
    /// 하단 꼬리 크기
    pub lower_wick: Decimal,
    /// 몸통 / 범위
    pub body_ratio: Decimal,
    /// 상단 꼬리 / 범위
    pub upper_wick_ratio: Decimal,
    /// 하단 꼬리 / 범위
    pub lower_wick_ratio: Decimal,
}

impl CandleFeatures {
    /// 양봉(종가 > 시가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 음봉(종가 < 시가)인지 확인합니다.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// 캔들 하나의 형태 특징을 계산합니다.
///
/// 순수 함수입니다. 꼬리가 음수가 되는 캔들(고가/저가가 몸통과
/// 모순)은 `CandleError::Inconsistent`로 거부합니다.
pub fn derive_features(candle: &Candle) -> Result<CandleFeatures, CandleError> {
    candle.validate()?;

    let body = candle.body_size();
    let mut range = candle.range();
    if range.is_zero() {
        range = RANGE_EPSILON;
    }
    let upper_wick = candle.upper_shadow();
    let lower_wick = candle.lower_shadow();

    Ok(CandleFeatures {
        open: candle.open,
        close: candle.close,
        body,
        range,
        upper_wick,
        lower_wick,
        body_ratio: body / range,
        upper_wick_ratio: upper_wick / range,
        lower_wick_ratio: lower_wick / range,
    })
}

/// 시계열 전체의 형태 특징을 계산합니다.
pub fn derive_series(candles: &[Candle]) -> Result<Vec<CandleFeatures>, CandleError> {
    candles.iter().map(derive_features).collect()
}
