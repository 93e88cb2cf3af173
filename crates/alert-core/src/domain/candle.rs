//! OHLC 캔들 타입 및 검증.
//!
//! 이 모듈은 고정 간격 가격 캔들을 나타내는 `Candle` 타입을 정의합니다.
//! `close_time`이 캔들의 식별자이며, 공급자 경계에서 `validate()`로
//! 엄격하게 검증한 뒤에만 시스템 내부로 들여옵니다.

use crate::error::CandleError;
use crate::types::Timeframe;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// OHLC 캔들 데이터.
///
/// 불변 값 타입이며 `close_time`(캔들 마감 시각)으로 식별됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// 캔들 마감 시각 (캔들 식별자)
    pub close_time: DateTime<Utc>,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
}

impl Candle {
    /// 새 캔들을 생성합니다.
    pub fn new(
        close_time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> Self {
        Self {
            close_time,
            open,
            high,
            low,
            close,
        }
    }

    /// 캔들 몸통 크기(절대값)를 반환합니다.
    pub fn body_size(&self) -> Decimal {
        (self.close - self.open).abs()
    }

    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    /// 상단 꼬리 크기를 반환합니다.
    pub fn upper_shadow(&self) -> Decimal {
        self.high - self.close.max(self.open)
    }

    /// 하단 꼬리 크기를 반환합니다.
    pub fn lower_shadow(&self) -> Decimal {
        self.close.min(self.open) - self.low
    }

    /// 양봉(종가 > 시가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 음봉(종가 < 시가)인지 확인합니다.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// 시가 대비 변동률(%)을 반환합니다.
    pub fn change_percent(&self) -> Decimal {
        if self.open.is_zero() {
            return Decimal::ZERO;
        }
        (self.close - self.open) / self.open * Decimal::ONE_HUNDRED
    }

    /// OHLC 값의 일관성을 검증합니다.
    ///
    /// 음수 가격, 고가 < 저가, 고가가 시가/종가 몸통보다 낮거나
    /// 저가가 몸통보다 높은 캔들(음수 꼬리)은 상류 데이터 손상으로
    /// 간주하여 거부합니다. 암묵적 보정은 하지 않습니다.
    pub fn validate(&self) -> Result<(), CandleError> {
        let reason = if self.open.is_sign_negative()
            || self.high.is_sign_negative()
            || self.low.is_sign_negative()
            || self.close.is_sign_negative()
        {
            Some("음수 가격")
        } else if self.high < self.low {
            Some("고가가 저가보다 낮음")
        } else if self.high < self.close.max(self.open) {
            Some("고가가 시가/종가보다 낮음")
        } else if self.low > self.close.min(self.open) {
            Some("저가가 시가/종가보다 높음")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(CandleError::Inconsistent {
                close_time: self.close_time,
                reason,
            }),
            None => Ok(()),
        }
    }
}

/// 캔들 시계열이 시간순으로 엄격히 증가하는지 검증합니다.
///
/// 타임스탬프 중복 또는 역행이 발견되면 해당 캔들의
/// `OutOfOrder` 에러를 반환합니다.
pub fn validate_series(candles: &[Candle]) -> Result<(), CandleError> {
    for pair in candles.windows(2) {
        if pair[1].close_time <= pair[0].close_time {
            return Err(CandleError::OutOfOrder {
                close_time: pair[1].close_time,
            });
        }
    }
    Ok(())
}

/// 캔들 시작 시각과 타임프레임으로부터 마감 시각을 계산합니다.
pub fn close_time_from_open(open_time: DateTime<Utc>, timeframe: Timeframe) -> DateTime<Utc> {
    open_time + chrono::Duration::minutes(timeframe.as_minutes() as i64)
}
