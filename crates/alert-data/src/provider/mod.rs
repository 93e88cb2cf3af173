//! 데이터 Provider 모듈.
//!
//! ## Yahoo Finance
//! - `YahooProvider`: chart API v8 클라이언트
//! - 지수/주식 분봉·시간봉 OHLC 시계열

use crate::Result;
use alert_core::{Candle, Timeframe};
use async_trait::async_trait;

pub mod yahoo;

pub use yahoo::YahooProvider;

/// 시장 데이터 공급자 trait.
///
/// 응답은 시간순으로 엄격히 증가하는 캔들 시계열입니다. 데이터가
/// 없으면 빈 벡터를 반환하며, 전송 실패와는 에러 종류로 구분됩니다
/// (재시도 동작은 동일하게 다음 틱을 기다립니다).
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// 최근 조회 기간의 캔들 시계열을 가져옵니다.
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        lookback_days: u32,
    ) -> Result<Vec<Candle>>;

    /// 공급자 이름을 반환합니다.
    fn name(&self) -> &str;
}
