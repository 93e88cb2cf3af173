//! Yahoo Finance chart API v8 클라이언트.
//!
//! `https://query1.finance.yahoo.com/v8/finance/chart/{symbol}` 에서
//! OHLC 시계열을 가져옵니다. 응답 타임스탬프는 캔들 시작 시각이므로
//! 타임프레임 기간을 더해 마감 시각으로 변환합니다.

use crate::error::{DataError, Result};
use crate::provider::MarketDataProvider;
use alert_core::{close_time_from_open, validate_series, Candle, Timeframe};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance API v8 응답 구조
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
}

/// Yahoo Finance 캔들 공급자.
pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    /// 요청 타임아웃을 지정하여 공급자를 생성합니다.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// 테스트용 base URL 재정의.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// chart API 응답을 캔들 시계열로 변환합니다.
    ///
    /// 값이 하나라도 비어 있는 행(거래 정지 구간 등)은 건너뜁니다.
    fn parse_candles(
        response: YahooChartResponse,
        timeframe: Timeframe,
    ) -> Result<Vec<Candle>> {
        if let Some(error) = response.chart.error {
            return Err(DataError::FetchError(format!(
                "{} - {}",
                error.code, error.description
            )));
        }

        let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(Vec::new());
        };

        let timestamps = result.timestamp.unwrap_or_default();
        let Some(quote) = result.indicators.quote.into_iter().next() else {
            return Ok(Vec::new());
        };

        let opens = quote.open.unwrap_or_default();
        let highs = quote.high.unwrap_or_default();
        let lows = quote.low.unwrap_or_default();
        let closes = quote.close.unwrap_or_default();

        let mut candles = Vec::with_capacity(timestamps.len());
        let mut skipped = 0usize;

        for (i, ts) in timestamps.iter().enumerate() {
            let open = opens.get(i).and_then(|v| *v);
            let high = highs.get(i).and_then(|v| *v);
            let low = lows.get(i).and_then(|v| *v);
            let close = closes.get(i).and_then(|v| *v);

            let (Some(o), Some(h), Some(l), Some(c)) = (open, high, low, close) else {
                skipped += 1;
                continue;
            };

            let Some(open_time) = DateTime::<Utc>::from_timestamp(*ts, 0) else {
                skipped += 1;
                continue;
            };

            let candle = Candle::new(
                close_time_from_open(open_time, timeframe),
                decimal_from_price(o)?,
                decimal_from_price(h)?,
                decimal_from_price(l)?,
                decimal_from_price(c)?,
            );
            candle.validate()?;
            candles.push(candle);
        }

        if skipped > 0 {
            debug!(skipped, "불완전한 행 건너뜀");
        }

        validate_series(&candles)?;
        Ok(candles)
    }
}

/// f64 가격을 소수점 4자리 Decimal로 변환합니다.
fn decimal_from_price(value: f64) -> Result<Decimal> {
    Decimal::from_str(&format!("{:.4}", value))
        .map_err(|e| DataError::ParseError(format!("{}: {}", value, e)))
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        lookback_days: u32,
    ) -> Result<Vec<Candle>> {
        let end_ts = Utc::now().timestamp();
        let start_ts = end_ts - i64::from(lookback_days) * 86_400;

        let url = format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval={}&events=history",
            self.base_url,
            symbol,
            start_ts,
            end_ts,
            timeframe.to_yahoo_interval()
        );

        debug!(symbol, %timeframe, "Yahoo Finance 조회: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                DataError::Timeout(e.to_string())
            } else {
                DataError::FetchError(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::FetchError(format!("HTTP {}: {}", status, body)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DataError::FetchError(e.to_string()))?;
        let chart: YahooChartResponse = serde_json::from_str(&body)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let candles = Self::parse_candles(chart, timeframe)?;
        if candles.is_empty() {
            warn!(symbol, "Yahoo Finance가 빈 시계열을 반환");
        }
        Ok(candles)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}
