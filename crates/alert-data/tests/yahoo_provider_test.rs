//! YahooProvider 통합 테스트
//!
//! mockito로 chart API v8 응답을 흉내 내어 파싱, 불완전 행 처리,
//! 오류 분류를 검증합니다.

use alert_core::Timeframe;
use alert_data::{DataError, MarketDataProvider, YahooProvider};
use mockito::Matcher;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

// ============================================================================
// 테스트 헬퍼 함수
// ============================================================================

/// mock 서버를 가리키는 공급자 생성
fn provider(server: &mockito::Server) -> YahooProvider {
    YahooProvider::new(Duration::from_secs(5))
        .unwrap()
        .with_base_url(server.url())
}

/// 15분봉 3개짜리 정상 응답
fn chart_body() -> String {
    serde_json::json!({
        "chart": {
            "result": [{
                "timestamp": [1704067200i64, 1704068100i64, 1704069000i64],
                "indicators": {
                    "quote": [{
                        "open":  [100.0, 100.5, 101.0],
                        "high":  [101.0, 102.0, 101.5],
                        "low":   [99.5, 100.0, 100.2],
                        "close": [100.5, 101.0, 100.4]
                    }]
                }
            }],
            "error": null
        }
    })
    .to_string()
}

// ============================================================================
// 파싱
// ============================================================================

#[tokio::test]
async fn test_fetch_parses_candles() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v8/finance/chart/AAPL")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chart_body())
        .create_async()
        .await;

    let candles = provider(&server)
        .fetch_candles("AAPL", Timeframe::M15, 1)
        .await
        .unwrap();

    assert_eq!(candles.len(), 3);
    // 타임스탬프(캔들 시작) + 15분 = 마감 시각
    assert_eq!(candles[0].close_time.timestamp(), 1704067200 + 900);
    assert_eq!(candles[0].open, Decimal::from_str("100").unwrap());
    assert_eq!(candles[2].close, Decimal::from_str("100.4").unwrap());
    assert!(candles[0].close_time < candles[1].close_time);
}

#[tokio::test]
async fn test_fetch_skips_null_rows() {
    let body = serde_json::json!({
        "chart": {
            "result": [{
                "timestamp": [1704067200i64, 1704068100i64],
                "indicators": {
                    "quote": [{
                        "open":  [100.0, null],
                        "high":  [101.0, 102.0],
                        "low":   [99.5, 100.0],
                        "close": [100.5, null]
                    }]
                }
            }],
            "error": null
        }
    })
    .to_string();

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v8/finance/chart/AAPL")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let candles = provider(&server)
        .fetch_candles("AAPL", Timeframe::M15, 1)
        .await
        .unwrap();

    // 값이 비어 있는 두 번째 행은 건너뜀
    assert_eq!(candles.len(), 1);
}

#[tokio::test]
async fn test_fetch_rejects_inconsistent_candle() {
    // 고가가 종가보다 낮은 손상된 행: 보정 없이 거부
    let body = serde_json::json!({
        "chart": {
            "result": [{
                "timestamp": [1704067200i64],
                "indicators": {
                    "quote": [{
                        "open":  [100.0],
                        "high":  [100.2],
                        "low":   [99.5],
                        "close": [101.0]
                    }]
                }
            }],
            "error": null
        }
    })
    .to_string();

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v8/finance/chart/AAPL")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let err = provider(&server)
        .fetch_candles("AAPL", Timeframe::M15, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, DataError::InvalidData(_)));
}

// ============================================================================
// 오류 분류
// ============================================================================

#[tokio::test]
async fn test_fetch_maps_api_error() {
    let body = serde_json::json!({
        "chart": {
            "result": null,
            "error": { "code": "Not Found", "description": "No data found" }
        }
    })
    .to_string();

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v8/finance/chart/NOPE")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let err = provider(&server)
        .fetch_candles("NOPE", Timeframe::M15, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, DataError::FetchError(_)));
}

#[tokio::test]
async fn test_fetch_empty_result_is_ok() {
    // "아직 데이터 없음"은 오류가 아니라 빈 시계열
    let body = serde_json::json!({
        "chart": { "result": null, "error": null }
    })
    .to_string();

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v8/finance/chart/AAPL")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let candles = provider(&server)
        .fetch_candles("AAPL", Timeframe::M15, 1)
        .await
        .unwrap();
    assert!(candles.is_empty());
}

#[tokio::test]
async fn test_fetch_http_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v8/finance/chart/AAPL")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let err = provider(&server)
        .fetch_candles("AAPL", Timeframe::M15, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, DataError::FetchError(_)));
}

#[tokio::test]
async fn test_fetch_malformed_json() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v8/finance/chart/AAPL")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let err = provider(&server)
        .fetch_candles("AAPL", Timeframe::M15, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, DataError::ParseError(_)));
}
