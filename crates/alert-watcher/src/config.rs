//! 환경변수 기반 설정 모듈.

use crate::error::{Result, WatcherError};
use alert_core::Timeframe;
use chrono_tz::Tz;
use std::time::Duration;

/// Watcher 전체 설정.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// 감시 대상 심볼 (Yahoo Finance 표기)
    pub symbol: String,
    /// 캔들 타임프레임
    pub timeframe: Timeframe,
    /// 조회 기간 (일)
    pub lookback_days: u32,
    /// 표시용 시간대 (마감 경계 계산에도 사용)
    pub timezone: Tz,
    /// 데이터 가져오기 타임아웃 (초)
    pub fetch_timeout_secs: u64,
    /// 헬스 체크 포트 (0이면 비활성화)
    pub health_port: u16,
}

impl WatcherConfig {
    /// 환경변수에서 설정 로드.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let symbol = std::env::var("ALERT_SYMBOL").unwrap_or_else(|_| "^NSEI".to_string());

        let timeframe = env_var_or("ALERT_TIMEFRAME", "15m")
            .parse::<Timeframe>()
            .map_err(WatcherError::Config)?;

        let timezone = env_var_or("ALERT_TIMEZONE", "Asia/Kolkata")
            .parse::<Tz>()
            .map_err(|e| WatcherError::Config(format!("잘못된 시간대: {}", e)))?;

        Ok(Self {
            symbol,
            timeframe,
            lookback_days: env_var_parse("ALERT_LOOKBACK_DAYS", 60),
            timezone,
            fetch_timeout_secs: env_var_parse("ALERT_FETCH_TIMEOUT_SECS", 10),
            health_port: env_var_parse("HEALTH_PORT", 0),
        })
    }

    /// 데이터 가져오기 타임아웃을 Duration으로 반환.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// 환경변수를 읽고 없으면 기본 문자열을 반환.
fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// 환경변수를 파싱하고 없거나 잘못되면 기본값을 반환.
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
