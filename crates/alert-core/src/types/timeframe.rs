//! 캔들 데이터를 위한 타임프레임 정의.
//!
//! 마감 정렬 스케줄링은 분 단위 경계 연산을 사용하므로
//! 1시간 이하의 분봉 타임프레임만 지원합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// 캔들 타임프레임.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// 1분봉
    M1,
    /// 5분봉
    M5,
    /// 15분봉
    M15,
    /// 30분봉
    M30,
    /// 1시간봉
    H1,
}

impl Timeframe {
    /// 이 타임프레임의 기간을 반환합니다.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.as_minutes() * 60)
    }

    /// 이 타임프레임의 분 단위 값을 반환합니다.
    pub fn as_minutes(&self) -> u64 {
        match self {
            Timeframe::M1 => 1,
            Timeframe::M5 => 5,
            Timeframe::M15 => 15,
            Timeframe::M30 => 30,
            Timeframe::H1 => 60,
        }
    }

    /// Yahoo Finance 간격 문자열로 변환합니다.
    pub fn to_yahoo_interval(&self) -> &'static str {
        match self {
            Timeframe::M1 => "1m",
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::M30 => "30m",
            Timeframe::H1 => "60m",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_yahoo_interval())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "m1" => Ok(Timeframe::M1),
            "5m" | "m5" => Ok(Timeframe::M5),
            "15m" | "m15" => Ok(Timeframe::M15),
            "30m" | "m30" => Ok(Timeframe::M30),
            "60m" | "1h" | "h1" => Ok(Timeframe::H1),
            _ => Err(format!("Unknown timeframe: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for tf in [
            Timeframe::M1,
            Timeframe::M5,
            Timeframe::M15,
            Timeframe::M30,
            Timeframe::H1,
        ] {
            assert_eq!(tf.to_yahoo_interval().parse::<Timeframe>().unwrap(), tf);
        }
    }

    #[test]
    fn test_duration() {
        assert_eq!(Timeframe::M15.duration(), Duration::from_secs(900));
        assert_eq!(Timeframe::H1.as_minutes(), 60);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("4h".parse::<Timeframe>().is_err());
    }
}
