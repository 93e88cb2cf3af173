//! 데이터 모듈 오류 타입.

use alert_core::CandleError;
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 데이터 가져오기 오류 (외부 소스)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 잘못된 데이터 형식 (손상된 캔들 포함)
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 타임아웃 오류
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<CandleError> for DataError {
    fn from(err: CandleError) -> Self {
        DataError::InvalidData(err.to_string())
    }
}

/// 데이터 작업을 위한 Result 타입.
pub type Result<T> = std::result::Result<T, DataError>;
