//! 캔들 데이터의 에러 타입.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// 캔들 데이터 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CandleError {
    /// OHLC 값이 서로 모순되는 캔들 (상류 데이터 손상을 의미)
    #[error("캔들 데이터 불일치 ({close_time}): {reason}")]
    Inconsistent {
        close_time: DateTime<Utc>,
        reason: &'static str,
    },

    /// 시계열 순서 위반 (타임스탬프 중복 또는 역행)
    #[error("캔들 순서 위반 ({close_time})")]
    OutOfOrder { close_time: DateTime<Utc> },
}

/// 캔들 작업을 위한 Result 타입.
pub type CandleResult<T> = Result<T, CandleError>;
