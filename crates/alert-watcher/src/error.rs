//! 에러 타입 정의.

use alert_core::CandleError;
use alert_data::DataError;
use alert_notification::NotificationError;
use thiserror::Error;

/// Watcher 에러 타입.
///
/// 모든 변종은 틱 경계에서 잡혀 로그로 남고 다음 캔들 마감을
/// 기다리는 것으로 변환됩니다. 치명적인 에러는 없습니다.
#[derive(Debug, Error)]
pub enum WatcherError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 소스 에러 (Yahoo 등)
    #[error("데이터 소스 에러: {0}")]
    Data(#[from] DataError),

    /// 손상된 캔들 (상류 데이터 손상)
    #[error("캔들 데이터 에러: {0}")]
    Candle(#[from] CandleError),

    /// 알림 전송 에러
    #[error("알림 에러: {0}")]
    Notification(#[from] NotificationError),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// Result 타입 별칭.
pub type Result<T> = std::result::Result<T, WatcherError>;
