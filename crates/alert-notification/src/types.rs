//! 알림 타입 및 trait 정의.

use alert_core::Candle;
use alert_strategy::{PatternKind, Signal};
use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;

/// 패턴 감지 알림.
///
/// 새로 마감된 캔들 하나에 대해 최대 한 번 생성됩니다.
#[derive(Debug, Clone)]
pub struct PatternAlert {
    /// 거래 심볼
    pub symbol: String,
    /// 감지된 패턴 (비어 있지 않음)
    pub patterns: Vec<PatternKind>,
    /// 매매 신호
    pub signal: Signal,
    /// 평가된 캔들
    pub candle: Candle,
    /// 표시용 시간대
    pub timezone: Tz,
}

impl PatternAlert {
    /// 새 알림을 생성합니다.
    pub fn new(
        symbol: impl Into<String>,
        patterns: Vec<PatternKind>,
        signal: Signal,
        candle: Candle,
        timezone: Tz,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            patterns,
            signal,
            candle,
            timezone,
        }
    }

    /// 캔들 마감 시각을 표시 시간대로 반환합니다.
    pub fn local_close_time(&self) -> DateTime<Tz> {
        self.candle.close_time.with_timezone(&self.timezone)
    }

    /// 패턴 이름을 쉼표로 연결한 문자열을 반환합니다.
    pub fn pattern_names(&self) -> String {
        self.patterns
            .iter()
            .map(|p| p.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// 알림 작업용 Result 타입.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// 알림 에러.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("알림 전송 실패: {0}")]
    SendFailed(String),

    #[error("잘못된 설정: {0}")]
    InvalidConfig(String),

    #[error("요청 한도 초과: {0}초 후 재시도")]
    RateLimited(u64),

    #[error("네트워크 에러: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("직렬화 에러: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// 알림 전송기 trait.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// 알림을 전송합니다.
    async fn send(&self, alert: &PatternAlert) -> NotificationResult<()>;

    /// 전송기가 활성화되어 있는지 확인합니다.
    fn is_enabled(&self) -> bool;

    /// 전송기 이름을 반환합니다.
    fn name(&self) -> &str;
}
