//! 캔들 마감 감시 루프.
//!
//! 가져오기 → 특징 계산 → 분류 → 중복 제거 → 알림의 순차 루프를
//! 소유합니다. 동시에 평가되는 캔들은 구조상 존재하지 않습니다.

use crate::config::WatcherConfig;
use crate::error::Result;
use crate::scheduler;
use alert_data::MarketDataProvider;
use alert_notification::{NotificationSender, PatternAlert};
use alert_strategy::{classify, derive_features, PatternKind, Signal};
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

/// 평가에 필요한 최소 캔들 수.
///
/// 특징 쌍 2개 + 아직 형성 중일 수 있는 마지막 캔들 1개.
const MIN_CANDLES: usize = 3;

/// 틱 하나의 처리 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// 데이터가 없거나 부족하여 건너뜀
    NotEnoughData,
    /// 이미 평가한 캔들이라 건너뜀
    AlreadyEvaluated,
    /// 새 캔들을 평가함
    Evaluated {
        patterns: Vec<PatternKind>,
        signal: Signal,
        notified: bool,
    },
}

/// 캔들 마감 감시자.
pub struct AlertWatcher {
    config: WatcherConfig,
    provider: Box<dyn MarketDataProvider>,
    sender: Box<dyn NotificationSender>,
    /// 마지막으로 평가한 캔들의 마감 시각.
    ///
    /// 중복 제거의 유일한 키입니다. 내용이 아니라 타임스탬프만
    /// 비교하므로, 공급자가 이미 처리한 캔들의 값을 나중에 수정해도
    /// 다시 알리지 않습니다. 재시작하면 잊혀지며 처리 중이던 캔들에
    /// 대해 한 번 더 알릴 수 있습니다.
    last_alerted: Option<DateTime<Utc>>,
}

impl AlertWatcher {
    /// 새 감시자를 생성합니다.
    pub fn new(
        config: WatcherConfig,
        provider: Box<dyn MarketDataProvider>,
        sender: Box<dyn NotificationSender>,
    ) -> Self {
        Self {
            config,
            provider,
            sender,
            last_alerted: None,
        }
    }

    /// 감시 루프를 실행합니다. ctrl-c 신호로만 종료됩니다.
    pub async fn run(mut self) {
        info!(
            symbol = %self.config.symbol,
            timeframe = %self.config.timeframe,
            timezone = %self.config.timezone,
            "캔들 패턴 감시 시작"
        );

        loop {
            let now = Utc::now().with_timezone(&self.config.timezone);
            let delay = scheduler::wake_delay(now, self.config.timeframe);
            debug!(delay_secs = delay.as_secs(), "다음 캔들 마감까지 대기");

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("종료 신호 수신, 감시 종료 중...");
                    break;
                }
                _ = tokio::time::sleep(delay) => {}
            }

            // 어떤 에러도 틱을 건너뛰는 것으로 끝난다. 루프는 계속된다.
            match self.tick().await {
                Ok(outcome) => debug!(?outcome, "틱 완료"),
                Err(e) => error!(error = %e, "틱 처리 실패, 다음 캔들 마감까지 대기"),
            }
        }
    }

    /// 틱 하나를 처리합니다: 가져오기, 평가, 필요 시 알림.
    pub async fn tick(&mut self) -> Result<TickOutcome> {
        let candles = self
            .provider
            .fetch_candles(
                &self.config.symbol,
                self.config.timeframe,
                self.config.lookback_days,
            )
            .await?;

        if candles.len() < MIN_CANDLES {
            info!(count = candles.len(), "캔들 수 부족, 이번 틱 건너뜀");
            return Ok(TickOutcome::NotEnoughData);
        }

        // 마지막 캔들은 아직 형성 중일 수 있으므로 그 직전 캔들을 평가한다.
        let closed = &candles[candles.len() - 2];
        let prev = &candles[candles.len() - 3];

        if self.last_alerted == Some(closed.close_time) {
            debug!(close_time = %closed.close_time, "이미 평가한 캔들, 건너뜀");
            return Ok(TickOutcome::AlreadyEvaluated);
        }

        let last_features = derive_features(closed)?;
        let prev_features = derive_features(prev)?;
        let patterns = classify(&last_features, &prev_features);
        let signal = Signal::from_patterns(&patterns);

        let mut notified = false;
        if !patterns.is_empty() {
            info!(
                close_time = %closed.close_time,
                ?patterns,
                %signal,
                "패턴 감지"
            );

            let alert = PatternAlert::new(
                self.config.symbol.clone(),
                patterns.clone(),
                signal,
                closed.clone(),
                self.config.timezone,
            );

            // 전송 실패는 로그만 남긴다. 캔들은 이미 평가되었으므로
            // 다음 틱에 다시 보내지 않는다.
            match self.sender.send(&alert).await {
                Ok(()) => notified = true,
                Err(e) => warn!(
                    error = %e,
                    close_time = %closed.close_time,
                    "알림 전송 실패, 해당 캔들은 재시도하지 않음"
                ),
            }
        }

        // 패턴 유무/전송 성패와 무관하게 평가 완료로 기록한다.
        self.last_alerted = Some(closed.close_time);

        Ok(TickOutcome::Evaluated {
            patterns,
            signal,
            notified,
        })
    }
}
