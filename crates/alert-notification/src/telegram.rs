//! 텔레그램 알림 서비스.
//!
//! Telegram Bot API의 sendMessage를 통해 패턴 알림을 전송합니다.

use crate::types::{NotificationError, NotificationResult, NotificationSender, PatternAlert};
use alert_strategy::Signal;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// 전송 요청 타임아웃.
///
/// 네트워크가 멈춰도 알림 루프가 무한정 막히지 않도록 합니다.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// 텔레그램 알림 전송 설정.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// @BotFather에서 받은 봇 토큰
    pub bot_token: String,
    /// 메시지를 보낼 채팅 ID
    pub chat_id: String,
    /// 전송 활성화 여부
    pub enabled: bool,
    /// 파싱 모드 (HTML 또는 MarkdownV2)
    pub parse_mode: String,
}

impl TelegramConfig {
    /// 새 텔레그램 설정을 생성합니다.
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            bot_token,
            chat_id,
            enabled: true,
            parse_mode: "HTML".to_string(),
        }
    }

    /// 비활성화된 설정을 생성합니다.
    pub fn disabled() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            enabled: false,
            parse_mode: "HTML".to_string(),
        }
    }

    /// 환경 변수에서 설정을 생성합니다.
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok()?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID").ok()?;
        let enabled = std::env::var("TELEGRAM_ENABLED")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(true);

        Some(Self {
            bot_token,
            chat_id,
            enabled,
            parse_mode: "HTML".to_string(),
        })
    }
}

/// 텔레그램 알림 전송기.
pub struct TelegramSender {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramSender {
    /// 새 텔레그램 전송기를 생성합니다.
    pub fn new(config: TelegramConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { config, client }
    }

    /// 환경 변수에서 전송기를 생성합니다.
    pub fn from_env() -> Option<Self> {
        TelegramConfig::from_env().map(Self::new)
    }

    /// 알림을 텔레그램 메시지로 포맷합니다.
    fn format_message(&self, alert: &PatternAlert) -> String {
        let signal_emoji = match alert.signal {
            Signal::Buy => "🟢",
            Signal::Sell => "🔴",
            Signal::Neutral => "⚪",
        };

        let candle = &alert.candle;
        let time_str = alert
            .local_close_time()
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string();

        format!(
            "📈 <b>패턴 감지</b>\n\n\
             심볼: <code>{}</code>\n\
             패턴: {}\n\
             신호: {signal_emoji} <b>{}</b>\n\
             마감 시각: {time_str}\n\
             시가: {:.2}  고가: {:.2}  저가: {:.2}  종가: {:.2}\n\
             변동률: {:.3}%",
            alert.symbol,
            alert.pattern_names(),
            alert.signal,
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            candle.change_percent(),
        )
    }

    /// 텔레그램에 원시 메시지를 전송합니다.
    async fn send_message(&self, text: &str) -> NotificationResult<()> {
        let url = format!(
            "https://api.telegram.org/bot{}/sendMessage",
            self.config.bot_token
        );

        let params = serde_json::json!({
            "chat_id": self.config.chat_id,
            "text": text,
            "parse_mode": self.config.parse_mode,
            "disable_web_page_preview": true,
        });

        debug!(
            "Sending Telegram message to chat_id: {}",
            self.config.chat_id
        );

        let response = self
            .client
            .post(&url)
            .json(&params)
            .send()
            .await
            .map_err(NotificationError::NetworkError)?;

        if response.status().is_success() {
            info!("Telegram notification sent successfully");
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            // 요청 한도 제한 확인
            if status.as_u16() == 429 {
                warn!("Telegram rate limited");
                return Err(NotificationError::RateLimited(60));
            }

            error!("Failed to send Telegram message: {} - {}", status, body);
            Err(NotificationError::SendFailed(format!(
                "HTTP {}: {}",
                status, body
            )))
        }
    }
}

#[async_trait]
impl NotificationSender for TelegramSender {
    async fn send(&self, alert: &PatternAlert) -> NotificationResult<()> {
        if !self.is_enabled() {
            debug!("Telegram notifications are disabled, skipping");
            return Ok(());
        }

        let message = self.format_message(alert);
        self.send_message(&message).await
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled && !self.config.bot_token.is_empty() && !self.config.chat_id.is_empty()
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
