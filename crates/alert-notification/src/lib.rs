//! # Alert Notification
//!
//! 캔들 패턴 알림 전송 서비스.
//!
//! 지원 채널:
//! - Telegram

pub mod telegram;
pub mod types;

pub use telegram::*;
pub use types::*;
