//! 패턴 집합의 매매 신호 변환.

use crate::patterns::PatternKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 방향 신호.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

impl Signal {
    /// 패턴 집합을 고정 우선순위로 하나의 신호로 줄입니다.
    ///
    /// 상승 패턴 집합을 먼저 검사하므로, 상승/하락 패턴이 같은
    /// 캔들에서 동시에 성립하면 BUY가 됩니다. 검사 순서는 동작
    /// 호환성을 위해 바꾸지 않습니다.
    pub fn from_patterns(patterns: &[PatternKind]) -> Self {
        let bullish = [PatternKind::Hammer, PatternKind::BullishEngulfing];
        let bearish = [PatternKind::InvertedHammer, PatternKind::BearishEngulfing];

        if patterns.iter().any(|p| bullish.contains(p)) {
            Signal::Buy
        } else if patterns.iter().any(|p| bearish.contains(p)) {
            Signal::Sell
        } else {
            Signal::Neutral
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Neutral => "NEUTRAL",
        };
        f.write_str(s)
    }
}
