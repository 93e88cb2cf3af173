//! 고정 규칙 기반 캔들 패턴 분류.
//!
//! 마지막 캔들(및 직전 캔들)의 형태 특징을 여섯 가지 기하 규칙과
//! 대조합니다. 규칙은 서로 독립적이며 한 캔들이 여러 패턴에 동시에
//! 해당할 수 있습니다. 상호 배제는 없고, 순위나 신뢰도 점수도
//! 계산하지 않습니다.

use crate::features::CandleFeatures;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// 망치형/역망치형의 긴 꼬리 최소 비율.
pub const LONG_WICK_RATIO: Decimal = dec!(0.6);
/// 망치형/역망치형의 반대쪽 꼬리 최대 비율.
pub const SHORT_WICK_RATIO: Decimal = dec!(0.2);
/// 망치형/역망치형의 몸통 최대 비율.
pub const HAMMER_BODY_RATIO: Decimal = dec!(0.35);
/// 팽이형의 몸통 최대 비율.
pub const SPINNING_TOP_BODY_RATIO: Decimal = dec!(0.25);
/// 도지의 몸통 최대 비율.
pub const DOJI_BODY_RATIO: Decimal = dec!(0.05);

/// 캔들스틱 패턴 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternKind {
    /// 망치형 (반전 상승)
    Hammer,
    /// 역망치형 (반전 하락)
    InvertedHammer,
    /// 팽이형 (관망)
    SpinningTop,
    /// 도지 (관망)
    Doji,
    /// 상승 장악형
    BullishEngulfing,
    /// 하락 장악형
    BearishEngulfing,
}

impl PatternKind {
    /// 알림 메시지에 사용하는 패턴 이름을 반환합니다.
    pub fn label(&self) -> &'static str {
        match self {
            PatternKind::Hammer => "Hammer (bullish)",
            PatternKind::InvertedHammer => "Inverted Hammer (bearish)",
            PatternKind::SpinningTop => "Spinning Top (indecision)",
            PatternKind::Doji => "Doji (indecision)",
            PatternKind::BullishEngulfing => "Bullish Engulfing",
            PatternKind::BearishEngulfing => "Bearish Engulfing",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 망치형 감지: 긴 하단 꼬리, 짧은 상단 꼬리, 작은 몸통.
fn detect_hammer(last: &CandleFeatures) -> Option<PatternKind> {
    if last.lower_wick_ratio >= LONG_WICK_RATIO
        && last.upper_wick_ratio <= SHORT_WICK_RATIO
        && last.body_ratio <= HAMMER_BODY_RATIO
    {
        return Some(PatternKind::Hammer);
    }
    None
}

/// 역망치형 감지: 망치형의 상하 대칭.
fn detect_inverted_hammer(last: &CandleFeatures) -> Option<PatternKind> {
    if last.upper_wick_ratio >= LONG_WICK_RATIO
        && last.lower_wick_ratio <= SHORT_WICK_RATIO
        && last.body_ratio <= HAMMER_BODY_RATIO
    {
        return Some(PatternKind::InvertedHammer);
    }
    None
}

/// 팽이형 감지: 작은 몸통과 양쪽의 실제 꼬리.
///
/// 꼬리 조건은 비율이 아니라 절대 크기를 사용합니다.
fn detect_spinning_top(last: &CandleFeatures) -> Option<PatternKind> {
    if last.body_ratio <= SPINNING_TOP_BODY_RATIO
        && last.upper_wick > Decimal::ZERO
        && last.lower_wick > Decimal::ZERO
    {
        return Some(PatternKind::SpinningTop);
    }
    None
}

/// 도지 감지: 몸통이 범위의 5% 이하.
///
/// 팽이형과 동시에 성립할 수 있으며 둘 다 보고됩니다.
fn detect_doji(last: &CandleFeatures) -> Option<PatternKind> {
    if last.body_ratio <= DOJI_BODY_RATIO {
        return Some(PatternKind::Doji);
    }
    None
}

/// 상승 장악형 감지: 음봉 뒤의 양봉이 직전 몸통을 엄격히 포함.
fn detect_bullish_engulfing(
    last: &CandleFeatures,
    prev: &CandleFeatures,
) -> Option<PatternKind> {
    if prev.is_bearish()
        && last.is_bullish()
        && last.close > prev.open
        && last.open < prev.close
    {
        return Some(PatternKind::BullishEngulfing);
    }
    None
}

/// 하락 장악형 감지: 상승 장악형의 방향 반전.
fn detect_bearish_engulfing(
    last: &CandleFeatures,
    prev: &CandleFeatures,
) -> Option<PatternKind> {
    if prev.is_bullish()
        && last.is_bearish()
        && last.open > prev.close
        && last.close < prev.open
    {
        return Some(PatternKind::BearishEngulfing);
    }
    None
}

/// 마지막 캔들(과 직전 캔들)의 패턴을 분류합니다.
///
/// 반환 순서는 규칙 평가 순서와 같습니다. 시계열에 캔들이 하나뿐이면
/// `prev`에 `last`를 그대로 전달하십시오. 그 경우 장악형 규칙은
/// 같은 캔들이 양봉이면서 음봉일 수 없으므로 성립하지 않습니다.
pub fn classify(last: &CandleFeatures, prev: &CandleFeatures) -> Vec<PatternKind> {
    let mut patterns = Vec::new();

    // 단일 캔들 패턴
    patterns.extend(detect_hammer(last));
    patterns.extend(detect_inverted_hammer(last));
    patterns.extend(detect_spinning_top(last));
    patterns.extend(detect_doji(last));

    // 2봉 패턴
    patterns.extend(detect_bullish_engulfing(last, prev));
    patterns.extend(detect_bearish_engulfing(last, prev));

    if !patterns.is_empty() {
        debug!(count = patterns.len(), ?patterns, "패턴 감지");
    }
    patterns
}

/// 특징 시계열의 마지막 캔들을 분류합니다.
///
/// 직전 캔들이 없으면 마지막 캔들을 `prev`로 재사용합니다.
pub fn classify_series(features: &[CandleFeatures]) -> Vec<PatternKind> {
    let Some(last) = features.last() else {
        return Vec::new();
    };
    let prev = if features.len() >= 2 {
        &features[features.len() - 2]
    } else {
        last
    };
    classify(last, prev)
}
