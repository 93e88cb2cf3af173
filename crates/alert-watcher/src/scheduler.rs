//! 캔들 마감 경계 스케줄링.
//!
//! 경계 연산은 순수 함수이므로 실제 대기 없이 단위 테스트할 수
//! 있습니다. 잠드는 것은 호출자(AlertWatcher)의 몫입니다.

use alert_core::Timeframe;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Timelike};
use std::time::Duration;

/// 경계 뒤에 두는 유예 시간.
///
/// 공급자가 캔들 발행을 마칠 시간을 줍니다.
pub const CLOSE_GRACE: Duration = Duration::from_secs(5);

/// 현재 시각 바로 다음의 캔들 마감 경계를 계산합니다.
///
/// 분 단위를 타임프레임의 다음 배수로 올림하고, 60분에 도달하면
/// 다음 시각 0분으로 넘어갑니다. 결과는 항상 `now`보다 엄격히
/// 뒤이며 초/나노초는 0입니다.
pub fn next_boundary<Tz: TimeZone>(now: DateTime<Tz>, timeframe: Timeframe) -> DateTime<Tz> {
    let interval = timeframe.as_minutes() as u32;
    let next_minute = (now.minute() / interval + 1) * interval;

    let base = now
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .expect("초/나노초 0은 항상 유효");

    if next_minute >= 60 {
        base.with_minute(0).expect("0분은 항상 유효") + ChronoDuration::hours(1)
    } else {
        base.with_minute(next_minute).expect("경계 분은 60 미만")
    }
}

/// 다음 경계(+유예 시간)까지 기다릴 시간을 계산합니다.
pub fn wake_delay<Tz: TimeZone>(now: DateTime<Tz>, timeframe: Timeframe) -> Duration {
    let boundary = next_boundary(now.clone(), timeframe);
    let until = boundary - now;
    until.to_std().unwrap_or(Duration::ZERO) + CLOSE_GRACE
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, s).unwrap()
    }

    #[test]
    fn test_rounds_up_to_next_interval() {
        // 10:07:00, 15분봉 → 10:15:00 경계, 유예 포함 10:15:05
        let boundary = next_boundary(at(10, 7, 0), Timeframe::M15);
        assert_eq!(boundary, at(10, 15, 0));
        assert_eq!(
            wake_delay(at(10, 7, 0), Timeframe::M15),
            Duration::from_secs(8 * 60 + 5)
        );
    }

    #[test]
    fn test_hour_rollover() {
        // 10:58:30 → 11:00:00 경계, 유예 포함 95초 대기
        let boundary = next_boundary(at(10, 58, 30), Timeframe::M15);
        assert_eq!(boundary, at(11, 0, 0));
        assert_eq!(
            wake_delay(at(10, 58, 30), Timeframe::M15),
            Duration::from_secs(95)
        );
    }

    #[test]
    fn test_exact_boundary_moves_to_next() {
        // 경계 위에 있으면 다음 경계로 (항상 엄격히 이후)
        let boundary = next_boundary(at(10, 15, 0), Timeframe::M15);
        assert_eq!(boundary, at(10, 30, 0));
    }

    #[test]
    fn test_hourly_timeframe() {
        let boundary = next_boundary(at(10, 7, 0), Timeframe::H1);
        assert_eq!(boundary, at(11, 0, 0));
    }

    #[test]
    fn test_half_hour_offset_timezone() {
        // IST(+05:30)에서도 분 단위 경계 연산이 그대로 성립
        let now = chrono_tz::Asia::Kolkata
            .with_ymd_and_hms(2024, 1, 1, 10, 7, 0)
            .unwrap();
        let boundary = next_boundary(now, Timeframe::M15);
        assert_eq!(boundary.minute(), 15);
        assert_eq!(boundary.hour(), 10);
    }
}
