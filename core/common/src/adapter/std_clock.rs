//! 標準時刻実装（chrono::Local を委譲）

use crate::ports::outbound::Clock;

/// ISO-8601（タイムゾーンなし、マイクロ秒まで）
const LOCAL_ISO8601: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// システムのローカル時刻を使う Clock 実装
#[derive(Debug, Clone, Default)]
pub struct StdClock;

impl Clock for StdClock {
    fn now_local_iso8601(&self) -> String {
        chrono::Local::now().format(LOCAL_ISO8601).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_now_local_iso8601_parses_and_is_non_decreasing() {
        let clock = StdClock;
        let a = clock.now_local_iso8601();
        let b = clock.now_local_iso8601();
        let ta = NaiveDateTime::parse_from_str(&a, LOCAL_ISO8601).unwrap();
        let tb = NaiveDateTime::parse_from_str(&b, LOCAL_ISO8601).unwrap();
        assert!(ta <= tb);
        assert_eq!(a.len(), "2026-10-16T09:30:00.000001".len());
    }
}
