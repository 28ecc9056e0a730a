//! Time utilities.

use chrono::Utc;

/// Get the current Unix timestamp in UTC milliseconds.
///
/// Message envelopes carry this value as `createdAt`; clients are expected
/// to render it in their own local time.
pub fn now_utc_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_utc_millis_returns_positive_value() {
        let timestamp = now_utc_millis();

        assert!(timestamp > 0);
    }

    #[test]
    fn test_now_utc_millis_is_monotonic_enough() {
        let first = now_utc_millis();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = now_utc_millis();

        assert!(second >= first);
    }
}
