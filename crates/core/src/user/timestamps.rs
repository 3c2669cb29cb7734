use chrono::{DateTime, SubsecRound, TimeDelta, Utc};

/// Current time truncated to the precision of the canonical timestamp format.
///
/// Truncating here keeps a freshly built `User` equal to the one read back
/// from the store.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Compute the `lastModified` value for an update.
///
/// The result is `now`, unless that would not move past `previous` (clock
/// skew, or two updates inside the same millisecond), in which case it is
/// one millisecond after `previous`.
pub fn next_last_modified(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(previous + TimeDelta::milliseconds(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_now_has_millisecond_precision() {
        let ts = now();
        assert_eq!(ts.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn test_next_last_modified_uses_now_when_later() {
        let previous = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let current = Utc.with_ymd_and_hms(2024, 1, 15, 11, 0, 0).unwrap();

        assert_eq!(next_last_modified(previous, current), current);
    }

    #[test]
    fn test_next_last_modified_advances_on_same_instant() {
        let previous = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();

        let next = next_last_modified(previous, previous);
        assert_eq!(next, previous + TimeDelta::milliseconds(1));
    }

    #[test]
    fn test_next_last_modified_never_goes_backwards() {
        let previous = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let skewed = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();

        assert!(next_last_modified(previous, skewed) > previous);
    }
}
