//! Canonical date-time text formats and their serde adapters.
//!
//! Every date-time that leaves the process (JSON bodies, store attributes)
//! goes through the functions in this module so there is exactly one
//! textual representation per value.

use chrono::{DateTime, FixedOffset, ParseError, SecondsFormat, Utc};

/// Format a server-assigned timestamp: UTC, millisecond precision, `Z` suffix.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp and normalize it to UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}

/// Format a caller-supplied date-time, keeping its offset.
///
/// Zero offsets are rendered as `Z`; fractional seconds only appear when
/// the value has them.
pub fn format_date_time(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse an RFC 3339 date-time without normalizing its offset.
pub fn parse_date_time(value: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    DateTime::parse_from_rfc3339(value)
}

/// Serde adapter for `DateTime<Utc>` fields using [`format_timestamp`].
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_timestamp(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `DateTime<FixedOffset>` fields using [`format_date_time`].
pub mod date_time {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date_time(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_date_time(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(with = "timestamp")]
        at: DateTime<Utc>,
        #[serde(with = "date_time")]
        born: DateTime<FixedOffset>,
    }

    #[test]
    fn test_format_timestamp_uses_millis_and_z() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn test_parse_timestamp_normalizes_offset() {
        let ts = parse_timestamp("2024-01-15T12:30:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_timestamp("not-a-date").is_err());
        assert!(parse_timestamp("2024-01-15").is_err());
    }

    #[test]
    fn test_format_date_time_keeps_zulu_input() {
        let dob = parse_date_time("1970-12-09T00:00:00Z").unwrap();
        assert_eq!(format_date_time(&dob), "1970-12-09T00:00:00Z");
    }

    #[test]
    fn test_format_date_time_keeps_offset() {
        let dob = parse_date_time("1970-12-09T00:00:00-05:00").unwrap();
        assert_eq!(format_date_time(&dob), "1970-12-09T00:00:00-05:00");
    }

    #[test]
    fn test_serde_adapters() {
        let json = r#"{"at":"2024-01-15T10:30:00.250Z","born":"1970-12-09T00:00:00Z"}"#;
        let parsed: TestStruct = serde_json::from_str(json).unwrap();

        assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
    }

    #[test]
    fn test_serde_adapter_rejects_invalid() {
        let json = r#"{"at":"yesterday","born":"1970-12-09T00:00:00Z"}"#;
        let result: Result<TestStruct, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
