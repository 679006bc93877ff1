//! Wall-clock timestamps in the fixed persisted format.
//!
//! Timestamps are naive local date-times truncated to microseconds, so a value
//! survives a format/parse cycle unchanged.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Deserializer};

use crate::error::{ModelError, ModelResult};

/// `YYYY-MM-DDTHH:MM:SS.ffffff`
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub type Timestamp = NaiveDateTime;

/// Current local time at microsecond precision.
pub fn now() -> Timestamp {
    Local::now().naive_local().trunc_subsecs(6)
}

pub fn format(ts: &Timestamp) -> String {
    ts.format(FORMAT).to_string()
}

/// Parse a timestamp written by [`format`].
pub fn parse(value: &str) -> ModelResult<Timestamp> {
    NaiveDateTime::parse_from_str(value, FORMAT)
        .map_err(|e| ModelError::validation(format!("invalid timestamp '{value}': {e}")))
}

/// Serde adapter: accepts only a string in [`FORMAT`]; `null` and other JSON
/// types are rejected.
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, FORMAT)
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn format_always_carries_six_fraction_digits() {
        let ts = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(format(&ts), "2023-01-01T10:00:00.000000");
    }

    #[test]
    fn parse_reads_microseconds() {
        let ts = parse("2023-01-01T10:00:05.123456").unwrap();
        assert_eq!(ts.second(), 5);
        assert_eq!(ts.nanosecond(), 123_456_000);
    }

    #[test]
    fn parse_rejects_other_layouts() {
        assert!(parse("2023-01-01 10:00:00.000000").is_err());
        assert!(parse("yesterday").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn now_survives_a_format_cycle() {
        let ts = now();
        assert_eq!(parse(&format(&ts)).unwrap(), ts);
    }
}
