//! Timestamp (de)serialization for record fields.
//!
//! Snapshots carry timestamps as naive UTC strings of the form
//! `2017-09-28T21:03:54.052298` (microsecond precision, no zone suffix).
//! This module is used as a `#[serde(with = "timestamp")]` adapter on the
//! `created_at` / `updated_at` fields of every model.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{self, Deserialize, Deserializer, Serializer};

/// Wire format written to snapshots.
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Parse format: accepts any sub-second precision, including none.
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// The current time, truncated to microsecond precision.
///
/// Truncation keeps in-memory values equal to their snapshot round-trip.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.format(FORMAT).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let naive = NaiveDateTime::parse_from_str(&s, PARSE_FORMAT)
        .map_err(serde::de::Error::custom)?;
    Ok(DateTime::from_naive_utc_and_offset(naive, Utc))
}

/// Format a timestamp as its wire string.
pub fn to_wire(dt: &DateTime<Utc>) -> String {
    dt.format(FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "super")]
        at: DateTime<Utc>,
    }

    #[test]
    fn wire_format_roundtrip() {
        let stamped = Stamped { at: now() };
        let json = serde_json::to_string(&stamped).unwrap();
        let parsed: Stamped = serde_json::from_str(&json).unwrap();
        assert_eq!(stamped, parsed);
    }

    #[test]
    fn serializes_without_zone_suffix() {
        let stamped = Stamped { at: now() };
        let json = serde_json::to_string(&stamped).unwrap();
        assert!(!json.contains('Z'));
        assert!(!json.contains("+00"));
    }

    #[test]
    fn parses_known_value() {
        let json = r#"{"at":"2017-09-28T21:03:54.052298"}"#;
        let parsed: Stamped = serde_json::from_str(json).unwrap();
        assert_eq!(to_wire(&parsed.at), "2017-09-28T21:03:54.052298");
    }

    #[test]
    fn parses_without_subseconds() {
        let json = r#"{"at":"2017-09-28T21:03:54"}"#;
        let parsed: Stamped = serde_json::from_str(json).unwrap();
        assert_eq!(to_wire(&parsed.at), "2017-09-28T21:03:54.000000");
    }

    #[test]
    fn rejects_garbage() {
        let json = r#"{"at":"yesterday"}"#;
        assert!(serde_json::from_str::<Stamped>(json).is_err());
    }

    #[test]
    fn now_is_microsecond_precise() {
        let at = now();
        assert_eq!(at.nanosecond() % 1_000, 0);
    }
}
