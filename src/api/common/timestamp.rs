//
//  titan-cli
//  api/common/timestamp.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Timestamps that tolerate both JSON encodings used by the API.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A Unix timestamp (seconds) sent either as a JSON number or a JSON string.
///
/// Decoding tries a number first, then a numeric string, then `null`.
/// Empty strings decode as "not set". The value is only considered set when
/// it is strictly positive.
///
/// # Example
///
/// ```rust
/// use titan_cli::api::common::FlexTimestamp;
///
/// let a: FlexTimestamp = serde_json::from_str("1700000000").unwrap();
/// let b: FlexTimestamp = serde_json::from_str("\"1700000000\"").unwrap();
/// assert_eq!(a, b);
/// assert!(a.is_set());
///
/// let none: FlexTimestamp = serde_json::from_str("null").unwrap();
/// assert!(!none.is_set());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlexTimestamp(Option<i64>);

impl FlexTimestamp {
    pub fn new(seconds: i64) -> Self {
        Self(Some(seconds))
    }

    /// The raw value, whatever its sign.
    pub fn value(&self) -> Option<i64> {
        self.0
    }

    /// True when a strictly positive value was decoded.
    pub fn is_set(&self) -> bool {
        self.0.is_some_and(|v| v > 0)
    }

    /// The value as seconds when it is set.
    pub fn seconds(&self) -> Option<i64> {
        self.0.filter(|v| *v > 0)
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        self.seconds().and_then(|s| DateTime::from_timestamp(s, 0))
    }
}

impl fmt::Display for FlexTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            None => f.write_str("-"),
        }
    }
}

impl Serialize for FlexTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(v) => serializer.serialize_i64(v),
            None => serializer.serialize_none(),
        }
    }
}

struct FlexTimestampVisitor;

impl<'de> Visitor<'de> for FlexTimestampVisitor {
    type Value = FlexTimestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a unix timestamp as a number, a numeric string or null")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(FlexTimestamp(Some(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(|v| FlexTimestamp(Some(v)))
            .map_err(|_| E::custom(format!("timestamp {v} out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.is_finite() {
            Ok(FlexTimestamp(Some(v.trunc() as i64)))
        } else {
            Err(E::custom("timestamp is not a finite number"))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            return Ok(FlexTimestamp(None));
        }
        trimmed
            .parse::<i64>()
            .map(|v| FlexTimestamp(Some(v)))
            .map_err(|_| E::custom(format!("invalid timestamp string {v:?}")))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(FlexTimestamp(None))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(FlexTimestamp(None))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(FlexTimestampVisitor)
    }
}

impl<'de> Deserialize<'de> for FlexTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlexTimestampVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default)]
        created_at: FlexTimestamp,
    }

    #[test]
    fn test_number_and_string_agree() {
        for v in [0_i64, 1, 500, 1_000, 1_700_000_000, i64::MAX] {
            let from_number: FlexTimestamp = serde_json::from_str(&v.to_string()).unwrap();
            let from_string: FlexTimestamp = serde_json::from_str(&format!("\"{v}\"")).unwrap();
            assert_eq!(from_number.value(), Some(v));
            assert_eq!(from_string.value(), Some(v));
        }
    }

    #[test]
    fn test_null_is_not_set() {
        let ts: FlexTimestamp = serde_json::from_str("null").unwrap();
        assert!(!ts.is_set());
        assert_eq!(ts.value(), None);
    }

    #[test]
    fn test_zero_and_negative_are_not_set() {
        let zero: FlexTimestamp = serde_json::from_str("0").unwrap();
        let negative: FlexTimestamp = serde_json::from_str("\"-5\"").unwrap();
        assert!(!zero.is_set());
        assert!(!negative.is_set());
        assert_eq!(negative.value(), Some(-5));
    }

    #[test]
    fn test_missing_field_defaults() {
        let holder: Holder = serde_json::from_str("{}").unwrap();
        assert!(!holder.created_at.is_set());
        let holder: Holder = serde_json::from_str(r#"{"created_at":null}"#).unwrap();
        assert!(!holder.created_at.is_set());
    }

    #[test]
    fn test_garbage_string_fails() {
        assert!(serde_json::from_str::<FlexTimestamp>("\"yesterday\"").is_err());
        assert!(serde_json::from_str::<FlexTimestamp>("true").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(FlexTimestamp::new(0).to_string(), "-");
        assert_eq!(FlexTimestamp::new(86_400).to_string(), "1970-01-02 00:00:00");
    }
}
