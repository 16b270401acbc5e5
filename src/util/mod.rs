//
//  titan-cli
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Small helpers shared by the API layer and the command handlers.
//!
//! ## Categories
//!
//! - **URL Utilities**: [`encode_segment`], [`query_string`]
//! - **Time Utilities**: [`format_relative_time`], [`parse_lifetime`], [`expiry_from_now`]
//! - **String Utilities**: [`truncate`]
//!
//! ## Example
//!
//! ```rust
//! use titan_cli::util::{encode_segment, query_string, truncate};
//!
//! assert_eq!(encode_segment("my key"), "my%20key");
//! assert_eq!(query_string(&[("page", Some("2")), ("server_oid", None)]), "?page=2");
//! assert_eq!(truncate("a long server name", 10), "a long ...");
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};
use url::form_urlencoded;

/// Percent-encodes one path segment.
///
/// Spaces become `%20`, not `+`, since the value lands in a path.
pub fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Builds a `?k=v&...` query string, skipping absent values.
///
/// Returns an empty string when every value is absent.
pub fn query_string(pairs: &[(&str, Option<&str>)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in pairs {
        if let Some(value) = value {
            serializer.append_pair(key, value);
            any = true;
        }
    }
    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}

/// Current Unix time in seconds.
pub fn now_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Formats a Unix timestamp relative to now, e.g. `3 days ago`.
pub fn format_relative_time(timestamp: i64) -> String {
    let diff = now_seconds() - timestamp;

    if diff < 0 {
        return "in the future".to_string();
    }

    let diff = diff as u64;
    let (count, unit) = match diff {
        0..=59 => return "just now".to_string(),
        60..=3599 => (diff / 60, "minute"),
        3600..=86399 => (diff / 3600, "hour"),
        86400..=2591999 => (diff / 86400, "day"),
        2592000..=31535999 => (diff / 2592000, "month"),
        _ => (diff / 31536000, "year"),
    };
    format!("{} {}{} ago", count, unit, if count == 1 { "" } else { "s" })
}

/// Parses a lifetime such as `90d`, `12h` or `30m` into seconds.
///
/// A bare number is read as days.
///
/// # Errors
///
/// Returns an error for an empty, zero, negative or unknown-unit value.
///
/// # Example
///
/// ```rust
/// use titan_cli::util::parse_lifetime;
///
/// assert_eq!(parse_lifetime("2h").unwrap(), 7200);
/// assert_eq!(parse_lifetime("1").unwrap(), 86400);
/// assert!(parse_lifetime("3x").is_err());
/// ```
pub fn parse_lifetime(s: &str) -> Result<i64> {
    let s = s.trim().to_lowercase();
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (number, unit) = s.split_at(split);

    let Ok(number) = number.parse::<i64>() else {
        bail!("Invalid lifetime: '{}'", s);
    };
    if number <= 0 {
        bail!("Lifetime must be positive: '{}'", s);
    }

    let multiplier = match unit.trim() {
        "" | "d" | "day" | "days" => 86400,
        "w" | "week" | "weeks" => 7 * 86400,
        "h" | "hour" | "hours" => 3600,
        "m" | "min" | "minutes" => 60,
        other => bail!("Unknown lifetime unit: '{}'", other),
    };

    number
        .checked_mul(multiplier)
        .ok_or_else(|| anyhow::anyhow!("Lifetime is too large: '{}'", s))
}

/// Unix time `lifetime` from now, e.g. the expiry of a new API token.
pub fn expiry_from_now(lifetime: &str) -> Result<i64> {
    let seconds = parse_lifetime(lifetime)?;
    now_seconds()
        .checked_add(seconds)
        .ok_or_else(|| anyhow::anyhow!("Lifetime is too large: '{}'", lifetime.trim()))
}

/// Truncates a string to at most `max_len` characters, ending with `...`.
pub fn truncate(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("192.0.2.1"), "192.0.2.1");
        assert_eq!(encode_segment("a/b c"), "a%2Fb%20c");
    }

    #[test]
    fn test_query_string() {
        assert_eq!(query_string(&[]), "");
        assert_eq!(query_string(&[("company_oid", None)]), "");
        assert_eq!(
            query_string(&[("page", Some("1")), ("q", Some("a b"))]),
            "?page=1&q=a+b"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_parse_lifetime() {
        assert_eq!(parse_lifetime("90d").unwrap(), 90 * 86400);
        assert_eq!(parse_lifetime("1w").unwrap(), 7 * 86400);
        assert_eq!(parse_lifetime("30m").unwrap(), 1800);
        assert!(parse_lifetime("0").is_err());
        assert!(parse_lifetime("").is_err());
        assert!(parse_lifetime("d").is_err());
    }

    #[test]
    fn test_lifetime_overflow_is_error() {
        let err = parse_lifetime("99999999999999999w").unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(parse_lifetime("99999999999999999999").is_err());

        let err = expiry_from_now(&format!("{}m", i64::MAX / 60)).unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(expiry_from_now("1d").unwrap() > now_seconds());
    }

    #[test]
    fn test_relative_time() {
        assert_eq!(format_relative_time(now_seconds()), "just now");
        assert_eq!(format_relative_time(now_seconds() - 7200), "2 hours ago");
        assert_eq!(format_relative_time(now_seconds() + 100), "in the future");
    }
}
