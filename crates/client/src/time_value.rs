//! Parsing and formatting of textual time values such as `30s` or `500ms`.
//!
//! Accepted grammar: a non-negative decimal number followed by one of
//! `nanos`, `micros`, `ms`, `s`, `m`, `h`, `d`, `w`. A bare integer is read as
//! milliseconds. Units are case-insensitive.

use std::time::Duration;

use crate::error::{AdminError, Result};

const NANOS_PER_MICRO: f64 = 1_000.0;
const NANOS_PER_MILLI: f64 = 1_000_000.0;
const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Suffixes in match order. Longer suffixes that end in a shorter one
/// (`nanos`, `ms`) must come first.
const UNITS: &[(&str, f64)] = &[
    ("nanos", 1.0),
    ("micros", NANOS_PER_MICRO),
    ("ms", NANOS_PER_MILLI),
    ("s", NANOS_PER_SEC),
    ("m", 60.0 * NANOS_PER_SEC),
    ("h", 3_600.0 * NANOS_PER_SEC),
    ("d", 86_400.0 * NANOS_PER_SEC),
    ("w", 604_800.0 * NANOS_PER_SEC),
];

/// Parse a time value for the named setting.
///
/// # Errors
///
/// Returns [`AdminError::Parse`] naming `setting` and the raw value when the
/// input is empty, negative, has an unknown unit, or does not fit a `Duration`.
pub fn parse_time_value(value: &str, setting: &str) -> Result<Duration> {
    let normalized = value.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(AdminError::parse(setting, value, "empty time value"));
    }

    let (number, nanos_per_unit) = match UNITS
        .iter()
        .find(|(suffix, _)| normalized.ends_with(suffix))
    {
        Some((suffix, factor)) => (&normalized[..normalized.len() - suffix.len()], *factor),
        None if normalized.bytes().all(|b| b.is_ascii_digit()) => {
            (normalized.as_str(), NANOS_PER_MILLI)
        }
        None => {
            return Err(AdminError::parse(
                setting,
                value,
                "unknown time unit, expected one of nanos, micros, ms, s, m, h, d, w",
            ));
        }
    };

    let number = number.trim();
    if !is_plain_decimal(number) {
        return Err(AdminError::parse(
            setting,
            value,
            "expected a non-negative number before the unit",
        ));
    }

    let amount: f64 = number
        .parse()
        .map_err(|_| AdminError::parse(setting, value, "expected a number before the unit"))?;
    let nanos = amount * nanos_per_unit;
    if !nanos.is_finite() || nanos > u64::MAX as f64 {
        return Err(AdminError::parse(setting, value, "time value out of range"));
    }

    Ok(Duration::from_nanos(nanos.round() as u64))
}

fn is_plain_decimal(text: &str) -> bool {
    let mut seen_dot = false;
    let mut seen_digit = false;
    for c in text.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}

/// Render a duration in the largest unit that represents it exactly.
pub fn format_time_value(duration: Duration) -> String {
    const FORMAT_UNITS: &[(&str, u128)] = &[
        ("d", 86_400 * 1_000_000_000),
        ("h", 3_600 * 1_000_000_000),
        ("m", 60 * 1_000_000_000),
        ("s", 1_000_000_000),
        ("ms", 1_000_000),
        ("micros", 1_000),
    ];

    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    for (suffix, unit) in FORMAT_UNITS {
        if nanos % unit == 0 {
            return format!("{}{}", nanos / unit, suffix);
        }
    }
    format!("{}nanos", nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(
            parse_time_value("30s", "timeout").unwrap(),
            Duration::from_secs(30)
        );
        assert_eq!(
            parse_time_value("500ms", "timeout").unwrap(),
            Duration::from_millis(500)
        );
        assert_eq!(
            parse_time_value("2m", "timeout").unwrap(),
            Duration::from_secs(120)
        );
        assert_eq!(
            parse_time_value("1h", "timeout").unwrap(),
            Duration::from_secs(3600)
        );
        assert_eq!(
            parse_time_value("1d", "timeout").unwrap(),
            Duration::from_secs(86_400)
        );
        assert_eq!(
            parse_time_value("1w", "timeout").unwrap(),
            Duration::from_secs(604_800)
        );
        assert_eq!(
            parse_time_value("250micros", "timeout").unwrap(),
            Duration::from_micros(250)
        );
        assert_eq!(
            parse_time_value("10nanos", "timeout").unwrap(),
            Duration::from_nanos(10)
        );
    }

    #[test]
    fn test_parse_bare_number_is_millis() {
        assert_eq!(
            parse_time_value("1500", "timeout").unwrap(),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_parse_fraction_and_case() {
        assert_eq!(
            parse_time_value("1.5S", "timeout").unwrap(),
            Duration::from_millis(1500)
        );
        assert_eq!(
            parse_time_value(" 10s ", "timeout").unwrap(),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["abc", "", "-1s", "s", "1.2.3s", "10x", "1e3s", "inf", "ten seconds"] {
            let err = parse_time_value(input, "timeout").unwrap_err();
            match err {
                AdminError::Parse { setting, value, .. } => {
                    assert_eq!(setting, "timeout");
                    assert_eq!(value, input);
                }
                other => panic!("Expected Parse error for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_parse_zero_is_allowed() {
        assert_eq!(parse_time_value("0s", "timeout").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_format_largest_exact_unit() {
        assert_eq!(format_time_value(Duration::from_secs(60)), "1m");
        assert_eq!(format_time_value(Duration::from_secs(90)), "90s");
        assert_eq!(format_time_value(Duration::from_millis(500)), "500ms");
        assert_eq!(format_time_value(Duration::from_secs(7200)), "2h");
        assert_eq!(format_time_value(Duration::from_nanos(7)), "7nanos");
        assert_eq!(format_time_value(Duration::ZERO), "0s");
    }
}
