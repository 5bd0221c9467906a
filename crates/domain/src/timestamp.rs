//! Capture-time extraction from photo identifiers.
//!
//! Identifiers are produced by several generations of capture apps, so the
//! parser tries a handful of shapes in a fixed order and gives up quietly
//! when none of them fits.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const MILLIS_MIN_DIGITS: usize = 13;
const SECONDS_DIGITS: usize = 10;
const MAX_MICROS: u32 = 999_999;

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// Parses the capture instant encoded in `identifier`.
///
/// Rules, first structural match wins:
/// 1. 13 or more ASCII digits: milliseconds since the Unix epoch.
/// 2. exactly 10 ASCII digits: seconds since the Unix epoch.
/// 3. three `_`-separated parts: `YYYYMMDD_HHMMSS_micros`.
/// 4. anything else: ISO-like date/time after mapping `_` to `-` and `T` to a space.
///
/// Epoch values are interpreted in UTC. Any failure yields `None`.
pub fn parse_timestamp(identifier: &str) -> Option<NaiveDateTime> {
    let all_digits = !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit());

    if all_digits && identifier.len() >= MILLIS_MIN_DIGITS {
        let millis = identifier.parse::<i64>().ok()?;
        return DateTime::from_timestamp_millis(millis).map(|instant| instant.naive_utc());
    }
    if all_digits && identifier.len() == SECONDS_DIGITS {
        let seconds = identifier.parse::<i64>().ok()?;
        return DateTime::from_timestamp(seconds, 0).map(|instant| instant.naive_utc());
    }

    let parts: Vec<&str> = identifier.split('_').collect();
    if parts.len() == 3 {
        return parse_compact(parts[0], parts[1], parts[2]);
    }

    parse_generic(&identifier.replace('_', "-").replace('T', " "))
}

fn parse_compact(date_part: &str, time_part: &str, micro_part: &str) -> Option<NaiveDateTime> {
    let year: i32 = slice_number(date_part, 0, 4)?;
    let month: u32 = slice_number(date_part, 4, 6)?;
    let day: u32 = slice_number(date_part, 6, 8)?;
    let hour: u32 = slice_number(time_part, 0, 2)?;
    let minute: u32 = slice_number(time_part, 2, 4)?;
    let second: u32 = slice_number(time_part, 4, 6)?;
    let micros: u32 = micro_part.trim().parse().ok()?;

    // chrono accepts year 0 and leap-second micros; capture ids never carry either.
    if year < 1 || micros > MAX_MICROS {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_micro_opt(hour, minute, second, micros)
}

fn slice_number<T: std::str::FromStr>(value: &str, start: usize, end: usize) -> Option<T> {
    value.get(start..end)?.parse().ok()
}

fn parse_generic(candidate: &str) -> Option<NaiveDateTime> {
    let candidate = candidate.trim();

    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(candidate, format) {
            return Some(parsed);
        }
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(candidate, format) {
            return Some(parsed.naive_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(candidate, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn millisecond_identifiers_use_epoch_millis() {
        let parsed = parse_timestamp("1752776145592").expect("millis");
        let expected = DateTime::from_timestamp_millis(1_752_776_145_592)
            .expect("valid")
            .naive_utc();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.nanosecond(), 592_000_000);
    }

    #[test]
    fn ten_digit_identifiers_use_epoch_seconds() {
        let parsed = parse_timestamp("1752776145").expect("seconds");
        assert_eq!(parsed.and_utc().timestamp(), 1_752_776_145);
    }

    #[test]
    fn digit_strings_of_other_lengths_do_not_parse() {
        assert_eq!(parse_timestamp("12345678901"), None);
        assert_eq!(parse_timestamp("123"), None);
    }

    #[test]
    fn overflowing_millis_yield_none() {
        assert_eq!(parse_timestamp("99999999999999999999999"), None);
    }

    #[test]
    fn compact_underscore_format_is_parsed() {
        let parsed = parse_timestamp("20250717_181545_592272").expect("compact");
        assert_eq!(parsed.year(), 2025);
        assert_eq!(parsed.month(), 7);
        assert_eq!(parsed.day(), 17);
        assert_eq!(parsed.hour(), 18);
        assert_eq!(parsed.minute(), 15);
        assert_eq!(parsed.second(), 45);
        assert_eq!(parsed.nanosecond() / 1_000, 592_272);
    }

    #[test]
    fn compact_format_rejects_out_of_range_parts() {
        assert_eq!(parse_timestamp("20251317_181545_0"), None);
        assert_eq!(parse_timestamp("20250717_256000_0"), None);
        assert_eq!(parse_timestamp("20250717_181545_1000000"), None);
        assert_eq!(parse_timestamp("2025_07_17"), None);
    }

    #[test]
    fn iso_like_identifiers_fall_back_to_generic_parse() {
        let parsed = parse_timestamp("2025-07-17T18:15:45").expect("iso");
        assert_eq!(parsed.hour(), 18);
        assert_eq!(parsed.day(), 17);

        let one_underscore = parse_timestamp("2025_07-17").expect("date");
        assert_eq!(one_underscore.hour(), 0);
        assert_eq!(one_underscore.month(), 7);
    }

    #[test]
    fn garbage_yields_none() {
        assert_eq!(parse_timestamp("abc"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("IMG_0001"), None);
    }
}
