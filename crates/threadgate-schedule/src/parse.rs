//! Schedule command parsing.
//!
//! Grammar, exact and anchored at both ends:
//!
//! ```text
//! thread_id@<digits>,publish_date@<YYYY-MM-DD>[T| ]<HH:MM>
//! ```
//!
//! Any deviation is [`RejectReason::MalformedRequest`]. Existence of the
//! target thread is a separate validation stage (see [`crate::intake`]).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

use threadgate_types::{RejectReason, civil_tz};

static COMMAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^thread_id@([0-9]+),publish_date@([0-9]{4})-([0-9]{2})-([0-9]{2})[T ]([0-9]{2}):([0-9]{2})$",
    )
    .expect("command grammar regex is valid")
});

/// A syntactically valid schedule command, before existence validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub thread_id: u64,
    pub publish_at: DateTime<FixedOffset>,
}

/// Parse a raw intake message into a schedule command.
///
/// The timestamp is interpreted in the fixed civil timezone. Thread-id
/// overflow beyond `u64` and calendar-invalid dates are both
/// `MalformedRequest`.
pub fn parse(text: &str) -> Result<ParsedRequest, RejectReason> {
    let caps = COMMAND_RE
        .captures(text)
        .ok_or(RejectReason::MalformedRequest)?;

    let thread_id: u64 = caps[1].parse().map_err(|_| RejectReason::MalformedRequest)?;

    // Field widths are fixed by the grammar, so these never overflow,
    // but the values can still be calendar-invalid.
    let field = |i: usize| caps[i].parse::<u32>().map_err(|_| RejectReason::MalformedRequest);
    let year: i32 = caps[2].parse().map_err(|_| RejectReason::MalformedRequest)?;
    let date = NaiveDate::from_ymd_opt(year, field(3)?, field(4)?)
        .ok_or(RejectReason::MalformedRequest)?;
    let time = NaiveTime::from_hms_opt(field(5)?, field(6)?, 0)
        .ok_or(RejectReason::MalformedRequest)?;

    let publish_at = civil_tz()
        .from_local_datetime(&date.and_time(time))
        .single()
        .ok_or(RejectReason::MalformedRequest)?;

    Ok(ParsedRequest {
        thread_id,
        publish_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
        civil_tz().with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_parse_t_separator() {
        let req = parse("thread_id@123,publish_date@2025-01-01T09:00").unwrap();
        assert_eq!(req.thread_id, 123);
        assert_eq!(req.publish_at, at(2025, 1, 1, 9, 0));
    }

    #[test]
    fn test_parse_space_separator() {
        let req = parse("thread_id@123,publish_date@2025-01-01 09:00").unwrap();
        assert_eq!(req.thread_id, 123);
        assert_eq!(req.publish_at, at(2025, 1, 1, 9, 0));
    }

    #[test]
    fn test_parse_carries_civil_timezone() {
        let req = parse("thread_id@1,publish_date@2025-06-15T23:59").unwrap();
        assert_eq!(req.publish_at.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_parse_max_thread_id() {
        let text = format!("thread_id@{},publish_date@2025-01-01T09:00", u64::MAX);
        assert_eq!(parse(&text).unwrap().thread_id, u64::MAX);
    }

    #[test]
    fn test_parse_thread_id_overflow() {
        // One past u64::MAX.
        let text = "thread_id@18446744073709551616,publish_date@2025-01-01T09:00";
        assert_eq!(parse(text), Err(RejectReason::MalformedRequest));
    }

    #[test]
    fn test_parse_rejects_non_numeric_id() {
        assert_eq!(
            parse("thread_id@abc,publish_date@2025-01-01 09:00"),
            Err(RejectReason::MalformedRequest)
        );
    }

    #[test]
    fn test_parse_rejects_malformed_strings() {
        let cases = [
            "",
            "thread_id@123",
            "thread_id@123,publish_date@2025-01-01",
            "thread_id@123,publish_date@2025-1-1T09:00",   // narrow fields
            "thread_id@123,publish_date@2025-01-01T9:00",  // narrow hour
            "thread_id@123,publish_date@2025-01-01T09:00:00", // seconds
            "thread_id@123,publish_date@2025-01-01T09:00+09:00", // offset suffix
            "thread_id@123,publish_date@2025-01-01  09:00", // double space
            " thread_id@123,publish_date@2025-01-01T09:00", // leading space
            "thread_id@123,publish_date@2025-01-01T09:00 ", // trailing space
            "thread_id@123,publish_date@2025-01-01T09:00x", // trailing char
            "Thread_id@123,publish_date@2025-01-01T09:00",  // case-sensitive
            "thread_id@123;publish_date@2025-01-01T09:00",
            "thread_id@,publish_date@2025-01-01T09:00",
        ];
        for text in cases {
            assert_eq!(
                parse(text),
                Err(RejectReason::MalformedRequest),
                "should reject: {text:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_calendar_invalid() {
        let cases = [
            "thread_id@1,publish_date@2025-13-01T09:00", // month 13
            "thread_id@1,publish_date@2025-02-30T09:00", // Feb 30
            "thread_id@1,publish_date@2025-01-01T24:00", // hour 24
            "thread_id@1,publish_date@2025-01-01T09:60", // minute 60
            "thread_id@1,publish_date@2025-00-01T09:00", // month 0
        ];
        for text in cases {
            assert_eq!(
                parse(text),
                Err(RejectReason::MalformedRequest),
                "should reject: {text:?}"
            );
        }
    }

    #[test]
    fn test_parse_leap_day() {
        assert!(parse("thread_id@1,publish_date@2024-02-29T00:00").is_ok());
        assert_eq!(
            parse("thread_id@1,publish_date@2025-02-29T00:00"),
            Err(RejectReason::MalformedRequest)
        );
    }
}
