//! Lexical layer of the `Set-Cookie` grammar.
//!
//! A cookie line is `name=value[; attr[=value]]*`, with pairs separated by a
//! semicolon followed by a single space. This module splits the line and parses
//! the two attribute values that carry a grammar of their own (`Expires` and
//! `Max-Age`). Attribute semantics live in [`canonical_cookie`](super::canonical_cookie).

use crate::cookies::error::CookieParseError;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

const PAIR_SEPARATOR: &str = "; ";

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One attribute after the leading name/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attribute<'a> {
    /// Lower-cased attribute name.
    pub key: String,
    /// `None` for bare keys and for keys with an empty value (`Domain=`).
    pub value: Option<&'a str>,
}

/// Split a cookie line into its unquoted `(name, value)` and the raw attribute list.
pub(crate) fn split_cookie_line(
    line: &str,
) -> Result<((&str, &str), Vec<Attribute<'_>>), CookieParseError> {
    let mut segments = line.split(PAIR_SEPARATOR);
    let first = segments.next().unwrap_or_default();

    let (name, value) = first
        .split_once('=')
        .ok_or_else(|| CookieParseError::invalid_pair(first))?;

    let attributes = segments
        .map(|segment| {
            let (key, value) = match segment.split_once('=') {
                Some((k, v)) => (k, Some(v).filter(|v| !v.is_empty())),
                None => (segment, None),
            };
            Attribute {
                key: key.to_lowercase(),
                value,
            }
        })
        .collect();

    Ok(((name, unquote(value)), attributes))
}

/// Strip one layer of surrounding double quotes.
pub(crate) fn unquote(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') {
        value.get(1..value.len().saturating_sub(1)).unwrap_or_default()
    } else {
        value
    }
}

/// Parse an `Expires` value of the exact form `Ddd, DD Mmm YYYY HH:MM:SS GMT`.
///
/// Day, month and year may also be separated by `-`. The year has two to four
/// digits; two-digit years map `00-49` to the 2000s and `50-99` to the 1900s.
/// The weekday must be a valid abbreviation but is not checked against the date.
/// Dates before the Unix epoch are rejected.
pub(crate) fn parse_expires(value: &str) -> Result<OffsetDateTime, CookieParseError> {
    parse_cookie_date(value).ok_or_else(|| CookieParseError::invalid_expires(value))
}

fn parse_cookie_date(value: &str) -> Option<OffsetDateTime> {
    let (weekday, rest) = value.split_once(", ")?;
    if !WEEKDAYS.contains(&weekday) {
        return None;
    }

    let (day, rest) = take_digits(rest, 2, 2)?;
    let rest = take_date_separator(rest)?;

    let month_name = rest.get(..3)?;
    let month_index = MONTHS.iter().position(|m| *m == month_name)?;
    let rest = take_date_separator(&rest[3..])?;

    let (year_digits, rest) = take_digit_run(rest, 2, 4)?;
    let year = year_digits.parse::<i32>().ok()?;
    let year = match year_digits.len() {
        2 if year < 50 => 2000 + year,
        2 => 1900 + year,
        _ => year,
    };

    let rest = rest.strip_prefix(' ')?;
    let (hour, rest) = take_digits(rest, 2, 2)?;
    let rest = rest.strip_prefix(':')?;
    let (minute, rest) = take_digits(rest, 2, 2)?;
    let rest = rest.strip_prefix(':')?;
    let (second, rest) = take_digits(rest, 2, 2)?;

    if rest != " GMT" {
        return None;
    }

    let month = Month::try_from(month_index as u8 + 1).ok()?;
    let date = Date::from_calendar_date(year, month, day as u8).ok()?;
    let time = Time::from_hms(hour as u8, minute as u8, second as u8).ok()?;
    let expiry = PrimitiveDateTime::new(date, time).assume_utc();

    (expiry.unix_timestamp() >= 0).then_some(expiry)
}

fn take_date_separator(input: &str) -> Option<&str> {
    input.strip_prefix(' ').or_else(|| input.strip_prefix('-'))
}

fn take_digit_run(input: &str, min: usize, max: usize) -> Option<(&str, &str)> {
    let len = input.bytes().take_while(u8::is_ascii_digit).count();
    if len < min || len > max {
        return None;
    }
    Some(input.split_at(len))
}

fn take_digits(input: &str, min: usize, max: usize) -> Option<(u32, &str)> {
    let (digits, rest) = take_digit_run(input, min, max)?;
    Some((digits.parse().ok()?, rest))
}

/// Parse a `Max-Age` value. The literal must be the canonical decimal form of a
/// 32-bit signed integer, so `+5`, `05`, `-0` and `5s` are all rejected.
pub(crate) fn parse_max_age(value: &str) -> Result<i32, CookieParseError> {
    value
        .parse::<i32>()
        .ok()
        .filter(|seconds| seconds.to_string() == value)
        .ok_or_else(|| CookieParseError::invalid_max_age(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name_value_on_first_equals() {
        let ((name, value), attrs) = split_cookie_line("id=a=b=c").unwrap();
        assert_eq!(name, "id");
        assert_eq!(value, "a=b=c");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_split_attributes() {
        let (_, attrs) = split_cookie_line("id=1; Path=/x; Secure; Domain=").unwrap();
        assert_eq!(
            attrs,
            vec![
                Attribute {
                    key: "path".to_string(),
                    value: Some("/x")
                },
                Attribute {
                    key: "secure".to_string(),
                    value: None
                },
                Attribute {
                    key: "domain".to_string(),
                    value: None
                },
            ]
        );
    }

    #[test]
    fn test_missing_equals_is_rejected() {
        let err = split_cookie_line("novalue; Secure").unwrap_err();
        assert_eq!(err.message(), "Invalid cookie pair \"novalue\"!");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"abc\""), "abc");
        assert_eq!(unquote("\"abc"), "\"abc");
        assert_eq!(unquote("\"\""), "");
        assert_eq!(unquote("\""), "");
        assert_eq!(unquote("plain"), "plain");
    }

    #[test]
    fn test_expires_valid() {
        let t = parse_expires("Wed, 21 Oct 2015 07:28:00 GMT").unwrap();
        assert_eq!(t.unix_timestamp(), 1445412480);

        let dashed = parse_expires("Wed, 21-Oct-2015 07:28:00 GMT").unwrap();
        assert_eq!(dashed, t);

        let short_year = parse_expires("Wed, 21 Oct 15 07:28:00 GMT").unwrap();
        assert_eq!(short_year, t);

        let epoch = parse_expires("Thu, 01 Jan 1970 00:00:00 GMT").unwrap();
        assert_eq!(epoch.unix_timestamp(), 0);
    }

    #[test]
    fn test_expires_rejections() {
        for bad in [
            "Wed, 21 Oct 2015 07:28: GMT",
            "Wed, 21 Onv 2015 07:28:00 GMT",
            "Wed, 21 Oct 20151 07:28:00 GMT",
            "Wed, 32 Oct 2015 07:28:00 GMT",
            "Wed, 21 Oct 2015 25:28:00 GMT",
            "Wed, 21 Oct 2015 07:61:00 GMT",
            "Wed, 21 Oct 2015 07:28:00 UTC",
            "Wed, 21 Oct 2015 07:28:00 GMT+2",
            "San, 21 Onv 2015 07:28:00 GMT",
            "Wed, 31 Dec 1969 07:28:00 GMT",
            "Wed, 31 Feb 2015 07:28:00 GMT",
            "wed, 21 Oct 2015 07:28:00 GMT",
        ] {
            let err = parse_expires(bad).unwrap_err();
            assert_eq!(
                err.message(),
                format!("Invalid value for Expires \"{}\"!", bad)
            );
        }
    }

    #[test]
    fn test_max_age() {
        assert_eq!(parse_max_age("1000").unwrap(), 1000);
        assert_eq!(parse_max_age("-5").unwrap(), -5);
        assert_eq!(parse_max_age("0").unwrap(), 0);
        for bad in ["121252a", "+5", "05", "-0", "", "1.5", "3000000000"] {
            assert!(parse_max_age(bad).is_err(), "{bad} should be rejected");
        }
        assert_eq!(
            parse_max_age("121252a").unwrap_err().message(),
            "Invalid value for Max-Age \"121252a\"!"
        );
    }
}
