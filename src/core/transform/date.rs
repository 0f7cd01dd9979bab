use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike};

type DateAttempt = fn(&str) -> Option<String>;

/// Tried in order; the first attempt that understands the input wins.
const ATTEMPTS: &[DateAttempt] = &[
    rfc2822_local,
    rfc2822_utc_alias,
    rfc2822_zoneless,
    iso8601_with_offset,
    iso8601_naive,
    iso8601_hour,
    iso8601_date,
    iso8601_basic_date,
];

const UTC_ALIASES: &[&str] = &["UT", "UTC", "Z"];

const RFC2822_ZONELESS_FORMATS: &[&str] = &["%d %b %Y %H:%M:%S", "%d %b %Y %H:%M"];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Normalizes a feed `pubDate` to ISO-8601, or returns an empty string when
/// the value is empty or cannot be understood.
pub fn normalize_pub_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    ATTEMPTS
        .iter()
        .find_map(|attempt| attempt(raw))
        .unwrap_or_else(|| {
            tracing::debug!(pub_date = raw, "unparseable pubDate dropped");
            String::new()
        })
}

/// Renders a naive timestamp the way an ISO-8601 `isoformat` does: seconds are
/// always present, the fraction only when non-zero and always as microseconds.
pub fn render_naive(value: &NaiveDateTime) -> String {
    if value.nanosecond() / 1_000 == 0 {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

fn render_with_offset<Tz: TimeZone>(value: &DateTime<Tz>) -> String {
    let offset = value.offset().fix();
    format!("{}{}", render_naive(&value.naive_local()), offset_suffix(offset.local_minus_utc()))
}

fn offset_suffix(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let seconds = seconds.abs();
    format!("{sign}{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60)
}

/// Drops a leading `Tue,` or `Tuesday,` token. Feeds often carry a weekday
/// that disagrees with the date, so it is never checked.
fn strip_weekday(raw: &str) -> &str {
    match raw.split_once(',') {
        Some((day, rest)) if !day.is_empty() && day.chars().all(|c| c.is_ascii_alphabetic()) => {
            rest.trim_start()
        }
        _ => raw,
    }
}

fn rfc2822_local(raw: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc2822(strip_weekday(raw)).ok()?;
    Some(render_with_offset(&parsed.with_timezone(&Local)))
}

fn rfc2822_utc_alias(raw: &str) -> Option<String> {
    let (head, zone) = strip_weekday(raw).rsplit_once(' ')?;
    if !UTC_ALIASES.iter().any(|alias| zone.eq_ignore_ascii_case(alias)) {
        return None;
    }
    rfc2822_local(&format!("{head} +0000"))
}

/// A date without a zone is taken to be local time.
fn rfc2822_zoneless(raw: &str) -> Option<String> {
    let body = strip_weekday(raw);
    let naive = RFC2822_ZONELESS_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(body, format).ok())?;
    let local = Local.from_local_datetime(&naive).earliest()?;
    Some(render_with_offset(&local))
}

fn iso8601_with_offset(raw: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
        OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(raw, format).ok())
    })?;
    Some(render_with_offset(&parsed))
}

fn iso8601_naive(raw: &str) -> Option<String> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|value| render_naive(&value))
}

fn iso8601_hour(raw: &str) -> Option<String> {
    let (date, hour) = raw.split_once(['T', ' '])?;
    if hour.len() != 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(render_naive(&date.and_hms_opt(hour.parse().ok()?, 0, 0)?))
}

fn iso8601_date(raw: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(render_naive(&date.and_hms_opt(0, 0, 0)?))
}

fn iso8601_basic_date(raw: &str) -> Option<String> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(
        raw[..4].parse().ok()?,
        raw[4..6].parse().ok()?,
        raw[6..].parse().ok()?,
    )?;
    Some(render_naive(&date.and_hms_opt(0, 0, 0)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn rfc2822_becomes_iso8601_for_the_same_instant() {
        let normalized = normalize_pub_date("Tue, 01 Jan 2024 10:00:00 GMT");
        let parsed = DateTime::parse_from_rfc3339(&normalized).expect("output must be ISO-8601");

        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), expected);
    }

    #[test]
    fn rfc2822_numeric_offsets_are_respected() {
        let normalized = normalize_pub_date("Mon, 15 Jul 2024 08:30:00 -0700");
        let parsed = DateTime::parse_from_rfc3339(&normalized).expect("output must be ISO-8601");

        let expected = Utc.with_ymd_and_hms(2024, 7, 15, 15, 30, 0).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), expected);
    }

    fn assert_instant(raw: &str, expected: DateTime<Utc>) {
        let normalized = normalize_pub_date(raw);
        let parsed = DateTime::parse_from_rfc3339(&normalized)
            .unwrap_or_else(|_| panic!("{raw:?} normalized to {normalized:?}"));
        assert_eq!(parsed.with_timezone(&Utc), expected, "input {raw:?}");
    }

    #[test]
    fn rfc2822_ignores_mismatched_or_long_weekdays() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        assert_instant("Tue, 01 Jan 2024 10:00:00 +0000", expected);
        assert_instant("Tuesday, 01 Jan 2024 10:00:00 GMT", expected);
        assert_instant("01 Jan 2024 10:00:00 GMT", expected);
    }

    #[test]
    fn rfc2822_accepts_utc_zone_names() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        assert_instant("Mon, 01 Jan 2024 10:00:00 UTC", expected);
        assert_instant("Mon, 01 Jan 2024 10:00:00 UT", expected);
        assert_instant("Mon, 01 Jan 2024 10:00:00 Z", expected);
    }

    #[test]
    fn rfc2822_without_zone_is_local_time() {
        let naive = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(10, 0, 0))
            .unwrap();
        let expected = Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_instant("Tue, 01 Jan 2024 10:00:00", expected);
        assert_instant("Tue, 01 Jan 2024 10:00", expected);
    }

    #[test]
    fn iso8601_short_and_basic_forms() {
        assert_eq!(normalize_pub_date("2024-02-10T18:30+02:00"), "2024-02-10T18:30:00+02:00");
        assert_eq!(normalize_pub_date("2024-02-10T18"), "2024-02-10T18:00:00");
        assert_eq!(normalize_pub_date("20240210"), "2024-02-10T00:00:00");
        assert_eq!(normalize_pub_date("2024-02-10T25"), "");
        assert_eq!(normalize_pub_date("20241310"), "");
    }

    #[test]
    fn iso8601_fallbacks_are_rendered_directly() {
        assert_eq!(normalize_pub_date("2024-02-10T18:30:00"), "2024-02-10T18:30:00");
        assert_eq!(normalize_pub_date("2024-02-10 18:30"), "2024-02-10T18:30:00");
        assert_eq!(normalize_pub_date("2024-02-10"), "2024-02-10T00:00:00");
        assert_eq!(
            normalize_pub_date("2024-02-10T18:30:00.250+02:00"),
            "2024-02-10T18:30:00.250000+02:00"
        );
        assert_eq!(normalize_pub_date("2024-02-10T18:30:00Z"), "2024-02-10T18:30:00+00:00");
    }

    #[test]
    fn empty_or_garbage_dates_become_empty() {
        assert_eq!(normalize_pub_date(""), "");
        assert_eq!(normalize_pub_date("   "), "");
        assert_eq!(normalize_pub_date("not-a-date"), "");
        assert_eq!(normalize_pub_date("sometime soon"), "");
    }

    #[test]
    fn offsets_render_with_sign_and_minutes() {
        assert_eq!(offset_suffix(0), "+00:00");
        assert_eq!(offset_suffix(-8 * 3600), "-08:00");
        assert_eq!(offset_suffix(5 * 3600 + 30 * 60), "+05:30");
    }

    #[test]
    fn render_naive_drops_zero_fraction() {
        let whole = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_micro_opt(10, 0, 0, 0))
            .unwrap();
        let fractional = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_micro_opt(10, 0, 0, 42))
            .unwrap();
        assert_eq!(render_naive(&whole), "2024-01-01T10:00:00");
        assert_eq!(render_naive(&fractional), "2024-01-01T10:00:00.000042");
    }
}
