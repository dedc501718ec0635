use anyhow::Context;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Parses a `%Y-%m-%d` wire date.
pub fn parse_iso_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date: {raw:?}"))
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Long human-readable form used for day headers, e.g.
/// "Saturday, June 1, 2024".
pub fn long_date_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn parse_instant(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid timestamp: {raw:?}"))
}

pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn long_label_renders_weekday_month_day_year() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        assert_eq!(long_date_label(date), "Saturday, June 1, 2024");
    }

    #[test]
    fn long_label_has_no_zero_padded_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).expect("valid date");
        assert_eq!(long_date_label(date), "Monday, March 9, 2026");
    }

    #[test]
    fn iso_date_round_trips() {
        let date = parse_iso_date("2024-06-01").expect("parse date");
        assert_eq!(format_iso_date(date), "2024-06-01");
    }

    #[test]
    fn iso_date_rejects_garbage() {
        assert!(parse_iso_date("June 1st").is_err());
        assert!(parse_iso_date("2024-13-01").is_err());
    }

    #[test]
    fn instant_round_trips_in_utc() {
        let instant = Utc
            .with_ymd_and_hms(2024, 6, 1, 15, 23, 0)
            .single()
            .expect("valid instant");
        let raw = format_instant(instant);
        assert_eq!(raw, "2024-06-01T15:23:00Z");
        assert_eq!(parse_instant(&raw).expect("parse instant"), instant);
    }

    #[test]
    fn instant_accepts_offset_forms() {
        let parsed = parse_instant("2024-06-01T17:23:00+02:00").expect("parse instant");
        assert_eq!(format_instant(parsed), "2024-06-01T15:23:00Z");
    }
}
