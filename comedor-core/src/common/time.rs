//! Date utilities — ISO dates and Monday-anchored weeks
//!
//! All date strings entering the core are `YYYY-MM-DD`; parsing failures
//! are input-contract violations, surfaced as [`CoreError::MalformedDate`].

use chrono::{Duration, NaiveDate, Weekday};

use super::error::{CoreError, CoreResult};

/// Parse an ISO date string (`YYYY-MM-DD`).
pub fn parse_date(date: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| CoreError::MalformedDate(date.to_string()))
}

/// Format a date back to `YYYY-MM-DD`.
pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

/// Sunday closing the week that starts on `week_start`.
pub fn week_end(week_start: NaiveDate) -> NaiveDate {
    week_start + Duration::days(6)
}

/// Human label for a week range, e.g. "04/03/2024 - 10/03/2024".
pub fn week_label(week_start: NaiveDate) -> String {
    format!(
        "{} - {}",
        week_start.format("%d/%m/%Y"),
        week_end(week_start).format("%d/%m/%Y")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_date() {
        let d = parse_date("2024-03-04").unwrap();
        assert_eq!(to_iso(d), "2024-03-04");
    }

    #[test]
    fn test_parse_malformed_date_fails() {
        assert!(matches!(parse_date("04/03/2024"), Err(CoreError::MalformedDate(_))));
        assert!(matches!(parse_date("2024-13-40"), Err(CoreError::MalformedDate(_))));
        assert!(matches!(parse_date(""), Err(CoreError::MalformedDate(_))));
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2024-03-04 is a Monday; the whole week maps back to it
        let monday = parse_date("2024-03-04").unwrap();
        assert_eq!(week_start(monday), monday);

        let thursday = parse_date("2024-03-07").unwrap();
        assert_eq!(week_start(thursday), monday);

        let sunday = parse_date("2024-03-10").unwrap();
        assert_eq!(week_start(sunday), monday);
    }

    #[test]
    fn test_week_start_across_year_boundary() {
        // 2025-01-01 (Wednesday) belongs to the week of Monday 2024-12-30
        let new_year = parse_date("2025-01-01").unwrap();
        assert_eq!(to_iso(week_start(new_year)), "2024-12-30");
    }

    #[test]
    fn test_week_label_spans_monday_to_sunday() {
        let monday = parse_date("2024-03-04").unwrap();
        assert_eq!(week_label(monday), "04/03/2024 - 10/03/2024");
    }
}
