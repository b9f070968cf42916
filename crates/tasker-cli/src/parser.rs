use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate};
use chrono_english::{parse_date_string, Dialect};

/// Parses a start or cut-off date.
///
/// Accepts `YYYY-MM-DD` or English expressions such as "tomorrow" or
/// "next monday"; blank input means the day of `now`.
pub fn parse_date(date_str: &str, now: DateTime<Local>) -> Result<NaiveDate> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return Ok(now.date_naive());
    }

    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    parse_date_string(date_str, now, Dialect::Us)
        .map(|dt| dt.date_naive())
        .map_err(|e| anyhow!("Not a valid date (YYYY-MM-DD) '{}': {}", date_str, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2017, 11, 6, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(
            parse_date("2017-11-06", now()).unwrap(),
            NaiveDate::from_ymd_opt(2017, 11, 6).unwrap()
        );
    }

    #[test]
    fn test_blank_means_today() {
        assert_eq!(parse_date("  ", now()).unwrap(), now().date_naive());
    }

    #[test]
    fn test_relative_date() {
        assert_eq!(
            parse_date("tomorrow", now()).unwrap(),
            NaiveDate::from_ymd_opt(2017, 11, 7).unwrap()
        );
    }

    #[test]
    fn test_invalid_month() {
        let err = parse_date("2017-25-11", now()).unwrap_err();
        assert!(err.to_string().starts_with("Not a valid date"));
    }
}
