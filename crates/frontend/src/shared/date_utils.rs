/// Utilities for date and time formatting
///
/// The backend sends dates as `YYYY-MM-DD`, as naive datetimes, or as RFC 3339
/// timestamps; everything is shown as `DD/MM/YYYY`.
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const DISPLAY_DATE: &str = "%d/%m/%Y";
const DISPLAY_DATETIME: &str = "%d/%m/%Y %H:%M";

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_part = value.split(['T', ' ']).next().unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Format a date or timestamp as `DD/MM/YYYY`.
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format(DISPLAY_DATE).to_string(),
        None => value.to_string(),
    }
}

/// Format a timestamp as `DD/MM/YYYY HH:MM` in local time.
pub fn format_datetime(value: &str) -> String {
    match parse_datetime(value) {
        Some(dt) => dt.format(DISPLAY_DATETIME).to_string(),
        None => format_date(value),
    }
}

/// `YYYY-MM-DD` slice suitable for an `<input type="date">`.
pub fn to_input_date(value: &str) -> String {
    parse_date(value)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Today's date as `YYYY-MM-DD`
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
        assert_eq!(format_date("2024-03-15 08:00:00"), "15/03/2024");
    }

    #[test]
    fn test_format_datetime_naive() {
        assert_eq!(format_datetime("2024-12-31T23:59:59"), "31/12/2024 23:59");
        assert_eq!(format_datetime("2024-12-31 23:59:59.5"), "31/12/2024 23:59");
        // date only falls back to the date format
        assert_eq!(format_datetime("2024-12-31"), "31/12/2024");
    }

    #[test]
    fn test_input_date() {
        assert_eq!(to_input_date("2024-03-15T00:00:00.000Z"), "2024-03-15");
        assert_eq!(to_input_date(""), "");
        assert_eq!(to_input_date("garbage"), "");
    }

    #[test]
    fn test_today_is_iso() {
        let today = today_iso();
        assert!(NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
    }
}
