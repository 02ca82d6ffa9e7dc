//! Date helper functions

use chrono::NaiveDateTime;

/// Format a date in ISO 8601 / XML format, as UTC
pub fn date_xml(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Format date in full format (like "January 1, 2024")
pub fn full_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_date_xml() {
        assert_eq!(date_xml(&date()), "2024-01-05T10:30:00.000Z");
    }

    #[test]
    fn test_full_date() {
        assert_eq!(full_date(&date()), "January 5, 2024");
    }
}
