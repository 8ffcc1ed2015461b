use chrono::{NaiveDate, NaiveDateTime};

/// Wire format of timestamps: `YYYYMMDDHHMMSS`, local wall clock, no zone.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Date-only form some instruments send for birth dates.
pub const DATE_FORMAT: &str = "%Y%m%d";

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a 14-digit timestamp, or an 8-digit date taken as midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match value.len() {
        14 => NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok(),
        8 => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn formats_fourteen_digits() {
        assert_eq!(format_timestamp(&at(2024, 3, 7, 9, 5, 1)), "20240307090501");
    }

    #[test]
    fn parses_full_and_date_only() {
        assert_eq!(
            parse_timestamp("20240307090501"),
            Some(at(2024, 3, 7, 9, 5, 1))
        );
        assert_eq!(parse_timestamp("19800115"), Some(at(1980, 1, 15, 0, 0, 0)));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-03-07"), None);
        assert_eq!(parse_timestamp("20241307090501"), None);
        assert_eq!(parse_timestamp("2024030709"), None);
    }
}
