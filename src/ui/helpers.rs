//! Shared formatting utilities for cards and pages.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::domain::{StarRating, MAX_STARS};

/// Raw rating over five, as shown on cards (`3.6/5.0`, `4/5.0`).
#[must_use]
pub fn card_rating_label(rating: f64) -> String {
    format!("{rating}/{}.0", MAX_STARS)
}

/// Rounded rating with two decimals, as shown in the book header (`4.00/5.0`).
#[must_use]
pub fn header_rating_label(stars: StarRating) -> String {
    format!("{:.2}/{}.0", f64::from(stars.filled), MAX_STARS)
}

/// Formats an issue date as `dd.mm.yyyy`.
///
/// Accepts a plain date, a naive timestamp, or an RFC 3339 timestamp (shown in
/// local time). Anything else is returned unchanged.
///
/// # Example
///
/// ```rust
/// use libris::ui::helpers::format_issued_date;
///
/// assert_eq!(format_issued_date("1961-06-01"), "01.06.1961");
/// assert_eq!(format_issued_date("someday"), "someday");
/// ```
#[must_use]
pub fn format_issued_date(raw: &str) -> String {
    const FORMAT: &str = "%d.%m.%Y";
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(FORMAT).to_string();
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.with_timezone(&Local).format(FORMAT).to_string();
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return timestamp.format(FORMAT).to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_label_keeps_raw_value() {
        assert_eq!(card_rating_label(3.6), "3.6/5.0");
        assert_eq!(card_rating_label(4.0), "4/5.0");
    }

    #[test]
    fn header_label_has_two_decimals() {
        assert_eq!(header_rating_label(StarRating::from_filled(4)), "4.00/5.0");
    }

    #[test]
    fn dates_in_several_shapes() {
        assert_eq!(format_issued_date("2020-02-29"), "29.02.2020");
        assert_eq!(format_issued_date("2020-02-29T10:30:00"), "29.02.2020");
        assert_eq!(format_issued_date("not a date"), "not a date");
    }
}
