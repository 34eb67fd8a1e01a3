//! # Date Label
//!
//! Formats the date band text as `"Wkd Mon DD"`, the same shape as
//! `strftime("%a %b %d")` in the C locale. The label lives in a fixed-capacity
//! `heapless::String` so re-formatting at midnight never allocates.

use crate::TimeSample;
use heapless::String;

/// Longest label the date band holds.
pub const DATE_LABEL_CAPACITY: usize = 10;

pub type DateLabel = String<DATE_LABEL_CAPACITY>;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Format the date part of `sample`.
///
/// Output past [`DATE_LABEL_CAPACITY`] characters is dropped.
pub fn format_date(sample: &TimeSample) -> DateLabel {
    let mut label = DateLabel::new();

    let weekday = WEEKDAYS[sample.weekday.num_days_from_monday() as usize];
    let month = MONTHS
        .get(usize::from(sample.month.saturating_sub(1)))
        .copied()
        .unwrap_or("???");
    let day = sample.day.min(99);

    push_truncating(&mut label, weekday);
    push_truncating(&mut label, " ");
    push_truncating(&mut label, month);
    push_truncating(&mut label, " ");
    for digit in [day / 10, day % 10] {
        push_truncating_char(&mut label, char::from(b'0' + digit));
    }

    label
}

fn push_truncating(label: &mut DateLabel, text: &str) {
    for c in text.chars() {
        if !push_truncating_char(label, c) {
            break;
        }
    }
}

fn push_truncating_char(label: &mut DateLabel, c: char) -> bool {
    label.push(c).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration, NaiveDate, Weekday};

    fn sample(weekday: Weekday, month: u8, day: u8) -> TimeSample {
        TimeSample::try_new(0, 0, 0, weekday, month, day).unwrap()
    }

    #[test]
    fn test_known_date() {
        assert_eq!(format_date(&sample(Weekday::Wed, 3, 5)).as_str(), "Wed Mar 05");
    }

    #[test]
    fn test_two_digit_day() {
        assert_eq!(format_date(&sample(Weekday::Sun, 12, 31)).as_str(), "Sun Dec 31");
    }

    #[test]
    fn test_matches_chrono_formatting_for_a_year() {
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for _ in 0..366 {
            let time = date.and_hms_opt(0, 0, 0).unwrap();
            let label = format_date(&TimeSample::from_datetime(&time));
            assert_eq!(label.as_str(), time.format("%a %b %d").to_string());
            assert!(label.len() <= DATE_LABEL_CAPACITY);
            date += Duration::days(1);
        }
        assert_eq!(date.year(), 2025);
    }

    #[test]
    fn test_truncates_at_capacity() {
        let mut label = DateLabel::new();
        push_truncating(&mut label, "Wednesday September");
        assert_eq!(label.as_str(), "Wednesday ");
        assert_eq!(label.len(), DATE_LABEL_CAPACITY);
    }
}
