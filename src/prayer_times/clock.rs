use chrono::{NaiveTime, Timelike};
use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeError {
    #[error("invalid time '{0}': expected H:MM AM or H:MM PM")]
    InvalidFormat(String),
    #[error("hour out of range in '{0}'")]
    HourOutOfRange(String),
    #[error("minute out of range in '{0}'")]
    MinuteOutOfRange(String),
}

/// Parse a 12-hour clock string ("5:05 AM", "12:30 pm") into minutes since
/// midnight. 12 AM is midnight (0) and 12 PM is noon (720).
pub fn parse_minutes(s: &str) -> Result<u32, TimeError> {
    let invalid = || TimeError::InvalidFormat(s.to_string());

    let mut parts = s.split_whitespace();
    let (clock, period) = match (parts.next(), parts.next(), parts.next()) {
        (Some(clock), Some(period), None) => (clock, period),
        _ => return Err(invalid()),
    };

    let pm = if period.eq_ignore_ascii_case("pm") {
        true
    } else if period.eq_ignore_ascii_case("am") {
        false
    } else {
        return Err(invalid());
    };

    let (hour, minute) = clock.split_once(':').ok_or_else(invalid)?;
    if hour.is_empty() || hour.len() > 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if minute.len() != 2 || !minute.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&hour) {
        return Err(TimeError::HourOutOfRange(s.to_string()));
    }
    if minute > 59 {
        return Err(TimeError::MinuteOutOfRange(s.to_string()));
    }

    let hour24 = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };
    Ok(hour24 * 60 + minute)
}

pub fn minute_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Inverse of `parse_minutes`, without a leading zero on the hour.
pub fn format_12h(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    let (hour, minute) = (minutes / 60, minutes % 60);
    let period = if hour < 12 { "AM" } else { "PM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour12, minute, period)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_morning_and_evening() {
        assert_eq!(parse_minutes("5:05 AM"), Ok(305));
        assert_eq!(parse_minutes("6:20 PM"), Ok(18 * 60 + 20));
        assert_eq!(parse_minutes("11:59 PM"), Ok(1439));
    }

    #[test]
    fn test_parse_noon_and_midnight() {
        assert_eq!(parse_minutes("12:00 AM"), Ok(0));
        assert_eq!(parse_minutes("12:30 AM"), Ok(30));
        assert_eq!(parse_minutes("12:00 PM"), Ok(720));
        assert_eq!(parse_minutes("12:45 PM"), Ok(765));
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_padding() {
        assert_eq!(parse_minutes("  07:15 pm "), Ok(19 * 60 + 15));
        assert_eq!(parse_minutes("7:15\tAm"), Ok(7 * 60 + 15));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for bad in ["", "5:05", "5:05AM", "five:05 AM", "5:5 AM", "5:055 AM", "5-05 AM", "5:05 XM", "5:05 AM extra"] {
            assert!(
                matches!(parse_minutes(bad), Err(TimeError::InvalidFormat(_))),
                "expected format error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(
            parse_minutes("13:00 PM"),
            Err(TimeError::HourOutOfRange("13:00 PM".to_string()))
        );
        assert!(matches!(parse_minutes("0:30 AM"), Err(TimeError::HourOutOfRange(_))));
        assert!(matches!(parse_minutes("4:60 AM"), Err(TimeError::MinuteOutOfRange(_))));
    }

    #[test]
    fn test_every_valid_time_is_in_range() {
        for hour in 1..=12 {
            for minute in 0..60 {
                for period in ["AM", "PM"] {
                    let s = format!("{}:{:02} {}", hour, minute, period);
                    let m = parse_minutes(&s).unwrap();
                    assert!(m < MINUTES_PER_DAY, "{} parsed to {}", s, m);
                    assert_eq!(format_12h(m), s);
                }
            }
        }
    }

    #[test]
    fn test_minute_of_day() {
        let t = NaiveTime::from_hms_opt(18, 4, 59).unwrap();
        assert_eq!(minute_of_day(t), parse_minutes("6:04 PM").unwrap());
    }
}
