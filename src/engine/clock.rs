//! Wall clock access and the digital time readout

use chrono::{DateTime, FixedOffset, Local, Timelike, Utc};

/// Source of the current wall-clock time
pub trait Clock: Send {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Offset of the system's local time zone right now
pub fn system_time_zone() -> FixedOffset {
    *Local::now().offset()
}

pub fn local_time(epoch_millis: i64, time_zone: FixedOffset) -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_timestamp_millis(epoch_millis)
        .unwrap_or_default()
        .with_timezone(&time_zone)
}

/// Format a 12-hour clock reading as `"H:MM"`.
///
/// The hour is space padded to two columns, minutes are always two digits.
pub fn format_time(hour: u32, minute: u32) -> String {
    format!("{:>2}:{:02}", hour, minute)
}

/// Readout for a point in time. Hours run 0 through 11, so noon and midnight
/// read `" 0:00"`.
pub fn format_clock(time: &DateTime<FixedOffset>) -> String {
    format_time(time.hour() % 12, time.minute())
}

#[cfg(test)]
pub use manual::ManualClock;


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_padded_hours_and_minutes() {
        assert_eq!(format_time(0, 5), " 0:05");
        assert_eq!(format_time(12, 0), "12:00");
        assert_eq!(format_time(9, 59), " 9:59");
        assert_eq!(format_time(10, 7), "10:07");
    }

    #[test]
    fn every_reading_is_five_columns() {
        for hour in 0..=12 {
            for minute in 0..60 {
                let text = format_time(hour, minute);
                assert_eq!(text.len(), 5, "{text:?}");
                assert_eq!(&text[2..3], ":");
                assert_eq!(text[..2].trim_start().parse::<u32>().unwrap(), hour);
                assert_eq!(text[3..].parse::<u32>().unwrap(), minute);
            }
        }
    }

    #[test]
    fn clock_uses_twelve_hour_dial() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let afternoon = tz.with_ymd_and_hms(2024, 3, 1, 15, 4, 30).unwrap();
        assert_eq!(format_clock(&afternoon), " 3:04");

        let noon = tz.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(format_clock(&noon), " 0:00");

        let late = tz.with_ymd_and_hms(2024, 3, 1, 23, 59, 0).unwrap();
        assert_eq!(format_clock(&late), "11:59");
    }

    #[test]
    fn local_time_applies_offset() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        // 2024-03-01T10:15:00Z
        let time = local_time(1_709_288_100_000, plus_two);
        assert_eq!(time.hour(), 12);
        assert_eq!(time.minute(), 15);
    }
}
