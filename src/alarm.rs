use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

use crate::TimeOfDay;

/// format used both for parsing alarm input and for rendering clock readings
pub const TIME_FORMAT: &str = "%I:%M:%S %p";

pub const DEFAULT_SOUND: &str = "alarm.wav";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlarmError {
    #[error("Invalid time format. Use HH:MM:SS AM/PM (e.g., 07:30:00 AM).")]
    InvalidFormat,
    #[error("Invalid {name} of {value} seconds. Intervals must be non-negative numbers.")]
    InvalidInterval { name: &'static str, value: f64 },
}

/// the time an alarm should go off at
/// hour stays on the 12 hour clock (1-12) with a separate am/pm marker,
/// truncated to whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub time_of_day: TimeOfDay,
}

impl From<NaiveTime> for AlarmTime {
    fn from(time: NaiveTime) -> Self {
        let (pm, hour) = time.hour12();
        Self {
            hour: hour as u8,
            minute: time.minute() as u8,
            second: time.second() as u8,
            time_of_day: if pm { TimeOfDay::PM } else { TimeOfDay::AM },
        }
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02} {}",
            self.hour, self.minute, self.second, self.time_of_day
        )
    }
}

/// an alarm
/// built once from the merged cli/config input and not touched afterwards
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmConfig {
    pub time: AlarmTime,
    pub sound: PathBuf,
    pub repeat: bool,
}

/// parse an alarm time string in HH:MM:SS AM/PM format
///
/// # Errors
/// returns [`AlarmError::InvalidFormat`] if the string doesn't match the
/// pattern or a field is out of range (hour 13, minute 61, ...)
pub fn parse_alarm_time(value: &str) -> Result<AlarmTime, AlarmError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map(AlarmTime::from)
        .map_err(|_| AlarmError::InvalidFormat)
}

#[must_use]
pub fn format_time(now: NaiveDateTime) -> String {
    now.format(TIME_FORMAT).to_string()
}

/// true iff `now` lands exactly on the alarm time, seconds truncated not rounded
///
/// no hysteresis: polling slower than once a second can skip the matching
/// second entirely
#[must_use]
pub fn should_trigger(now: NaiveDateTime, target: AlarmTime) -> bool {
    AlarmTime::from(now.time()) == target
}

/// resolve a sound path against `base_dir`, absolute paths pass through
#[must_use]
pub fn resolve_sound_path(sound: &Path, base_dir: &Path) -> PathBuf {
    if sound.is_absolute() {
        sound.to_path_buf()
    } else {
        base_dir.join(sound)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn timestamp(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn parses_valid_time() {
        let parsed = parse_alarm_time("07:30:00 AM").unwrap();
        assert_eq!(
            parsed,
            AlarmTime {
                hour: 7,
                minute: 30,
                second: 0,
                time_of_day: TimeOfDay::AM,
            }
        );
    }

    #[test]
    fn parses_noon_and_midnight() {
        let noon = parse_alarm_time("12:00:00 PM").unwrap();
        assert_eq!(noon.hour, 12);
        assert_eq!(noon.time_of_day, TimeOfDay::PM);
        assert!(should_trigger(timestamp(12, 0, 0), noon));

        let midnight = parse_alarm_time("12:00:00 AM").unwrap();
        assert_eq!(midnight.time_of_day, TimeOfDay::AM);
        assert!(should_trigger(timestamp(0, 0, 0), midnight));
    }

    #[test]
    fn trims_whitespace() {
        assert!(parse_alarm_time("  07:30:00 AM\n").is_ok());
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert_eq!(parse_alarm_time("25:61:00"), Err(AlarmError::InvalidFormat));
        assert_eq!(
            parse_alarm_time("13:00:00 PM"),
            Err(AlarmError::InvalidFormat)
        );
        assert_eq!(parse_alarm_time("not a time"), Err(AlarmError::InvalidFormat));
    }

    #[test]
    fn triggers_on_exact_match() {
        let target = parse_alarm_time("07:30:00 AM").unwrap();
        assert!(should_trigger(timestamp(7, 30, 0), target));
    }

    #[test]
    fn does_not_trigger_one_second_off() {
        let target = parse_alarm_time("07:30:00 AM").unwrap();
        assert!(!should_trigger(timestamp(7, 30, 1), target));
    }

    #[test]
    fn does_not_trigger_on_wrong_half_of_day() {
        let target = parse_alarm_time("07:30:00 AM").unwrap();
        assert!(!should_trigger(timestamp(19, 30, 0), target));
    }

    #[test]
    fn resolves_relative_sound_path() {
        let resolved = resolve_sound_path(Path::new("alarm.wav"), Path::new("/tmp"));
        assert_eq!(resolved, PathBuf::from("/tmp/alarm.wav"));
    }

    #[test]
    fn keeps_absolute_sound_path() {
        let resolved = resolve_sound_path(Path::new("/sounds/ring.mp3"), Path::new("/tmp"));
        assert_eq!(resolved, PathBuf::from("/sounds/ring.mp3"));
    }

    #[test]
    fn formats_time_for_display() {
        assert_eq!(format_time(timestamp(19, 30, 5)), "07:30:05 PM");
        assert_eq!(
            AlarmTime::from(timestamp(19, 30, 5).time()).to_string(),
            "07:30:05 PM"
        );
    }
}
