use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};

use crate::error::LineError;

/// First and last scheduled minute of the operating day, inclusive.
const SERVICE_START: (u32, u32) = (5, 55);
const SERVICE_END: (u32, u32) = (21, 21);

/// A scheduled minute of the day, always inside the operating window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopTime(NaiveTime);

impl StopTime {
    /// Returns `None` unless `hour:minute` is a clock time within the operating window.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .filter(StopTime::in_service)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    fn in_service(&self) -> bool {
        let hm = (self.hour(), self.minute());
        SERVICE_START <= hm && hm <= SERVICE_END
    }

    /// Absolute distance between two times, in whole minutes.
    pub fn minutes_between(self, other: StopTime) -> u64 {
        (self.0 - other.0).num_minutes().unsigned_abs()
    }
}

impl fmt::Display for StopTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for StopTime {
    type Err = LineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad_format = || LineError::InvalidTimeFormat(s.to_owned());

        let (hour, minute) = s.split_once(':').ok_or_else(bad_format)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !(1..=2).contains(&hour.len())
            || minute.len() != 2
            || !all_digits(hour)
            || !all_digits(minute)
        {
            return Err(bad_format());
        }

        // At most two digits each, so these cannot overflow.
        let hour: u32 = hour.parse().map_err(|_| bad_format())?;
        let minute: u32 = minute.parse().map_err(|_| bad_format())?;

        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(bad_format)?;
        StopTime::new(hour, minute).ok_or(LineError::OutOfRangeTime(StopTime(time)))
    }
}
