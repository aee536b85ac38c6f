use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

/// Seconds since midnight. The simulation advances one unit per tick.
pub type Time = u32;

/// Wall clock time in `HH:MM` notation, kept as seconds since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(Time);

impl TimeOfDay {
    pub fn new(hours: u32, minutes: u32) -> Option<TimeOfDay> {
        if hours < 24 && minutes < 60 {
            Some(TimeOfDay(hours * 3600 + minutes * 60))
        } else {
            None
        }
    }

    /// Accepts exactly two digit hours `00`-`23` and minutes `00`-`59`.
    pub fn parse(s: &str) -> Option<TimeOfDay> {
        let bytes = s.as_bytes();

        if bytes.len() != 5 || bytes[2] != b':' {
            return None;
        }

        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];

        if !digits.iter().all(u8::is_ascii_digit) {
            return None;
        }

        let value = |i: usize| (digits[i] - b'0') as u32;

        TimeOfDay::new(value(0) * 10 + value(1), value(2) * 10 + value(3))
    }

    pub fn seconds(self) -> Time {
        self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 3600, (self.0 % 3600) / 60)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TimeOfDay::parse(&value).ok_or_else(|| format!("\"{}\" is not a valid HH:MM time", value))
    }
}

impl Into<String> for TimeOfDay {
    fn into(self) -> String {
        self.to_string()
    }
}
