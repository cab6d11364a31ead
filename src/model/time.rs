//! Time-of-day and weekday primitives.

use crate::error::Error;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A time of day stored as minutes since midnight (0–1439).
///
/// Displays as `HH:MM` and parses from both the catalog's `HH.MM` notation
/// and its own `HH:MM` rendering, tolerating surrounding whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TimeOfDay(pub u16);

impl TimeOfDay {
    /// Builds a time of day from an hour/minute pair.
    pub fn from_hm(hour: u16, minute: u16) -> Self {
        TimeOfDay(hour * 60 + minute)
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// The hour component (0–23 for in-range values).
    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    /// The minute component (0–59).
    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut sections = trimmed.split(['.', ':']);

        let (Some(hour), Some(minute), None) =
            (sections.next(), sections.next(), sections.next())
        else {
            return Err(Error::InvalidTimeOfDay(s.to_string()));
        };

        let hour: u16 = hour
            .parse()
            .map_err(|_| Error::InvalidTimeOfDay(s.to_string()))?;
        let minute: u16 = minute
            .parse()
            .map_err(|_| Error::InvalidTimeOfDay(s.to_string()))?;

        Ok(TimeOfDay::from_hm(hour, minute))
    }
}

/// Day of the week an event recurs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}
