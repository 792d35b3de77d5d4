// --- File: crates/venuegrid_slots/src/time.rs ---
//! Wall-clock arithmetic for `HH:mm` slot boundaries.
//!
//! Times are compared and added as local clock readings within one logical
//! day of the venue's time zone. Nothing here knows about dates or offsets;
//! conversion from instants happens once in [`crate::ingest`].

use chrono::{NaiveTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::SlotError;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A local clock reading with minute precision.
///
/// `24:00` is accepted as the end of the day so that a record running until
/// midnight keeps `start < end` without rolling over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallClock(u16);

impl WallClock {
    pub const MIDNIGHT: WallClock = WallClock(0);
    pub const END_OF_DAY: WallClock = WallClock(MINUTES_PER_DAY);

    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        let total = hour.checked_mul(60)?.checked_add(minute)?;
        (total <= MINUTES_PER_DAY).then_some(WallClock(total))
    }

    /// Parses a strict `HH:mm` string.
    pub fn parse(value: &str) -> Result<Self, SlotError> {
        let malformed = || SlotError::MalformedTime {
            value: value.to_string(),
        };

        let bytes = value.as_bytes();
        let well_shaped = bytes.len() == 5
            && bytes[2] == b':'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 2 || b.is_ascii_digit());
        if !well_shaped {
            return Err(malformed());
        }
        if value == "24:00" {
            return Ok(Self::END_OF_DAY);
        }

        NaiveTime::parse_from_str(value, "%H:%M")
            .map(Self::from_naive_time)
            .map_err(|_| malformed())
    }

    /// Truncates seconds.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        WallClock((time.hour() * 60 + time.minute()) as u16)
    }

    /// `None` for `24:00`, which has no `NaiveTime` representation.
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(u32::from(self.0 / 60), u32::from(self.0 % 60), 0)
    }

    pub fn minutes_since_midnight(self) -> u16 {
        self.0
    }

    /// Adds minutes, refusing to roll past the end of the day.
    pub fn checked_add_minutes(self, minutes: u16) -> Option<Self> {
        let total = self.0.checked_add(minutes)?;
        (total <= MINUTES_PER_DAY).then_some(WallClock(total))
    }

    /// Minutes from `self` to `later`; `None` when `later` is not after `self`.
    pub fn minutes_until(self, later: WallClock) -> Option<u16> {
        later.0.checked_sub(self.0).filter(|m| *m > 0)
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for WallClock {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WallClock::parse(s)
    }
}

impl Serialize for WallClock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WallClock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        WallClock::parse(&raw).map_err(de::Error::custom)
    }
}

/// Width of one display slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotWidth(u16);

impl SlotWidth {
    pub const HOUR: SlotWidth = SlotWidth(60);

    pub fn new(minutes: u32) -> Result<Self, SlotError> {
        if minutes == 0 || minutes > u32::from(MINUTES_PER_DAY) {
            return Err(SlotError::InvalidSlotWidth(minutes));
        }
        Ok(SlotWidth(minutes as u16))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl Default for SlotWidth {
    fn default() -> Self {
        SlotWidth::HOUR
    }
}

/// Walks `[start, end)` in fixed steps of `width`.
///
/// Yields `(step_start, step_end)` pairs while the step fits entirely inside
/// the range; a trailing remainder shorter than `width` is dropped. A zero or
/// negative range yields nothing.
pub fn walk_slots(start: WallClock, end: WallClock, width: SlotWidth) -> SlotWalk {
    SlotWalk {
        cursor: start,
        end,
        width,
    }
}

#[derive(Debug, Clone)]
pub struct SlotWalk {
    cursor: WallClock,
    end: WallClock,
    width: SlotWidth,
}

impl Iterator for SlotWalk {
    type Item = (WallClock, WallClock);

    fn next(&mut self) -> Option<Self::Item> {
        let step_end = self.cursor.checked_add_minutes(self.width.minutes())?;
        if step_end > self.end {
            return None;
        }
        let step = (self.cursor, step_end);
        self.cursor = step_end;
        Some(step)
    }
}
