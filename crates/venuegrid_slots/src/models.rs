// --- File: crates/venuegrid_slots/src/models.rs ---

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::SlotError;
use crate::time::{SlotWidth, WallClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    #[default]
    Single,
    Group,
}

/// One bookable block of time for one service on one day, as offered by the
/// booking engine and validated by [`crate::ingest`].
///
/// `duration_minutes` is informational: a single purchasable block may span
/// several display slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAvailabilityRecord {
    pub service_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: WallClock,
    pub end_time: WallClock,
    pub duration_minutes: i64,
    pub is_available: bool,
    #[serde(default)]
    pub booking_type: BookingType,
    /// Price in the smallest currency unit (e.g., cents).
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub capacity_left: Option<u32>,
    /// Engine fields the slot logic never reads (payment metadata,
    /// participant strings), carried through untouched.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl RawAvailabilityRecord {
    /// A single-booking record with no pricing, duration taken from the span.
    pub fn new(
        service_id: impl Into<String>,
        date: NaiveDate,
        start_time: WallClock,
        end_time: WallClock,
        is_available: bool,
    ) -> Self {
        let duration_minutes = start_time
            .minutes_until(end_time)
            .map(i64::from)
            .unwrap_or(0);
        Self {
            service_id: service_id.into(),
            start_date: date,
            end_date: date,
            start_time,
            end_time,
            duration_minutes,
            is_available,
            booking_type: BookingType::Single,
            price: None,
            currency: None,
            capacity_left: None,
            extra: Map::new(),
        }
    }

    /// The `[start, end)` range, or `DegenerateRange` when it is empty.
    pub fn span(&self) -> Result<(WallClock, WallClock), SlotError> {
        if self.start_time >= self.end_time {
            return Err(SlotError::DegenerateRange {
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok((self.start_time, self.end_time))
    }

    /// True when the slot lies entirely inside this record. Partial overlap
    /// does not count.
    pub fn covers(&self, slot: &DisplaySlot) -> bool {
        self.start_time <= slot.start_time && slot.end_time <= self.end_time
    }

    pub fn booking_target(&self) -> BookingTarget {
        BookingTarget {
            service_id: self.service_id.clone(),
            date: self.start_date,
            start_time: self.start_time,
            end_time: self.end_time,
            duration_minutes: self.duration_minutes,
            booking_type: self.booking_type,
            price: self.price,
            currency: self.currency.clone(),
            capacity_left: self.capacity_left,
        }
    }
}

/// A synthetic grid column `[start_time, end_time)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySlot {
    pub start_time: WallClock,
    pub end_time: WallClock,
    pub duration_minutes: u16,
}

impl DisplaySlot {
    /// `None` if the slot would run past the end of the day.
    pub fn new(start_time: WallClock, width: SlotWidth) -> Option<Self> {
        let end_time = start_time.checked_add_minutes(width.minutes())?;
        Some(Self {
            start_time,
            end_time,
            duration_minutes: width.minutes(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotStatus {
    /// First slot of an available record; the only bookable state.
    Available,
    /// Inside an available record but not its first slot.
    UnavailableCovered,
    /// Covered by a record that is taken or blocked.
    UnavailableBlocked,
    /// No record covers the slot.
    UnavailableEmpty,
}

impl SlotStatus {
    pub fn is_bookable(self) -> bool {
        matches!(self, SlotStatus::Available)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlotStatus::Available => "available",
            SlotStatus::UnavailableCovered => "unavailable-covered",
            SlotStatus::UnavailableBlocked => "unavailable-blocked",
            SlotStatus::UnavailableEmpty => "unavailable-empty",
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving one slot against one service's records. `record` is
/// only set when the slot is bookable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotResolution<'a> {
    pub status: SlotStatus,
    pub record: Option<&'a RawAvailabilityRecord>,
}

impl<'a> SlotResolution<'a> {
    pub fn unavailable(status: SlotStatus) -> Self {
        Self {
            status,
            record: None,
        }
    }

    pub fn available(record: &'a RawAvailabilityRecord) -> Self {
        Self {
            status: SlotStatus::Available,
            record: Some(record),
        }
    }
}

/// The fields of an available record that are forwarded into booking
/// initiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingTarget {
    pub service_id: String,
    pub date: NaiveDate,
    pub start_time: WallClock,
    pub end_time: WallClock,
    pub duration_minutes: i64,
    pub booking_type: BookingType,
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub capacity_left: Option<u32>,
}
