// --- File: crates/venuegrid_slots/src/lib.rs ---
//! Slot reconciliation for venue schedules.
//!
//! Raw availability records coming from the booking engine have arbitrary
//! durations and may overlap. This crate normalises them into a uniform grid
//! of display slots and classifies every (service, slot) pair so that a
//! multi-hour record can only ever be booked through its first slot.
//!
//! Everything here is synchronous and free of I/O; a render pass calls
//! [`schedule::DaySchedule::build`] once per selected day.
pub mod error;
pub mod grid;
#[cfg(test)]
mod grid_proptest;
#[cfg(test)]
mod grid_test;
pub mod ingest;
pub mod models;
pub mod resolver;
#[cfg(test)]
mod resolver_test;
pub mod schedule;
pub mod time;

pub use error::SlotError;
pub use grid::build_display_slots;
pub use ingest::{group_by_day, ingest, ingest_json, AvailabilityError, AvailabilityPayload, RecordError};
pub use models::{
    BookingTarget, BookingType, DisplaySlot, RawAvailabilityRecord, SlotResolution, SlotStatus,
};
pub use resolver::{resolve_slot, OverlapPolicy, SlotResolver};
pub use schedule::{day_summaries, DayAvailability, DaySchedule, ScheduleCell, ScheduleOptions, ServiceRow};
pub use time::{walk_slots, SlotWidth, WallClock};
