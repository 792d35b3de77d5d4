use thiserror::Error;

use crate::time::WallClock;

/// Errors raised by the slot core.
///
/// Only `OverlappingRecords` can abort a whole day, and only when the resolver
/// runs with [`crate::OverlapPolicy::Reject`]. The other variants are
/// per-record and are logged and skipped by the grid builder and the ingest
/// boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Malformed wall-clock time '{value}', expected HH:mm")]
    MalformedTime { value: String },
    #[error("Degenerate range {start}-{end}: start must be before end")]
    DegenerateRange { start: WallClock, end: WallClock },
    #[error("Invalid slot width: {0} minutes")]
    InvalidSlotWidth(u32),
    #[error("Overlapping records for service {service_id} cover the slot starting {slot_start}")]
    OverlappingRecords {
        service_id: String,
        slot_start: WallClock,
    },
}
