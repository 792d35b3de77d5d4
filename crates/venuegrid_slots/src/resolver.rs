// --- File: crates/venuegrid_slots/src/resolver.rs ---
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

use crate::error::SlotError;
use crate::models::{DisplaySlot, RawAvailabilityRecord, SlotResolution, SlotStatus};

/// What to do when more than one record of a service covers the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// The first covering record in input order decides; the overlap is logged.
    #[default]
    FirstMatch,
    /// Overlap is a data error and fails the resolution.
    Reject,
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-match" => Ok(OverlapPolicy::FirstMatch),
            "reject" => Ok(OverlapPolicy::Reject),
            other => Err(format!(
                "unknown overlap policy '{}', expected 'first-match' or 'reject'",
                other
            )),
        }
    }
}

/// Classifies one slot against the records of one service on one day, with
/// first-match-wins on overlap.
pub fn resolve_slot<'a>(
    slot: &DisplaySlot,
    records: &'a [RawAvailabilityRecord],
) -> SlotResolution<'a> {
    let covering = records.iter().find(|record| record.covers(slot));
    classify(slot, covering)
}

fn classify<'a>(
    slot: &DisplaySlot,
    covering: Option<&'a RawAvailabilityRecord>,
) -> SlotResolution<'a> {
    match covering {
        None => SlotResolution::unavailable(SlotStatus::UnavailableEmpty),
        Some(record) if !record.is_available => {
            SlotResolution::unavailable(SlotStatus::UnavailableBlocked)
        }
        Some(record) if record.start_time == slot.start_time => SlotResolution::available(record),
        Some(_) => SlotResolution::unavailable(SlotStatus::UnavailableCovered),
    }
}

/// Slot classification with an explicit overlap policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotResolver {
    policy: OverlapPolicy,
}

impl SlotResolver {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    pub fn resolve<'a>(
        &self,
        slot: &DisplaySlot,
        records: &'a [RawAvailabilityRecord],
    ) -> Result<SlotResolution<'a>, SlotError> {
        let mut covering = records.iter().filter(|record| record.covers(slot));
        let first = covering.next();

        if let (Some(first), Some(second)) = (first, covering.next()) {
            match self.policy {
                OverlapPolicy::FirstMatch => warn!(
                    service_id = %first.service_id,
                    "Overlapping records {}-{} and {}-{} cover slot {}; using the first",
                    first.start_time,
                    first.end_time,
                    second.start_time,
                    second.end_time,
                    slot.start_time
                ),
                OverlapPolicy::Reject => {
                    return Err(SlotError::OverlappingRecords {
                        service_id: first.service_id.clone(),
                        slot_start: slot.start_time,
                    })
                }
            }
        }

        Ok(classify(slot, first))
    }
}
