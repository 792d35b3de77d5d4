// --- File: crates/venuegrid_slots/src/grid.rs ---
use std::collections::BTreeSet;
use tracing::debug;

use crate::models::{DisplaySlot, RawAvailabilityRecord};
use crate::time::{walk_slots, SlotWidth, WallClock};

/// Builds the ordered, deduplicated display grid for a set of records.
///
/// Every record is walked from its start in steps of `width`; a step is kept
/// only if it ends inside the record, so trailing remainders are dropped
/// rather than rounded. Steps already produced by an earlier record are
/// skipped. Degenerate records contribute nothing.
///
/// The output is strictly increasing by start time and depends only on the
/// set of records, not on their order.
pub fn build_display_slots(records: &[RawAvailabilityRecord], width: SlotWidth) -> Vec<DisplaySlot> {
    let mut ordered: Vec<&RawAvailabilityRecord> = records.iter().collect();
    // stable: ties keep input order
    ordered.sort_by_key(|record| record.start_time);

    let mut seen: BTreeSet<(WallClock, WallClock)> = BTreeSet::new();
    for record in ordered {
        let (start, end) = match record.span() {
            Ok(span) => span,
            Err(err) => {
                debug!(
                    service_id = %record.service_id,
                    "Record yields no display slots: {}",
                    err
                );
                continue;
            }
        };
        for step in walk_slots(start, end, width) {
            seen.insert(step);
        }
    }

    seen.into_iter()
        .map(|(start_time, end_time)| DisplaySlot {
            start_time,
            end_time,
            duration_minutes: width.minutes(),
        })
        .collect()
}
