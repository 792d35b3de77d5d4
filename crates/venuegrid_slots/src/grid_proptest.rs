#[cfg(test)]
mod tests {
    use crate::grid::build_display_slots;
    use crate::models::{RawAvailabilityRecord, SlotStatus};
    use crate::resolver::resolve_slot;
    use crate::time::{walk_slots, SlotWidth, WallClock};
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    // Helper to build a record from minute offsets
    fn make_record(service: u8, start: u16, length: u16, available: bool) -> RawAvailabilityRecord {
        let date = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
        let start_time = WallClock::from_hm(start / 60, start % 60).unwrap();
        let end_minutes = (start + length).min(1440);
        let end_time = WallClock::from_hm(end_minutes / 60, end_minutes % 60).unwrap();
        RawAvailabilityRecord::new(format!("s{}", service), date, start_time, end_time, available)
    }

    // Records starting on the quarter hour, up to six hours long
    fn records_strategy() -> impl Strategy<Value = Vec<RawAvailabilityRecord>> {
        prop::collection::vec(
            (0u8..3, 0u16..96, 1u16..25, any::<bool>())
                .prop_map(|(service, quarter, quarters, available)| {
                    make_record(service, quarter * 15, quarters * 15, available)
                }),
            0..12,
        )
    }

    fn width_strategy() -> impl Strategy<Value = SlotWidth> {
        prop_oneof![Just(15u32), Just(30u32), Just(60u32), Just(90u32)]
            .prop_map(|minutes| SlotWidth::new(minutes).unwrap())
    }

    proptest! {
        // The grid is strictly ordered, unique and uniformly wide
        #[test]
        fn test_grid_is_sorted_unique_and_uniform(
            records in records_strategy(),
            width in width_strategy(),
        ) {
            let slots = build_display_slots(&records, width);
            for pair in slots.windows(2) {
                prop_assert!(pair[0].start_time < pair[1].start_time);
            }
            for slot in &slots {
                prop_assert_eq!(slot.duration_minutes, width.minutes());
                prop_assert_eq!(
                    slot.start_time.minutes_until(slot.end_time),
                    Some(width.minutes())
                );
            }
        }

        // Every slot lies inside at least one record
        #[test]
        fn test_every_slot_is_backed_by_a_record(
            records in records_strategy(),
            width in width_strategy(),
        ) {
            let slots = build_display_slots(&records, width);
            for slot in &slots {
                prop_assert!(records.iter().any(|record| record.covers(slot)));
            }
        }

        // Every whole-width step of every record appears exactly once
        #[test]
        fn test_every_record_step_is_in_the_grid_once(
            records in records_strategy(),
            width in width_strategy(),
        ) {
            let slots = build_display_slots(&records, width);
            for record in &records {
                if let Ok((start, end)) = record.span() {
                    for (step_start, step_end) in walk_slots(start, end, width) {
                        let hits = slots
                            .iter()
                            .filter(|slot| slot.start_time == step_start && slot.end_time == step_end)
                            .count();
                        prop_assert_eq!(hits, 1);
                    }
                }
            }

            let starts: BTreeSet<WallClock> = slots.iter().map(|slot| slot.start_time).collect();
            prop_assert_eq!(starts.len(), slots.len());
        }

        // Input order never changes the grid
        #[test]
        fn test_grid_ignores_input_order(
            records in records_strategy(),
            width in width_strategy(),
        ) {
            let mut reversed = records.clone();
            reversed.reverse();
            prop_assert_eq!(
                build_display_slots(&records, width),
                build_display_slots(&reversed, width)
            );
        }

        // A slot is available only at its record's start and only if the record is
        #[test]
        fn test_available_only_on_record_start(
            records in records_strategy(),
            width in width_strategy(),
        ) {
            let slots = build_display_slots(&records, width);
            for service in 0u8..3 {
                let service_id = format!("s{}", service);
                let own: Vec<RawAvailabilityRecord> = records
                    .iter()
                    .filter(|record| record.service_id == service_id)
                    .cloned()
                    .collect();
                for slot in &slots {
                    let resolution = resolve_slot(slot, &own);
                    match resolution.status {
                        SlotStatus::Available => {
                            let record = resolution.record.unwrap();
                            prop_assert!(record.is_available);
                            prop_assert_eq!(record.start_time, slot.start_time);
                        }
                        SlotStatus::UnavailableEmpty => {
                            prop_assert!(own.iter().all(|record| !record.covers(slot)));
                        }
                        _ => prop_assert!(resolution.record.is_none()),
                    }
                }
            }
        }
    }
}
