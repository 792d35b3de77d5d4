#[cfg(test)]
mod tests {
    use crate::error::SlotError;
    use crate::grid::build_display_slots;
    use crate::models::{DisplaySlot, RawAvailabilityRecord, SlotStatus};
    use crate::resolver::{resolve_slot, OverlapPolicy, SlotResolver};
    use crate::time::{SlotWidth, WallClock};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
    }

    fn at(value: &str) -> WallClock {
        WallClock::parse(value).unwrap()
    }

    fn record(start: &str, end: &str, available: bool) -> RawAvailabilityRecord {
        RawAvailabilityRecord::new("s1", day(), at(start), at(end), available)
    }

    fn slot(start: &str) -> DisplaySlot {
        DisplaySlot::new(at(start), SlotWidth::HOUR).unwrap()
    }

    #[test]
    fn test_first_hour_available_rest_covered() {
        let mut long = record("09:00", "11:00", true);
        long.duration_minutes = 120;
        let records = vec![long];

        let first = resolve_slot(&slot("09:00"), &records);
        assert_eq!(first.status, SlotStatus::Available);
        assert_eq!(first.record, Some(&records[0]));

        let second = resolve_slot(&slot("10:00"), &records);
        assert_eq!(second.status, SlotStatus::UnavailableCovered);
        assert_eq!(second.record, None);
    }

    #[test]
    fn test_blocked_and_available_neighbours() {
        let records = vec![record("08:00", "09:00", true), record("09:00", "10:00", false)];

        assert_eq!(resolve_slot(&slot("08:00"), &records).status, SlotStatus::Available);
        assert_eq!(
            resolve_slot(&slot("09:00"), &records).status,
            SlotStatus::UnavailableBlocked
        );
    }

    #[test]
    fn test_blocked_is_not_empty() {
        let records = vec![record("09:00", "10:00", false)];

        let blocked = resolve_slot(&slot("09:00"), &records);
        let empty = resolve_slot(&slot("12:00"), &records);

        assert_eq!(blocked.status, SlotStatus::UnavailableBlocked);
        assert_eq!(empty.status, SlotStatus::UnavailableEmpty);
        assert_ne!(blocked.status, empty.status);
        assert!(blocked.record.is_none() && empty.record.is_none());
    }

    #[test]
    fn test_later_hours_of_blocked_record_stay_blocked() {
        let records = vec![record("09:00", "12:00", false)];
        for start in ["09:00", "10:00", "11:00"] {
            assert_eq!(
                resolve_slot(&slot(start), &records).status,
                SlotStatus::UnavailableBlocked,
                "slot {}",
                start
            );
        }
    }

    #[test]
    fn test_partial_overlap_is_not_coverage() {
        let records = vec![record("09:30", "10:30", true)];
        assert_eq!(
            resolve_slot(&slot("09:00"), &records).status,
            SlotStatus::UnavailableEmpty
        );
        assert_eq!(
            resolve_slot(&slot("10:00"), &records).status,
            SlotStatus::UnavailableEmpty
        );
    }

    #[test]
    fn test_no_records_is_empty() {
        assert_eq!(resolve_slot(&slot("09:00"), &[]).status, SlotStatus::UnavailableEmpty);
    }

    #[test]
    fn test_first_covering_record_wins() {
        // Well-formed data never overlaps, but the tie-break must be stable.
        let records = vec![record("08:00", "10:00", true), record("09:00", "10:00", true)];
        let resolution = resolve_slot(&slot("09:00"), &records);
        assert_eq!(resolution.status, SlotStatus::UnavailableCovered);

        let reversed = vec![record("09:00", "10:00", true), record("08:00", "10:00", true)];
        let resolution = resolve_slot(&slot("09:00"), &reversed);
        assert_eq!(resolution.status, SlotStatus::Available);
        assert_eq!(resolution.record, Some(&reversed[0]));
    }

    #[test]
    fn test_resolver_first_match_policy_matches_free_function() {
        let records = vec![record("08:00", "10:00", true), record("09:00", "10:00", false)];
        let resolver = SlotResolver::new(OverlapPolicy::FirstMatch);
        for start in ["08:00", "09:00", "10:00"] {
            let slot = slot(start);
            assert_eq!(
                resolver.resolve(&slot, &records).unwrap(),
                resolve_slot(&slot, &records)
            );
        }
    }

    #[test]
    fn test_resolver_reject_policy_fails_on_overlap() {
        let records = vec![record("08:00", "10:00", true), record("09:00", "10:00", true)];
        let resolver = SlotResolver::new(OverlapPolicy::Reject);

        // 08:00 is covered only once
        assert_eq!(
            resolver.resolve(&slot("08:00"), &records).unwrap().status,
            SlotStatus::Available
        );
        assert_eq!(
            resolver.resolve(&slot("09:00"), &records),
            Err(SlotError::OverlappingRecords {
                service_id: "s1".to_string(),
                slot_start: at("09:00"),
            })
        );
    }

    #[test]
    fn test_exactly_one_available_slot_per_record() {
        for hours in 1..=6u16 {
            let end = WallClock::from_hm(8 + hours, 0).unwrap();
            let records = vec![RawAvailabilityRecord::new("s1", day(), at("08:00"), end, true)];
            let grid = build_display_slots(&records, SlotWidth::HOUR);
            assert_eq!(grid.len(), usize::from(hours));

            let statuses: Vec<SlotStatus> = grid
                .iter()
                .map(|slot| resolve_slot(slot, &records).status)
                .collect();
            let available = statuses.iter().filter(|s| **s == SlotStatus::Available).count();
            let covered = statuses
                .iter()
                .filter(|s| **s == SlotStatus::UnavailableCovered)
                .count();
            assert_eq!(available, 1);
            assert_eq!(covered, usize::from(hours) - 1);
            assert_eq!(statuses[0], SlotStatus::Available);
        }
    }

    #[test]
    fn test_overlap_policy_parsing() {
        assert_eq!("first-match".parse::<OverlapPolicy>(), Ok(OverlapPolicy::FirstMatch));
        assert_eq!("reject".parse::<OverlapPolicy>(), Ok(OverlapPolicy::Reject));
        assert!("strict".parse::<OverlapPolicy>().is_err());
        assert_eq!(OverlapPolicy::default(), OverlapPolicy::FirstMatch);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(SlotStatus::UnavailableCovered).unwrap(),
            serde_json::json!("unavailable-covered")
        );
        assert_eq!(SlotStatus::UnavailableBlocked.to_string(), "unavailable-blocked");
        assert_eq!(SlotStatus::UnavailableEmpty.as_str(), "unavailable-empty");
        assert!(SlotStatus::Available.is_bookable());
        assert!(!SlotStatus::UnavailableCovered.is_bookable());
    }
}
