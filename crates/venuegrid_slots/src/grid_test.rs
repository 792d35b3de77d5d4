#[cfg(test)]
mod tests {
    use crate::grid::build_display_slots;
    use crate::models::{DisplaySlot, RawAvailabilityRecord};
    use crate::time::{SlotWidth, WallClock};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
    }

    fn at(value: &str) -> WallClock {
        WallClock::parse(value).unwrap()
    }

    fn record(service_id: &str, start: &str, end: &str, available: bool) -> RawAvailabilityRecord {
        RawAvailabilityRecord::new(service_id, day(), at(start), at(end), available)
    }

    fn starts(slots: &[DisplaySlot]) -> Vec<String> {
        slots.iter().map(|slot| slot.start_time.to_string()).collect()
    }

    #[test]
    fn test_empty_input_yields_empty_grid() {
        let slots = build_display_slots(&[], SlotWidth::HOUR);
        assert!(slots.is_empty());
    }

    #[test]
    fn test_two_hour_record_yields_two_slots() {
        let records = vec![record("s1", "09:00", "11:00", true)];
        let slots = build_display_slots(&records, SlotWidth::HOUR);

        assert_eq!(
            slots,
            vec![
                DisplaySlot {
                    start_time: at("09:00"),
                    end_time: at("10:00"),
                    duration_minutes: 60,
                },
                DisplaySlot {
                    start_time: at("10:00"),
                    end_time: at("11:00"),
                    duration_minutes: 60,
                },
            ]
        );
    }

    #[test]
    fn test_partial_tail_is_dropped_not_rounded() {
        let records = vec![record("s1", "09:00", "10:45", true)];
        let slots = build_display_slots(&records, SlotWidth::HOUR);
        assert_eq!(starts(&slots), vec!["09:00"]);
    }

    #[test]
    fn test_record_shorter_than_width_yields_nothing() {
        let records = vec![record("s1", "09:00", "09:30", true)];
        assert!(build_display_slots(&records, SlotWidth::HOUR).is_empty());
    }

    #[test]
    fn test_degenerate_records_are_skipped() {
        let records = vec![
            record("s1", "09:00", "09:00", true),
            record("s1", "12:00", "10:00", true),
            record("s2", "14:00", "15:00", true),
        ];
        let slots = build_display_slots(&records, SlotWidth::HOUR);
        assert_eq!(starts(&slots), vec!["14:00"]);
    }

    #[test]
    fn test_overlapping_records_across_services_are_deduplicated() {
        let records = vec![
            record("s1", "09:00", "12:00", true),
            record("s2", "10:00", "11:00", false),
            record("s3", "09:00", "10:00", true),
        ];
        let slots = build_display_slots(&records, SlotWidth::HOUR);
        assert_eq!(starts(&slots), vec!["09:00", "10:00", "11:00"]);
    }

    #[test]
    fn test_misaligned_records_are_ordered_by_start() {
        // The later-starting record comes first in the input and its steps
        // interleave with the earlier one.
        let records = vec![
            record("s2", "09:30", "11:30", true),
            record("s1", "09:00", "11:00", true),
        ];
        let slots = build_display_slots(&records, SlotWidth::HOUR);
        assert_eq!(starts(&slots), vec!["09:00", "09:30", "10:00", "10:30"]);
        assert!(slots.windows(2).all(|pair| pair[0].start_time < pair[1].start_time));
    }

    #[test]
    fn test_slots_never_exceed_generating_record() {
        let records = vec![record("s1", "08:00", "10:59", true)];
        let slots = build_display_slots(&records, SlotWidth::HOUR);
        assert_eq!(starts(&slots), vec!["08:00", "09:00"]);
        assert!(slots.iter().all(|slot| slot.end_time <= at("10:59")));
    }

    #[test]
    fn test_half_hour_width() {
        let width = SlotWidth::new(30).unwrap();
        let records = vec![record("s1", "18:00", "19:30", true)];
        let slots = build_display_slots(&records, width);
        assert_eq!(starts(&slots), vec!["18:00", "18:30", "19:00"]);
        assert!(slots.iter().all(|slot| slot.duration_minutes == 30));
    }

    #[test]
    fn test_record_until_end_of_day() {
        let records = vec![record("s1", "22:00", "24:00", true)];
        let slots = build_display_slots(&records, SlotWidth::HOUR);
        assert_eq!(starts(&slots), vec!["22:00", "23:00"]);
        assert_eq!(slots[1].end_time, WallClock::END_OF_DAY);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let records = vec![
            record("s1", "09:00", "12:00", true),
            record("s2", "07:00", "08:00", false),
        ];
        let first = build_display_slots(&records, SlotWidth::HOUR);
        let second = build_display_slots(&records, SlotWidth::HOUR);
        assert_eq!(first, second);
    }
}
