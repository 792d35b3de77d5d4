// --- File: crates/venuegrid_slots/src/schedule.rs ---
//! The per-day view: one shared grid, one row of classified cells per service.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::SlotError;
use crate::grid::build_display_slots;
use crate::models::{BookingTarget, DisplaySlot, RawAvailabilityRecord, SlotStatus};
use crate::resolver::{OverlapPolicy, SlotResolver};
use crate::time::{SlotWidth, WallClock};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleOptions {
    pub width: SlotWidth,
    pub overlap_policy: OverlapPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCell {
    #[serde(flatten)]
    pub slot: DisplaySlot,
    pub status: SlotStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRow {
    pub service_id: String,
    pub cells: Vec<ScheduleCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub slots: Vec<DisplaySlot>,
    pub services: Vec<ServiceRow>,
}

impl DaySchedule {
    /// Builds the schedule of `date` from the records that start on it.
    /// Rows are ordered by service id.
    pub fn build(
        date: NaiveDate,
        records: &[RawAvailabilityRecord],
        options: &ScheduleOptions,
    ) -> Result<Self, SlotError> {
        Self::build_with_services(date, records, &[], options)
    }

    /// Like [`DaySchedule::build`], but every id in `services` gets a row even
    /// if it has no records that day.
    pub fn build_with_services(
        date: NaiveDate,
        records: &[RawAvailabilityRecord],
        services: &[String],
        options: &ScheduleOptions,
    ) -> Result<Self, SlotError> {
        let day_records: Vec<RawAvailabilityRecord> = records
            .iter()
            .filter(|record| record.start_date == date)
            .cloned()
            .collect();
        if day_records.len() < records.len() {
            debug!(
                "Ignoring {} records outside {}",
                records.len() - day_records.len(),
                date
            );
        }

        let slots = build_display_slots(&day_records, options.width);
        if slots.is_empty() {
            debug!("No availability on {}", date);
            return Ok(Self {
                date,
                slots,
                services: Vec::new(),
            });
        }

        let mut by_service: BTreeMap<String, Vec<RawAvailabilityRecord>> = services
            .iter()
            .map(|service_id| (service_id.clone(), Vec::new()))
            .collect();
        for record in day_records {
            by_service
                .entry(record.service_id.clone())
                .or_default()
                .push(record);
        }

        let resolver = SlotResolver::new(options.overlap_policy);
        let mut rows = Vec::with_capacity(by_service.len());
        for (service_id, service_records) in &by_service {
            let cells = slots
                .iter()
                .map(|slot| {
                    let resolution = resolver.resolve(slot, service_records)?;
                    Ok(ScheduleCell {
                        slot: *slot,
                        status: resolution.status,
                        booking: resolution.record.map(RawAvailabilityRecord::booking_target),
                    })
                })
                .collect::<Result<Vec<_>, SlotError>>()?;
            rows.push(ServiceRow {
                service_id: service_id.clone(),
                cells,
            });
        }

        Ok(Self {
            date,
            slots,
            services: rows,
        })
    }

    /// No display slots at all: the "no availability" state.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn cell(&self, service_id: &str, start_time: WallClock) -> Option<&ScheduleCell> {
        self.services
            .iter()
            .find(|row| row.service_id == service_id)?
            .cells
            .iter()
            .find(|cell| cell.slot.start_time == start_time)
    }

    /// The booking target behind a click on (`service_id`, `start_time`), if
    /// that cell is bookable.
    pub fn find_bookable(&self, service_id: &str, start_time: WallClock) -> Option<&BookingTarget> {
        self.cell(service_id, start_time)?.booking.as_ref()
    }

    pub fn bookable_count(&self) -> usize {
        self.services
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| cell.status.is_bookable())
            .count()
    }
}

/// Date-picker summary for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slot_count: usize,
    pub bookable_slots: usize,
    pub has_availability: bool,
}

/// Summaries for every date in `from..=to`; dates without records report
/// zero slots.
pub fn day_summaries(
    from: NaiveDate,
    to: NaiveDate,
    records_by_day: &BTreeMap<NaiveDate, Vec<RawAvailabilityRecord>>,
    options: &ScheduleOptions,
) -> Result<Vec<DayAvailability>, SlotError> {
    from.iter_days()
        .take_while(|date| *date <= to)
        .map(|date| {
            let records = records_by_day.get(&date).map(Vec::as_slice).unwrap_or(&[]);
            let schedule = DaySchedule::build(date, records, options)?;
            let bookable_slots = schedule.bookable_count();
            Ok(DayAvailability {
                date,
                slot_count: schedule.slots.len(),
                bookable_slots,
                has_availability: bookable_slots > 0,
            })
        })
        .collect()
}
