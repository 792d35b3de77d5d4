// --- File: crates/venuegrid_booking/src/logic.rs ---
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;
use venuegrid_common::services::{BookingEngine, BookingRequest, EngineError, Venue};
use venuegrid_common::{
    config_error, conflict, external_service_error, not_found, validation_error, VenueGridError,
};
use venuegrid_config::ScheduleConfig;
use venuegrid_slots::{
    day_summaries, group_by_day, ingest_json, AvailabilityError, BookingTarget, DayAvailability,
    DaySchedule, OverlapPolicy, ScheduleOptions, SlotError, SlotStatus, SlotWidth, WallClock,
};

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Booking engine error: {0}")]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Availability(#[from] AvailabilityError),
    /// Raised by the reject overlap policy when engine data overlaps.
    #[error("Inconsistent availability: {0}")]
    Schedule(#[from] SlotError),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Date range of {days} days exceeds the maximum of {max}")]
    RangeTooLong { days: i64, max: u32 },
    #[error("Slot {service_id} at {start_time} is not bookable ({status})")]
    SlotNotBookable {
        service_id: String,
        start_time: WallClock,
        status: SlotStatus,
    },
    #[error("Schedule configuration error: {0}")]
    Config(String),
}

impl From<BookingError> for VenueGridError {
    fn from(err: BookingError) -> Self {
        const ENGINE: &str = "booking engine";
        match err {
            BookingError::Engine(EngineError::VenueNotFound(venue_id)) => {
                not_found(format!("venue {}", venue_id))
            }
            BookingError::Engine(EngineError::Rejected(message)) => conflict(message),
            BookingError::Engine(EngineError::Timeout(message)) => {
                VenueGridError::TimeoutError(message)
            }
            BookingError::Engine(other) => external_service_error(ENGINE, other),
            BookingError::Availability(inner) => external_service_error(ENGINE, inner),
            BookingError::Schedule(inner) => external_service_error(
                ENGINE,
                format!("Unable to load availability: {}", inner),
            ),
            BookingError::InvalidRequest(_) | BookingError::RangeTooLong { .. } => {
                validation_error(err)
            }
            BookingError::SlotNotBookable { .. } => conflict(err),
            BookingError::Config(message) => config_error(message),
        }
    }
}

// --- Request / Response types ---

#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[derive(Deserialize, Debug, Default)]
pub struct ScheduleQuery {
    /// YYYY-MM-DD; today in the venue's time zone when omitted.
    pub date: Option<String>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[derive(Deserialize, Debug)]
pub struct DaysQuery {
    pub from: String,
    pub to: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub venue_id: String,
    pub venue_name: String,
    pub time_zone: String,
    pub has_availability: bool,
    #[serde(flatten)]
    pub schedule: DaySchedule,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DaysResponse {
    pub venue_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: Vec<DayAvailability>,
}

/// A click on a grid cell.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookSlotRequest {
    pub service_id: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:mm, the start of the clicked display slot
    pub start_time: String,
    #[serde(default)]
    pub customer_reference: Option<String>,
    /// Reused by the client when it retries the same click.
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: String,
    pub status: String,
    pub checkout_url: Option<String>,
    pub booking: BookingTarget,
}

// --- Helpers ---

/// Grid options from the `[schedule]` config section.
pub fn schedule_options(config: &ScheduleConfig) -> Result<ScheduleOptions, BookingError> {
    let width =
        SlotWidth::new(config.slot_minutes).map_err(|e| BookingError::Config(e.to_string()))?;
    let overlap_policy = config
        .overlap_policy
        .parse::<OverlapPolicy>()
        .map_err(BookingError::Config)?;
    Ok(ScheduleOptions {
        width,
        overlap_policy,
    })
}

/// The venue's own zone, else the configured default, else Europe/Zurich.
pub fn venue_time_zone(venue: &Venue, config: &ScheduleConfig) -> Tz {
    if let Some(raw) = venue.time_zone.as_deref() {
        match raw.parse::<Tz>() {
            Ok(tz) => return tz,
            Err(_) => warn!("Venue {} reports unknown time zone '{}'", venue.id, raw),
        }
    }
    config
        .default_time_zone
        .parse::<Tz>()
        .unwrap_or(Tz::Europe__Zurich)
}

/// The key the engine deduplicates a booking attempt on.
///
/// A key supplied by the client wins. Otherwise the key is derived from the
/// booked record, so retries of the same click carry the same key.
pub fn idempotency_key(venue_id: &str, target: &BookingTarget, supplied: Option<&str>) -> String {
    match supplied.map(str::trim).filter(|key| !key.is_empty()) {
        Some(key) => key.to_string(),
        None => {
            let name = format!(
                "{}/{}/{}/{}",
                venue_id, target.service_id, target.date, target.start_time
            );
            Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
        }
    }
}

pub fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        BookingError::InvalidRequest(format!("invalid {} '{}', expected YYYY-MM-DD", field, raw))
    })
}

// --- Operations ---

/// Loads one day of a venue as a schedule grid.
///
/// Every service the venue lists gets a row, even without records.
pub async fn load_day_schedule(
    engine: &dyn BookingEngine,
    venue_id: &str,
    date: Option<NaiveDate>,
    config: &ScheduleConfig,
) -> Result<ScheduleResponse, BookingError> {
    let options = schedule_options(config)?;
    let venue = engine.get_venue(venue_id).await?;
    let time_zone = venue_time_zone(&venue, config);
    let date = date.unwrap_or_else(|| Utc::now().with_timezone(&time_zone).date_naive());

    let document = engine.fetch_availability(venue_id, date, date).await?;
    let records = ingest_json(document, time_zone)?;

    let service_ids: Vec<String> = venue.services.iter().map(|s| s.id.clone()).collect();
    let schedule = DaySchedule::build_with_services(date, &records, &service_ids, &options)?;
    info!(
        "Schedule for venue {} on {}: {} slots, {} bookable",
        venue_id,
        date,
        schedule.slots.len(),
        schedule.bookable_count()
    );

    Ok(ScheduleResponse {
        venue_id: venue.id,
        venue_name: venue.name,
        time_zone: time_zone.name().to_string(),
        has_availability: schedule.bookable_count() > 0,
        schedule,
    })
}

/// Date-picker summaries for `from..=to`, at most `max_range_days` days.
pub async fn load_day_summaries(
    engine: &dyn BookingEngine,
    venue_id: &str,
    from: NaiveDate,
    to: NaiveDate,
    config: &ScheduleConfig,
) -> Result<DaysResponse, BookingError> {
    if to < from {
        return Err(BookingError::InvalidRequest(
            "'to' must not be before 'from'".to_string(),
        ));
    }
    let days = (to - from).num_days() + 1;
    if days > i64::from(config.max_range_days) {
        return Err(BookingError::RangeTooLong {
            days,
            max: config.max_range_days,
        });
    }

    let options = schedule_options(config)?;
    let venue = engine.get_venue(venue_id).await?;
    let time_zone = venue_time_zone(&venue, config);

    let document = engine.fetch_availability(venue_id, from, to).await?;
    let by_day = group_by_day(ingest_json(document, time_zone)?);
    let days = day_summaries(from, to, &by_day, &options)?;

    Ok(DaysResponse {
        venue_id: venue.id,
        from,
        to,
        days,
    })
}

/// Books the record behind a clicked cell.
///
/// The day is re-fetched and re-resolved so a stale client cannot book a
/// covered, blocked or empty cell; only the first slot of an available
/// record reaches the engine.
pub async fn book_slot(
    engine: &dyn BookingEngine,
    venue_id: &str,
    request: BookSlotRequest,
    config: &ScheduleConfig,
) -> Result<BookingResponse, BookingError> {
    let date = parse_date(&request.date, "date")?;
    let start_time = WallClock::parse(&request.start_time).map_err(|_| {
        BookingError::InvalidRequest(format!(
            "invalid startTime '{}', expected HH:mm",
            request.start_time
        ))
    })?;

    let day = load_day_schedule(engine, venue_id, Some(date), config).await?;
    let schedule = &day.schedule;
    let target = match schedule.cell(&request.service_id, start_time) {
        Some(cell) => match &cell.booking {
            Some(target) => target.clone(),
            None => {
                return Err(BookingError::SlotNotBookable {
                    service_id: request.service_id,
                    start_time,
                    status: cell.status,
                })
            }
        },
        None => {
            return Err(BookingError::SlotNotBookable {
                service_id: request.service_id,
                start_time,
                status: SlotStatus::UnavailableEmpty,
            })
        }
    };

    let engine_request = BookingRequest {
        venue_id: venue_id.to_string(),
        idempotency_key: idempotency_key(venue_id, &target, request.idempotency_key.as_deref()),
        target: target.clone(),
        customer_reference: request.customer_reference,
    };
    let confirmation = engine.create_booking(engine_request).await?;
    info!(
        "Booked {} at {} {} (booking {})",
        target.service_id, target.date, target.start_time, confirmation.booking_id
    );

    Ok(BookingResponse {
        booking_id: confirmation.booking_id,
        status: confirmation.status,
        checkout_url: confirmation.checkout_url,
        booking: target,
    })
}
