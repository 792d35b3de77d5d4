// File: crates/venuegrid_booking/src/handlers.rs
use crate::logic::{
    book_slot, load_day_schedule, load_day_summaries, parse_date, BookSlotRequest,
    BookingResponse, DaysQuery, DaysResponse, ScheduleQuery, ScheduleResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::info;
use venuegrid_common::services::BookingEngine;
use venuegrid_common::{log_result, service_unavailable, VenueGridError};
use venuegrid_config::AppConfig;

// Shared state needed by the booking handlers
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub engine: Option<Arc<dyn BookingEngine>>,
}

impl BookingState {
    /// The engine, or 503 when booking is switched off or not configured.
    fn engine(&self) -> Result<&dyn BookingEngine, VenueGridError> {
        if !self.config.use_booking {
            return Err(service_unavailable("Booking service is disabled."));
        }
        self.engine
            .as_deref()
            .ok_or_else(|| service_unavailable("Booking engine is not configured."))
    }
}

/// Handler for the schedule grid of one venue day.
pub async fn get_schedule_handler(
    State(state): State<Arc<BookingState>>,
    Path(venue_id): Path<String>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, VenueGridError> {
    let engine = state.engine()?;
    let date = query
        .date
        .as_deref()
        .map(|raw| parse_date(raw, "date"))
        .transpose()?;

    let response = load_day_schedule(engine, &venue_id, date, &state.config.schedule).await?;
    Ok(Json(response))
}

/// Handler for the date-picker summaries of a venue.
pub async fn get_days_handler(
    State(state): State<Arc<BookingState>>,
    Path(venue_id): Path<String>,
    Query(query): Query<DaysQuery>,
) -> Result<Json<DaysResponse>, VenueGridError> {
    let engine = state.engine()?;
    let from = parse_date(&query.from, "from")?;
    let to = parse_date(&query.to, "to")?;

    let response = load_day_summaries(engine, &venue_id, from, to, &state.config.schedule).await?;
    Ok(Json(response))
}

/// Handler to book the record behind a clicked cell.
pub async fn book_slot_handler(
    State(state): State<Arc<BookingState>>,
    Path(venue_id): Path<String>,
    Json(payload): Json<BookSlotRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), VenueGridError> {
    let engine = state.engine()?;
    info!(
        "Booking request for venue {}: {} {} {}",
        venue_id, payload.service_id, payload.date, payload.start_time
    );

    let result = log_result(
        book_slot(engine, &venue_id, payload, &state.config.schedule).await,
        "Booking created",
        "Booking failed",
    );
    Ok((StatusCode::CREATED, Json(result?)))
}
