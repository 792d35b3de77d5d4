// --- File: crates/venuegrid_booking/src/routes.rs ---

use crate::handlers::{book_slot_handler, get_days_handler, get_schedule_handler, BookingState};
use crate::service::HttpBookingEngine;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use venuegrid_common::services::BookingEngine;
use venuegrid_common::{external_service_error, VenueGridError};
use venuegrid_config::AppConfig;

/// Creates the booking router, connecting to the engine from `config`.
///
/// With `use_booking = false` no engine is built and every route answers 503.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, VenueGridError> {
    let engine: Option<Arc<dyn BookingEngine>> = match config.booking_engine.as_ref() {
        Some(engine_config) if config.use_booking => Some(Arc::new(
            HttpBookingEngine::new(engine_config)
                .map_err(|e| external_service_error("booking engine", e))?,
        )),
        _ => None,
    };
    Ok(routes_with_engine(config, engine))
}

/// Creates the booking router around an existing engine.
pub fn routes_with_engine(
    config: Arc<AppConfig>,
    engine: Option<Arc<dyn BookingEngine>>,
) -> Router {
    let state = Arc::new(BookingState { config, engine });

    Router::new()
        .route("/venues/{venue_id}/schedule", get(get_schedule_handler))
        .route("/venues/{venue_id}/days", get(get_days_handler))
        .route("/venues/{venue_id}/bookings", post(book_slot_handler))
        .with_state(state)
}
