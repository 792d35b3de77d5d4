// --- File: crates/venuegrid_common/src/services.rs ---
//! The booking-engine abstraction.
//!
//! Handlers and logic only see [`BookingEngine`]; the HTTP adapter and the
//! in-memory test engine live in `venuegrid_booking::service`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use venuegrid_slots::BookingTarget;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Errors reported by a booking engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Booking engine request failed: {0}")]
    Transport(String),
    #[error("Booking engine timed out: {0}")]
    Timeout(String),
    #[error("Booking engine answered {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Unknown venue: {0}")]
    VenueNotFound(String),
    /// The engine refused the booking (slot taken in the meantime, capacity exhausted).
    #[error("Booking rejected: {0}")]
    Rejected(String),
    #[error("Unreadable booking engine response: {0}")]
    Decode(String),
}

/// Operations VenueGrid needs from the external booking engine.
pub trait BookingEngine: Send + Sync {
    /// Venue metadata including its bookable services.
    fn get_venue(&self, venue_id: &str) -> BoxFuture<'_, Venue, EngineError>;

    /// Raw availability for `from..=to`. The document is validated by
    /// `venuegrid_slots::ingest_json`.
    fn fetch_availability(
        &self,
        venue_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BoxFuture<'_, serde_json::Value, EngineError>;

    /// Starts a booking for a record the resolver reported as available.
    fn create_booking(
        &self,
        request: BookingRequest,
    ) -> BoxFuture<'_, BookingConfirmation, EngineError>;
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    /// IANA time zone of the venue, if the engine knows it.
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub services: Vec<VenueService>,
}

/// A bookable unit at a venue (a court, a room).
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueService {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sport: Option<String>,
}

/// What is sent to the engine to initiate a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub venue_id: String,
    /// Stable across retries of one click; the engine deduplicates on it.
    pub idempotency_key: String,
    #[serde(flatten)]
    pub target: BookingTarget,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_reference: Option<String>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub status: String,
    /// Where the customer completes payment, when the engine requires it.
    #[serde(default)]
    pub checkout_url: Option<String>,
}
