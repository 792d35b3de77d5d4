// --- File: crates/venuegrid_booking/src/service.rs ---
//! Booking engine implementations.
//!
//! [`HttpBookingEngine`] talks to the engine's REST API; [`mock::MockBookingEngine`]
//! keeps everything in memory for tests.

use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};
use venuegrid_common::create_bearer_client;
use venuegrid_common::services::{
    BookingConfirmation, BookingEngine, BookingRequest, BoxFuture, EngineError, Venue,
};
use venuegrid_config::BookingEngineConfig;

const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// REST client for the booking engine.
///
/// Endpoints, relative to `base_url`:
/// * `GET venues/{id}`
/// * `GET venues/{id}/availability?from=YYYY-MM-DD&to=YYYY-MM-DD`
/// * `POST bookings`
pub struct HttpBookingEngine {
    client: Client,
    base_url: String,
}

impl HttpBookingEngine {
    pub fn new(config: &BookingEngineConfig) -> Result<Self, EngineError> {
        let client = create_bearer_client(config.timeout_secs, config.api_key.as_deref())
            .map_err(|e| EngineError::Transport(format!("failed to build client: {}", e)))?;
        if config.api_key.is_none() {
            warn!("Booking engine api_key is not set; requests are unauthenticated");
        }
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn transport_error(err: reqwest::Error) -> EngineError {
    if err.is_timeout() {
        EngineError::Timeout(err.to_string())
    } else {
        EngineError::Transport(err.to_string())
    }
}

/// Passes 2xx responses through and turns everything else into an error.
async fn check_status(response: Response, venue_id: &str) -> Result<Response, EngineError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("").to_string());
    Err(match status {
        StatusCode::NOT_FOUND => EngineError::VenueNotFound(venue_id.to_string()),
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => EngineError::Rejected(message),
        _ => EngineError::Status {
            status: status.as_u16(),
            message,
        },
    })
}

impl BookingEngine for HttpBookingEngine {
    fn get_venue(&self, venue_id: &str) -> BoxFuture<'_, Venue, EngineError> {
        let venue_id = venue_id.to_string();
        Box::pin(async move {
            let response = self
                .client
                .get(self.url(&format!("venues/{}", venue_id)))
                .send()
                .await
                .map_err(transport_error)?;
            let response = check_status(response, &venue_id).await?;
            response
                .json::<Venue>()
                .await
                .map_err(|e| EngineError::Decode(e.to_string()))
        })
    }

    fn fetch_availability(
        &self,
        venue_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BoxFuture<'_, Value, EngineError> {
        let venue_id = venue_id.to_string();
        Box::pin(async move {
            debug!("Fetching availability for {} from {} to {}", venue_id, from, to);
            let response = self
                .client
                .get(self.url(&format!("venues/{}/availability", venue_id)))
                .query(&[("from", from.to_string()), ("to", to.to_string())])
                .send()
                .await
                .map_err(transport_error)?;
            let response = check_status(response, &venue_id).await?;
            response
                .json::<Value>()
                .await
                .map_err(|e| EngineError::Decode(e.to_string()))
        })
    }

    fn create_booking(
        &self,
        request: BookingRequest,
    ) -> BoxFuture<'_, BookingConfirmation, EngineError> {
        Box::pin(async move {
            info!(
                "Creating booking for {} {} {} at venue {}",
                request.target.service_id,
                request.target.date,
                request.target.start_time,
                request.venue_id
            );
            let response = self
                .client
                .post(self.url("bookings"))
                .header(IDEMPOTENCY_HEADER, request.idempotency_key.as_str())
                .json(&request)
                .send()
                .await
                .map_err(transport_error)?;
            let response = check_status(response, &request.venue_id).await?;
            response
                .json::<BookingConfirmation>()
                .await
                .map_err(|e| EngineError::Decode(e.to_string()))
        })
    }
}

/// In-memory booking engine.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    /// Mock booking engine for tests.
    ///
    /// Availability is stored as raw engine entries so tests exercise the
    /// same ingest path as production. A successful booking flips the
    /// matching entry to `isAvailable: false`; a repeated idempotency key
    /// returns the original confirmation.
    #[derive(Default)]
    pub struct MockBookingEngine {
        venues: Mutex<HashMap<String, Venue>>,
        availability: Mutex<HashMap<String, Vec<Value>>>,
        raw_documents: Mutex<HashMap<String, Value>>,
        bookings: Mutex<Vec<BookingRequest>>,
        failure: Mutex<Option<EngineError>>,
    }

    fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    impl MockBookingEngine {
        /// Create a new mock booking engine.
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_venue(&self, venue: Venue) {
            lock(&self.venues).insert(venue.id.clone(), venue);
        }

        /// Adds raw availability entries (engine JSON objects) for a venue.
        pub fn add_availability(&self, venue_id: &str, entries: Vec<Value>) {
            lock(&self.availability)
                .entry(venue_id.to_string())
                .or_default()
                .extend(entries);
        }

        /// Replaces the availability response for a venue verbatim.
        pub fn set_raw_document(&self, venue_id: &str, document: Value) {
            lock(&self.raw_documents).insert(venue_id.to_string(), document);
        }

        /// Every call fails with `error` until cleared with `None`.
        pub fn fail_with(&self, error: Option<EngineError>) {
            *lock(&self.failure) = error;
        }

        pub fn bookings(&self) -> Vec<BookingRequest> {
            lock(&self.bookings).clone()
        }

        fn check_failure(&self) -> Result<(), EngineError> {
            match lock(&self.failure).clone() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }

        fn ensure_venue(&self, venue_id: &str) -> Result<Venue, EngineError> {
            lock(&self.venues)
                .get(venue_id)
                .cloned()
                .ok_or_else(|| EngineError::VenueNotFound(venue_id.to_string()))
        }
    }

    fn entry_date(entry: &Value) -> Option<NaiveDate> {
        entry
            .get("startDate")
            .and_then(Value::as_str)
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
    }

    fn entry_matches(entry: &Value, request: &BookingRequest) -> bool {
        let target = &request.target;
        entry.get("serviceId").and_then(Value::as_str) == Some(target.service_id.as_str())
            && entry_date(entry) == Some(target.date)
            && entry.get("startTime").and_then(Value::as_str)
                == Some(target.start_time.to_string().as_str())
    }

    impl BookingEngine for MockBookingEngine {
        fn get_venue(&self, venue_id: &str) -> BoxFuture<'_, Venue, EngineError> {
            let venue_id = venue_id.to_string();
            Box::pin(async move {
                self.check_failure()?;
                self.ensure_venue(&venue_id)
            })
        }

        fn fetch_availability(
            &self,
            venue_id: &str,
            from: NaiveDate,
            to: NaiveDate,
        ) -> BoxFuture<'_, Value, EngineError> {
            let venue_id = venue_id.to_string();
            Box::pin(async move {
                self.check_failure()?;
                self.ensure_venue(&venue_id)?;
                if let Some(document) = lock(&self.raw_documents).get(&venue_id) {
                    return Ok(document.clone());
                }
                // Entries without a readable startDate are passed through so
                // ingest gets to reject them.
                let entries: Vec<Value> = lock(&self.availability)
                    .get(&venue_id)
                    .map(|entries| {
                        entries
                            .iter()
                            .filter(|entry| {
                                entry_date(entry).map_or(true, |date| from <= date && date <= to)
                            })
                            .cloned()
                            .collect()
                    })
                    .unwrap_or_default();
                Ok(serde_json::json!({ "data": entries }))
            })
        }

        fn create_booking(
            &self,
            request: BookingRequest,
        ) -> BoxFuture<'_, BookingConfirmation, EngineError> {
            Box::pin(async move {
                self.check_failure()?;
                self.ensure_venue(&request.venue_id)?;

                let mut bookings = lock(&self.bookings);
                if let Some(index) = bookings
                    .iter()
                    .position(|existing| existing.idempotency_key == request.idempotency_key)
                {
                    return Ok(BookingConfirmation {
                        booking_id: format!("mock-booking-{}", index + 1),
                        status: "pending".to_string(),
                        checkout_url: None,
                    });
                }
                let target = &request.target;
                if bookings.iter().any(|existing| {
                    existing.venue_id == request.venue_id
                        && existing.target.service_id == target.service_id
                        && existing.target.date == target.date
                        && existing.target.start_time == target.start_time
                }) {
                    return Err(EngineError::Rejected("slot already booked".to_string()));
                }

                if let Some(entries) = lock(&self.availability).get_mut(&request.venue_id) {
                    for entry in entries.iter_mut() {
                        if entry_matches(entry, &request) {
                            entry["isAvailable"] = Value::Bool(false);
                        }
                    }
                }

                let confirmation = BookingConfirmation {
                    booking_id: format!("mock-booking-{}", bookings.len() + 1),
                    status: "pending".to_string(),
                    checkout_url: None,
                };
                bookings.push(request);
                Ok(confirmation)
            })
        }
    }
}
