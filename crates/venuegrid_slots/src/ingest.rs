// --- File: crates/venuegrid_slots/src/ingest.rs ---
//! Validation of booking-engine availability payloads.
//!
//! Engine responses differ between SDK versions: some carry local
//! `startDate`/`startTime` strings, others only RFC 3339 instants, and the
//! service id may be a string or a number. This module turns whatever arrived
//! into [`RawAvailabilityRecord`]s whose invariants the grid builder and the
//! resolver can rely on. Invalid records are dropped with a warning; only a
//! payload that is not a list at all is an error.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

use crate::error::SlotError;
use crate::models::{BookingType, RawAvailabilityRecord};
use crate::time::WallClock;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid timestamp '{0}', expected RFC 3339")]
    InvalidTimestamp(String),
    #[error("Invalid service id: {0}")]
    InvalidServiceId(String),
    #[error("Unknown booking type: {0}")]
    UnknownBookingType(String),
    #[error("Record crosses midnight ({start_date} to {end_date})")]
    CrossesMidnight {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    #[error(transparent)]
    Slot(#[from] SlotError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AvailabilityError {
    #[error("Unable to load availability: {0}")]
    Unreadable(String),
}

/// An availability record exactly as the engine sent it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPayload {
    pub service_id: Option<Value>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub booking_type: Option<String>,
    // Read leniently in `validate`: a value of the wrong type is dropped, not
    // the record.
    pub duration_minutes: Option<Value>,
    pub is_available: Option<Value>,
    pub price: Option<Value>,
    pub currency: Option<Value>,
    pub capacity_left: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AvailabilityPayload {
    /// Validates the payload into a record in the venue's local time.
    ///
    /// Local `startTime`/`endTime` strings take precedence over instants.
    /// A missing or unreadable `isAvailable` reads as unavailable.
    /// Instants are converted into `time_zone`. An end of `00:00` on the day
    /// after the start is read as `24:00` of the start day; any other change
    /// of date is rejected.
    pub fn validate(&self, time_zone: Tz) -> Result<RawAvailabilityRecord, RecordError> {
        let service_id = self.service_id()?;

        let (start_date, start_time, end_date, end_time) =
            match (&self.start_time, &self.end_time) {
                (Some(start_time), Some(end_time)) => {
                    let start_date = parse_date(
                        self.start_date
                            .as_deref()
                            .ok_or(RecordError::MissingField("startDate"))?,
                    )?;
                    let end_date = match self.end_date.as_deref() {
                        Some(raw) => parse_date(raw)?,
                        None => start_date,
                    };
                    (
                        start_date,
                        WallClock::parse(start_time)?,
                        end_date,
                        WallClock::parse(end_time)?,
                    )
                }
                (Some(_), None) => return Err(RecordError::MissingField("endTime")),
                (None, Some(_)) => return Err(RecordError::MissingField("startTime")),
                (None, None) => {
                    let starts_at = self
                        .starts_at
                        .as_deref()
                        .ok_or(RecordError::MissingField("startTime"))?;
                    let ends_at = self
                        .ends_at
                        .as_deref()
                        .ok_or(RecordError::MissingField("endTime"))?;
                    let (start_date, start_time) = localize(starts_at, time_zone)?;
                    let (end_date, end_time) = localize(ends_at, time_zone)?;
                    (start_date, start_time, end_date, end_time)
                }
            };

        let ends_at_midnight =
            end_time == WallClock::MIDNIGHT && start_date.succ_opt() == Some(end_date);
        let (end_date, end_time) = if ends_at_midnight {
            (start_date, WallClock::END_OF_DAY)
        } else {
            (end_date, end_time)
        };
        if end_date != start_date {
            return Err(RecordError::CrossesMidnight {
                start_date,
                end_date,
            });
        }

        let booking_type = match self.booking_type.as_deref() {
            None => BookingType::Single,
            Some(raw) if raw.eq_ignore_ascii_case("single") => BookingType::Single,
            Some(raw) if raw.eq_ignore_ascii_case("group") => BookingType::Group,
            Some(other) => return Err(RecordError::UnknownBookingType(other.to_string())),
        };

        let mut extra = self.extra.clone();
        let duration_minutes = lenient::<i64>("durationMinutes", &self.duration_minutes, &mut extra)
            .unwrap_or_else(|| {
                start_time
                    .minutes_until(end_time)
                    .map(i64::from)
                    .unwrap_or(0)
            });
        // absent or unreadable availability is never bookable
        let is_available =
            lenient::<bool>("isAvailable", &self.is_available, &mut extra).unwrap_or(false);
        let price = lenient::<i64>("price", &self.price, &mut extra);
        let currency = lenient::<String>("currency", &self.currency, &mut extra);
        let capacity_left = lenient::<u32>("capacityLeft", &self.capacity_left, &mut extra);

        Ok(RawAvailabilityRecord {
            service_id,
            start_date,
            end_date,
            start_time,
            end_time,
            duration_minutes,
            is_available,
            booking_type,
            price,
            currency,
            capacity_left,
            extra,
        })
    }

    fn service_id(&self) -> Result<String, RecordError> {
        match &self.service_id {
            None | Some(Value::Null) => Err(RecordError::MissingField("serviceId")),
            Some(Value::String(id)) if !id.trim().is_empty() => Ok(id.trim().to_string()),
            Some(Value::Number(id)) => Ok(id.to_string()),
            Some(other) => Err(RecordError::InvalidServiceId(other.to_string())),
        }
    }
}

/// Reads an optional pass-through field. A value of the wrong type becomes
/// `None` and is kept verbatim in `extra` under its wire name.
fn lenient<T: DeserializeOwned>(
    field: &str,
    raw: &Option<Value>,
    extra: &mut Map<String, Value>,
) -> Option<T> {
    let value = match raw {
        None | Some(Value::Null) => return None,
        Some(value) => value,
    };
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!("Ignoring unreadable {} {}: {}", field, value, err);
            extra.insert(field.to_string(), value.clone());
            None
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| RecordError::InvalidDate(raw.to_string()))
}

fn localize(raw: &str, time_zone: Tz) -> Result<(NaiveDate, WallClock), RecordError> {
    let local = DateTime::parse_from_rfc3339(raw)
        .map_err(|_| RecordError::InvalidTimestamp(raw.to_string()))?
        .with_timezone(&time_zone);
    Ok((local.date_naive(), WallClock::from_naive_time(local.time())))
}

/// Validates every payload, dropping the ones that fail with a warning.
pub fn ingest(payloads: &[AvailabilityPayload], time_zone: Tz) -> Vec<RawAvailabilityRecord> {
    payloads
        .iter()
        .enumerate()
        .filter_map(|(index, payload)| match payload.validate(time_zone) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("Skipping availability record #{}: {}", index, err);
                None
            }
        })
        .collect()
}

/// Reads a raw engine document.
///
/// Accepts a bare array or an object wrapping the array in `data`. Entries
/// that are not objects or fail validation are skipped; anything else is
/// [`AvailabilityError::Unreadable`].
pub fn ingest_json(
    document: Value,
    time_zone: Tz,
) -> Result<Vec<RawAvailabilityRecord>, AvailabilityError> {
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(AvailabilityError::Unreadable(
                    "expected a list of availability records".to_string(),
                ))
            }
        },
        other => {
            return Err(AvailabilityError::Unreadable(format!(
                "expected a list of availability records, got {}",
                json_kind(&other)
            )))
        }
    };

    let payloads: Vec<AvailabilityPayload> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(payload) => Some(payload),
            Err(err) => {
                warn!("Skipping unreadable availability entry #{}: {}", index, err);
                None
            }
        })
        .collect();

    Ok(ingest(&payloads, time_zone))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Groups records by their start date, keeping input order within a day.
pub fn group_by_day(
    records: Vec<RawAvailabilityRecord>,
) -> BTreeMap<NaiveDate, Vec<RawAvailabilityRecord>> {
    let mut days: BTreeMap<NaiveDate, Vec<RawAvailabilityRecord>> = BTreeMap::new();
    for record in records {
        days.entry(record.start_date).or_default().push(record);
    }
    days
}
