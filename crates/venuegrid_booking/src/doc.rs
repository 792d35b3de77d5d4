// File: crates/venuegrid_booking/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{BookSlotRequest, DaysQuery, ScheduleQuery};
use venuegrid_common::services::{BookingConfirmation, Venue, VenueService};

#[utoipa::path(
    get,
    path = "/venues/{venue_id}/schedule",
    params(
        ("venue_id" = String, Path, description = "Venue identifier"),
        ScheduleQuery
    ),
    responses(
        (status = 200, description = "Schedule grid of one day", content_type = "application/json",
         example = json!({
             "venueId": "club-7",
             "venueName": "Tennis Club Seefeld",
             "timeZone": "Europe/Zurich",
             "hasAvailability": true,
             "date": "2025-05-05",
             "slots": [
                 { "startTime": "09:00", "endTime": "10:00", "durationMinutes": 60 },
                 { "startTime": "10:00", "endTime": "11:00", "durationMinutes": 60 }
             ],
             "services": [{
                 "serviceId": "court-1",
                 "cells": [
                     { "startTime": "09:00", "endTime": "10:00", "durationMinutes": 60,
                       "status": "available",
                       "booking": { "serviceId": "court-1", "date": "2025-05-05",
                                    "startTime": "09:00", "endTime": "11:00",
                                    "durationMinutes": 120, "bookingType": "single",
                                    "price": 6000, "currency": "CHF", "capacityLeft": null } },
                     { "startTime": "10:00", "endTime": "11:00", "durationMinutes": 60,
                       "status": "unavailable-covered" }
                 ]
             }]
         })
        ),
        (status = 400, description = "Invalid date format"),
        (status = 404, description = "Unknown venue"),
        (status = 502, description = "Unable to load availability"),
        (status = 503, description = "Booking service disabled")
    ),
    tag = "venues"
)]
fn doc_get_schedule_handler() {}

#[utoipa::path(
    get,
    path = "/venues/{venue_id}/days",
    params(
        ("venue_id" = String, Path, description = "Venue identifier"),
        DaysQuery
    ),
    responses(
        (status = 200, description = "Availability per day for the date picker", content_type = "application/json",
         example = json!({
             "venueId": "club-7",
             "from": "2025-05-05",
             "to": "2025-05-06",
             "days": [
                 { "date": "2025-05-05", "slotCount": 12, "bookableSlots": 4, "hasAvailability": true },
                 { "date": "2025-05-06", "slotCount": 0, "bookableSlots": 0, "hasAvailability": false }
             ]
         })
        ),
        (status = 400, description = "Invalid or too long date range"),
        (status = 404, description = "Unknown venue"),
        (status = 502, description = "Unable to load availability"),
        (status = 503, description = "Booking service disabled")
    ),
    tag = "venues"
)]
fn doc_get_days_handler() {}

#[utoipa::path(
    post,
    path = "/venues/{venue_id}/bookings",
    params(
        ("venue_id" = String, Path, description = "Venue identifier")
    ),
    request_body(content = BookSlotRequest, example = json!({
        "serviceId": "court-1",
        "date": "2025-05-05",
        "startTime": "09:00",
        "customerReference": "member-1042",
        "idempotencyKey": "0b6c1f9e-7a4d-4c55-9a3e-2f1d8b7c6e50"
    })),
    responses(
        (status = 201, description = "Booking initiated", content_type = "application/json",
         example = json!({
             "bookingId": "bk_5f2c",
             "status": "pending",
             "checkoutUrl": "https://engine.example.com/checkout/bk_5f2c",
             "booking": { "serviceId": "court-1", "date": "2025-05-05",
                          "startTime": "09:00", "endTime": "11:00",
                          "durationMinutes": 120, "bookingType": "single",
                          "price": 6000, "currency": "CHF", "capacityLeft": null }
         })
        ),
        (status = 400, description = "Malformed date or time"),
        (status = 409, description = "Slot is covered, blocked, empty or already taken",
         example = json!({
             "error": {
                 "message": "Conflict: Slot court-1 at 10:00 is not bookable (unavailable-covered)",
                 "code": 409
             }
         })
        ),
        (status = 502, description = "Booking engine failure"),
        (status = 503, description = "Booking service disabled")
    ),
    tag = "venues"
)]
fn doc_book_slot_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_get_schedule_handler, doc_get_days_handler, doc_book_slot_handler),
    components(schemas(BookSlotRequest, BookingConfirmation, Venue, VenueService)),
    tags(
        (name = "venues", description = "Venue schedules and slot booking")
    ),
    servers(
        (url = "/api", description = "VenueGrid API server")
    )
)]
pub struct BookingApiDoc;
