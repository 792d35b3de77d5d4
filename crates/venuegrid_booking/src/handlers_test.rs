#[cfg(test)]
mod tests {
    use crate::routes::routes_with_engine;
    use crate::service::mock::MockBookingEngine;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use venuegrid_common::services::{BookingEngine, Venue, VenueService};
    use venuegrid_config::{load_config_from_str, AppConfig};

    const CONFIG: &str = r#"
        use_booking = true

        [server]
        host = "127.0.0.1"
        port = 0

        [booking_engine]
        base_url = "http://engine.invalid"

        [schedule]
        max_range_days = 7
    "#;

    fn config(use_booking: bool) -> Arc<AppConfig> {
        let mut config = load_config_from_str(CONFIG).unwrap();
        config.use_booking = use_booking;
        Arc::new(config)
    }

    fn engine() -> Arc<MockBookingEngine> {
        let engine = MockBookingEngine::new();
        engine.add_venue(Venue {
            id: "club-7".to_string(),
            name: "Tennis Club Seefeld".to_string(),
            time_zone: Some("Europe/Zurich".to_string()),
            services: vec![VenueService {
                id: "court-1".to_string(),
                name: "Court 1".to_string(),
                sport: None,
            }],
        });
        engine.add_availability(
            "club-7",
            vec![
                json!({ "serviceId": "court-1", "startDate": "2025-05-05", "startTime": "09:00", "endTime": "11:00", "isAvailable": true }),
                json!({ "serviceId": "court-1", "startDate": "2025-05-05", "startTime": "11:00", "endTime": "12:00", "isAvailable": false }),
            ],
        );
        Arc::new(engine)
    }

    fn app(engine: Arc<MockBookingEngine>) -> Router {
        let engine: Arc<dyn BookingEngine> = engine;
        routes_with_engine(config(true), Some(engine))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_schedule_handler() {
        let (status, body) = send(app(engine()), get("/venues/club-7/schedule?date=2025-05-05")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["venueId"], "club-7");
        assert_eq!(body["date"], "2025-05-05");
        assert_eq!(body["hasAvailability"], true);
        assert_eq!(body["slots"].as_array().unwrap().len(), 3);

        let cells = body["services"][0]["cells"].as_array().unwrap();
        let statuses: Vec<&str> = cells.iter().map(|c| c["status"].as_str().unwrap()).collect();
        assert_eq!(
            statuses,
            vec!["available", "unavailable-covered", "unavailable-blocked"]
        );
        assert_eq!(cells[0]["booking"]["endTime"], "11:00");
        assert!(cells[1].get("booking").is_none());
    }

    #[tokio::test]
    async fn test_get_schedule_rejects_bad_date() {
        let (status, body) = send(app(engine()), get("/venues/club-7/schedule?date=tomorrow")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 400);
    }

    #[tokio::test]
    async fn test_get_schedule_unknown_venue() {
        let (status, _) = send(app(engine()), get("/venues/club-9/schedule?date=2025-05-05")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_days_handler() {
        let (status, body) =
            send(app(engine()), get("/venues/club-7/days?from=2025-05-04&to=2025-05-06")).await;

        assert_eq!(status, StatusCode::OK);
        let days = body["days"].as_array().unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[1]["date"], "2025-05-05");
        assert_eq!(days[1]["hasAvailability"], true);
        assert_eq!(days[0]["hasAvailability"], false);
    }

    #[tokio::test]
    async fn test_get_days_range_too_long() {
        let (status, body) =
            send(app(engine()), get("/venues/club-7/days?from=2025-05-01&to=2025-05-31")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"].as_str().unwrap().contains("maximum of 7"));
    }

    #[tokio::test]
    async fn test_book_slot_handler() {
        let engine = engine();
        let (status, body) = send(
            app(engine.clone()),
            post_json(
                "/venues/club-7/bookings",
                json!({ "serviceId": "court-1", "date": "2025-05-05", "startTime": "09:00" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["bookingId"], "mock-booking-1");
        assert_eq!(body["booking"]["durationMinutes"], 120);
        assert_eq!(engine.bookings().len(), 1);
    }

    #[tokio::test]
    async fn test_book_covered_slot_conflicts() {
        let engine = engine();
        let (status, body) = send(
            app(engine.clone()),
            post_json(
                "/venues/club-7/bookings",
                json!({ "serviceId": "court-1", "date": "2025-05-05", "startTime": "10:00" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("unavailable-covered"));
        assert!(engine.bookings().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_booking_answers_503() {
        let engine: Arc<dyn BookingEngine> = engine();
        let app = routes_with_engine(config(false), Some(engine));

        let (status, body) = send(app, get("/venues/club-7/schedule?date=2025-05-05")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], 503);
    }

    #[tokio::test]
    async fn test_missing_engine_answers_503() {
        let app = routes_with_engine(config(true), None);
        let (status, _) = send(
            app,
            post_json(
                "/venues/club-7/bookings",
                json!({ "serviceId": "court-1", "date": "2025-05-05", "startTime": "09:00" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
