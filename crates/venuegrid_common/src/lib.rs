// --- File: crates/venuegrid_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod services; // Booking engine abstraction

pub use error::{
    config_error, conflict, external_service_error, not_found, service_unavailable,
    validation_error, HttpStatusCode, VenueGridError,
};

pub use http::{client::create_bearer_client, IntoHttpResponse};

pub use logging::{init, init_from_config, init_with_level, log_error, log_result};

pub use services::{
    BookingConfirmation, BookingEngine, BookingRequest, BoxFuture, EngineError, Venue,
    VenueService,
};
