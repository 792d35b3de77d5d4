// --- File: crates/venuegrid_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The application-level error returned by HTTP handlers.
///
/// Crate-specific errors convert into this through `From` impls in their own
/// crates, which decide the variant and therefore the status code.
#[derive(Error, Debug)]
pub enum VenueGridError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// The request conflicts with the current state (e.g., the slot is taken)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// A feature that is switched off in configuration
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for VenueGridError {
    fn status_code(&self) -> u16 {
        match self {
            VenueGridError::ConfigError(_) => 500,
            VenueGridError::ValidationError(_) => 400,
            VenueGridError::ExternalServiceError { .. } => 502,
            VenueGridError::ConflictError(_) => 409,
            VenueGridError::NotFoundError(_) => 404,
            VenueGridError::TimeoutError(_) => 504,
            VenueGridError::ServiceUnavailable(_) => 503,
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> VenueGridError {
    VenueGridError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> VenueGridError {
    VenueGridError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> VenueGridError {
    VenueGridError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> VenueGridError {
    VenueGridError::ConflictError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> VenueGridError {
    VenueGridError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn service_unavailable<T: fmt::Display>(message: T) -> VenueGridError {
    VenueGridError::ServiceUnavailable(message.to_string())
}
