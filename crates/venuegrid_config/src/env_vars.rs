//! Environment variable naming for VenueGrid configuration.
//!
//! Two patterns exist: layered overrides (`VENUEGRID__SCHEDULE__SLOT_MINUTES`)
//! and secrets injected for `"secret_from_env"` markers
//! (`BOOKING_ENGINE_API_KEY`).

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "VENUEGRID";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value replaced by an environment variable at load time
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Name of the variable that replaces a secret marker at `segments`
///
/// `["booking_engine", "api_key"]` becomes `BOOKING_ENGINE_API_KEY`.
pub fn secret_env_var(segments: &[String]) -> String {
    segments.join(SECRET_SEPARATOR).to_uppercase()
}
