// --- File: crates/venuegrid_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by RUST_LOG.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file here.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

// --- Booking Engine Config ---
// Holds the engine endpoint. The api key is normally "secret_from_env"
// and injected from BOOKING_ENGINE_API_KEY.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingEngineConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// --- Schedule Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScheduleConfig {
    /// Width of one display slot in minutes.
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    /// "first-match" or "reject".
    #[serde(default = "default_overlap_policy")]
    pub overlap_policy: String,
    /// IANA zone used when the engine does not report one for a venue.
    #[serde(default = "default_time_zone")]
    pub default_time_zone: String,
    /// Longest range accepted by the day summary endpoint.
    #[serde(default = "default_max_range_days")]
    pub max_range_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            slot_minutes: default_slot_minutes(),
            overlap_policy: default_overlap_policy(),
            default_time_zone: default_time_zone(),
            max_range_days: default_max_range_days(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_booking: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub booking_engine: Option<BookingEngineConfig>,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_slot_minutes() -> u32 {
    60
}

fn default_overlap_policy() -> String {
    "first-match".to_string()
}

fn default_time_zone() -> String {
    "Europe/Zurich".to_string()
}

fn default_max_range_days() -> u32 {
    31
}
