// --- File: crates/venuegrid_config/src/lib.rs ---
use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File, FileFormat};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub mod env_vars;
pub mod models;
pub use models::*;

const OVERLAP_POLICIES: [&str; 2] = ["first-match", "reject"];

/// Loads the layered configuration.
///
/// Sources, later ones winning:
/// 1. `config/default.{toml,yml,json}`
/// 2. `config/{RUN_ENV}.*` (RUN_ENV defaults to "debug")
/// 3. Environment variables, e.g. `VENUEGRID__SERVER__PORT=9000`
///
/// `"secret_from_env"` markers are then resolved and the result validated.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env_vars::get_config_prefix();

    let config_dir = config_dir();
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);
    debug!(
        "Loading configuration from {} (RUN_ENV={})",
        config_dir.display(),
        run_env
    );

    let raw_config: AppConfig = Config::builder()
        .add_source(File::from(default_path.as_path()).required(false))
        .add_source(File::from(env_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    let config = apply_env_overrides_from_marker(raw_config)?;
    validate(&config)?;
    Ok(config)
}

/// Loads configuration from a TOML document only, without files or
/// environment layering. Markers are still resolved.
pub fn load_config_from_str(toml: &str) -> Result<AppConfig, ConfigError> {
    let raw_config: AppConfig = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()?;

    let config = apply_env_overrides_from_marker(raw_config)?;
    validate(&config)?;
    Ok(config)
}

/// `CONFIG_DIR` if set, otherwise `config/` at the workspace root.
fn config_dir() -> PathBuf {
    if let Ok(dir) = env::var("CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2) // crates/venuegrid_config -> workspace root
        .map(|root| root.join("config"))
        .unwrap_or_else(|| PathBuf::from("config"))
}

/// Checks the values serde cannot check on its own.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let schedule = &config.schedule;
    if schedule.slot_minutes == 0 || schedule.slot_minutes > 1440 {
        return Err(ConfigError::Message(format!(
            "schedule.slot_minutes must be between 1 and 1440, got {}",
            schedule.slot_minutes
        )));
    }
    if !OVERLAP_POLICIES.contains(&schedule.overlap_policy.as_str()) {
        return Err(ConfigError::Message(format!(
            "schedule.overlap_policy must be one of {:?}, got '{}'",
            OVERLAP_POLICIES, schedule.overlap_policy
        )));
    }
    if schedule.default_time_zone.parse::<Tz>().is_err() {
        return Err(ConfigError::Message(format!(
            "schedule.default_time_zone '{}' is not a known IANA time zone",
            schedule.default_time_zone
        )));
    }
    if schedule.max_range_days == 0 {
        return Err(ConfigError::Message(
            "schedule.max_range_days must be at least 1".to_string(),
        ));
    }
    if config.use_booking && config.booking_engine.is_none() {
        return Err(ConfigError::Message(
            "use_booking is set but [booking_engine] is missing".to_string(),
        ));
    }
    Ok(())
}

/// Recursively replaces all "secret_from_env" string values with environment
/// variable values. An unset variable turns the value into `null`: optional
/// settings become `None`, required ones fail deserialization.
fn inject_env_secrets(value: &mut Value) {
    fn walk(path: &mut Vec<String>, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    path.push(k.to_string());
                    walk(path, v);
                    path.pop();
                }
            }
            Value::String(s) if s == env_vars::SECRET_MARKER => {
                let env_key = env_vars::secret_env_var(path);
                match env::var(&env_key) {
                    Ok(env_val) => *obj = Value::String(env_val),
                    Err(_) => {
                        // never let the marker itself through as a value
                        warn!("Env var {} not found for secret_from_env", env_key);
                        *obj = Value::Null;
                    }
                }
            }
            _ => {}
        }
    }

    walk(&mut Vec::new(), value);
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    inject_env_secrets(&mut json);
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to apply env secrets: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment, once.
///
/// The file is `DOTENV_OVERRIDE` if set, else the first command line argument
/// when it looks like `.env*`, else `.env`. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
