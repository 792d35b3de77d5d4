// --- File: crates/venuegrid_common/src/http/client.rs ---
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Creates a JSON HTTP client whose requests carry `Authorization: Bearer`.
///
/// # Arguments
///
/// * `timeout_secs` - The timeout in seconds for the client
/// * `api_key` - The bearer token; a key that is not a valid header value
///   is left out
pub fn create_bearer_client(
    timeout_secs: u64,
    api_key: Option<&str>,
) -> Result<Client, ReqwestError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(key) = api_key {
        if let Ok(mut value) = HeaderValue::from_str(&format!("Bearer {}", key)) {
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
    }
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(5))
        .default_headers(headers)
        .build()
}
