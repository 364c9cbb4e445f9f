use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Transport configuration.
///
/// The request timeout lives here because timeouts are the transport's
/// responsibility; nothing above the facades ever deals with one.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Reads `MOOT_API_URL` and `MOOT_API_TIMEOUT_SECS`, falling back to the
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let base_url = env::var("MOOT_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let request_timeout = env::var("MOOT_API_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        Self {
            base_url,
            request_timeout,
        }
    }
}
