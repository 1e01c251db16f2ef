//! Shared HTTP client construction for adapters

use crate::platform::error::{PlatformError, PlatformResult};
use std::time::Duration;

const USER_AGENT: &str = concat!("scopewatch/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout; the orchestrator applies its own outer bound on the
/// whole fetch, this one just keeps a single request from stalling pagination
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the reqwest client every adapter shares the configuration of
pub fn build_client(platform: &str) -> PlatformResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .cookie_store(true)
        .build()
        .map_err(|e| PlatformError::Fetch {
            platform: platform.to_string(),
            message: format!("HTTP client construction failed: {}", e),
        })
}

/// Map a reqwest error for `platform` into the adapter error taxonomy
pub fn fetch_error(platform: &str, error: reqwest::Error) -> PlatformError {
    PlatformError::Fetch {
        platform: platform.to_string(),
        message: error.to_string(),
    }
}

/// Map an unexpected HTTP status into the adapter error taxonomy
pub fn status_error(platform: &str, status: reqwest::StatusCode, url: &str) -> PlatformError {
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        PlatformError::Auth {
            platform: platform.to_string(),
            message: format!("{} from {}", status, url),
        }
    } else {
        PlatformError::Fetch {
            platform: platform.to_string(),
            message: format!("{} from {}", status, url),
        }
    }
}
