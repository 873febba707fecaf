use chrono_tz::Tz;
use skincare_core::constants::DEFAULT_API_URL;
use skincare_core::utils::time_utils::DEFAULT_DEVICE_TZ;
use std::time::Duration;

use crate::error::{ApiClientError, Result};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings shared by [`crate::AuthApiClient`] and
/// [`crate::SkincareApiClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API root including the version prefix, e.g. `http://localhost:8000/api/v1`.
    pub base_url: String,
    pub timeout: Duration,
    /// Zone that rule times are converted into.
    pub device_tz: Tz,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            device_tz: DEFAULT_DEVICE_TZ,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_device_tz(mut self, device_tz: Tz) -> Self {
        self.device_tz = device_tz;
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ApiClientError::Config(format!("Failed to build HTTP client: {}", e)))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = ClientConfig::new("http://localhost:8000/api/v1/");
        assert_eq!(config.url("products"), "http://localhost:8000/api/v1/products");
        assert_eq!(config.url("/users/me"), "http://localhost:8000/api/v1/users/me");
    }
}
