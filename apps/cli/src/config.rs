use anyhow::{anyhow, Context};
use chrono_tz::Tz;
use skincare_api_client::ClientConfig;
use skincare_core::constants::{DEFAULT_API_URL, DEFAULT_PAGE_SIZE};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub token_file: PathBuf,
    pub timezone: Tz,
    pub request_timeout: Duration,
    pub page_size: u32,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads `SKINCARE_*` variables, after loading a `.env` file if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = var("SKINCARE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token_file = var("SKINCARE_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_token_file);

        let timezone = match var("SKINCARE_TIMEZONE") {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|e| anyhow!("SKINCARE_TIMEZONE: unknown zone '{}': {}", name, e))?,
            None => chrono_tz::UTC,
        };

        let timeout_ms = match var("SKINCARE_REQUEST_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("SKINCARE_REQUEST_TIMEOUT_MS: invalid value '{}'", raw))?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let page_size = match var("SKINCARE_PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| {
                    anyhow!("SKINCARE_PAGE_SIZE: expected a positive number, got '{}'", raw)
                })?,
            None => DEFAULT_PAGE_SIZE,
        };

        let log_format = match var("SKINCARE_LOG_FORMAT") {
            Some(raw) if raw.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(raw) if raw.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(raw) => {
                return Err(anyhow!(
                    "SKINCARE_LOG_FORMAT: expected text or json, got '{}'",
                    raw
                ))
            }
            None => LogFormat::Text,
        };

        Ok(Self {
            api_url,
            token_file,
            timezone,
            request_timeout: Duration::from_millis(timeout_ms),
            page_size,
            log_format,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_url)
            .with_timeout(self.request_timeout)
            .with_device_tz(self.timezone)
    }
}

fn default_token_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".skincare")
        .join("tokens.json")
}
