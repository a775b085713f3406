pub mod exchange_rates_api;
pub mod gemini;

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("fxcall/", env!("CARGO_PKG_VERSION"));
const HTTP_TIMEOUT_SECS: u64 = 60;

/// Shared client settings for every outbound service.
pub(crate) fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .context("Failed to create HTTP client")
}
