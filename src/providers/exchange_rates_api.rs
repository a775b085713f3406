use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::currency::CurrencyRateProvider;
use crate::providers::http_client;

/// Rates from exchangeratesapi.io, quoted against the service's reference
/// currency and crossed locally.
pub struct ExchangeRatesApiProvider {
    base_url: String,
    access_key: String,
    client: Client,
}

impl ExchangeRatesApiProvider {
    pub fn new(base_url: &str, access_key: &str) -> Result<Self> {
        Ok(ExchangeRatesApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key: access_key.to_string(),
            client: http_client()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    success: Option<bool>,
    base: Option<String>,
    rates: Option<HashMap<String, f64>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<serde_json::Value>,
    #[serde(alias = "type")]
    kind: Option<String>,
    info: Option<String>,
    message: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let detail = self
            .info
            .as_deref()
            .or(self.message.as_deref())
            .or(self.kind.as_deref())
            .unwrap_or("unknown error");
        match &self.code {
            Some(code) => write!(f, "{detail} (code {code})"),
            None => write!(f, "{detail}"),
        }
    }
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRatesApiProvider {
    #[instrument(name = "ExchangeRatesFetch", skip(self))]
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        let symbols = format!("{from},{to}");
        let url = Url::parse_with_params(
            &format!("{}/v1/latest", self.base_url),
            &[("access_key", self.access_key.as_str()), ("symbols", symbols.as_str())],
        )?;
        debug!("Requesting rates for {} from {}", symbols, self.base_url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                anyhow!(
                    "Request error: {} for currency pair: {}",
                    e.without_url(),
                    symbols
                )
            })?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency pair: {}",
                response.status(),
                symbols
            ));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", symbols, e))?;

        if data.success == Some(false) || data.error.is_some() {
            let reason = data
                .error
                .map_or_else(|| "unknown error".to_string(), |e| e.to_string());
            return Err(anyhow!("API error: {} for currency pair: {}", reason, symbols));
        }

        let rates = data
            .rates
            .ok_or_else(|| anyhow!("No rates in response for currency pair: {}", symbols))?;
        debug!(reference = ?data.base, ?rates, "Received rates");

        let lookup = |code: &str| {
            rates
                .get(code)
                .copied()
                .ok_or_else(|| anyhow!("No rate found for currency: {}", code))
        };
        let base_rate = lookup(from)?;
        let target_rate = lookup(to)?;

        Ok(target_rate / base_rate)
    }
}
