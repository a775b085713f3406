pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::Config;
use anyhow::Result;
use tracing::debug;

/// Answers `query` with the providers named in `config`.
pub async fn run_query(config: &Config, query: &str) -> Result<Vec<String>> {
    debug!("Loaded config: {config:#?}");

    let providers = &config.app.providers;
    let rates = providers::exchange_rates_api::ExchangeRatesApiProvider::new(
        providers.exchange_rates_url(),
        &config.credentials.exchange_rate_api_key,
    )?;
    let model = providers::gemini::GeminiProvider::new(
        providers.gemini_url(),
        &providers.gemini_model(),
        &config.credentials.google_api_key,
    )?;

    crate::core::assistant::answer(&model, &rates, query).await
}
