//! Currency rate abstractions

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Returns how many units of `to` one unit of `from` buys.
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64>;
}

/// Outcome of a rate lookup as seen by the conversion tool.
///
/// Every failure (transport, status, payload, unknown code) collapses into
/// `Unavailable`; the cause is only logged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateQuote {
    Rate(f64),
    Unavailable,
}

impl RateQuote {
    pub fn rate(self) -> Option<f64> {
        match self {
            RateQuote::Rate(v) => Some(v),
            RateQuote::Unavailable => None,
        }
    }
}

/// Resolves the cross rate from `base` to `target` through `provider`.
pub async fn resolve(
    provider: &(dyn CurrencyRateProvider + Send + Sync),
    base: &str,
    target: &str,
) -> RateQuote {
    match provider.get_rate(base, target).await {
        Ok(rate) if rate.is_finite() && rate > 0.0 => {
            debug!(base, target, rate, "Resolved cross rate");
            RateQuote::Rate(rate)
        }
        Ok(rate) => {
            warn!(base, target, rate, "Discarding non-positive or non-finite rate");
            RateQuote::Unavailable
        }
        Err(e) => {
            warn!(base, target, error = %e, "Error fetching exchange rate");
            RateQuote::Unavailable
        }
    }
}
