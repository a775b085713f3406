//! The `convert_currency` tool body.

use crate::core::currency::{CurrencyRateProvider, RateQuote, resolve};

/// Converts `amount` of `base` into `target`.
///
/// Always yields a user-facing sentence: rate lookup failures become the
/// invalid-codes message instead of an error.
pub async fn convert(
    provider: &(dyn CurrencyRateProvider + Send + Sync),
    amount: f64,
    base: &str,
    target: &str,
) -> String {
    render(resolve(provider, base, target).await, amount, base, target)
}

/// Formats the outcome of a lookup. No arithmetic happens for `Unavailable`.
pub fn render(quote: RateQuote, amount: f64, base: &str, target: &str) -> String {
    match quote.rate() {
        Some(rate) => {
            let converted = amount * rate;
            format!("The converted amount is: {converted:.2} {target}")
        }
        None => format!("Invalid currency codes: {base} or {target}. Please check your input."),
    }
}
