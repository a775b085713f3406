//! One round trip: prompt the model, run any tool calls it makes.

use crate::core::chat::{ChatModel, ReplyPart};
use crate::core::convert::convert;
use crate::core::currency::CurrencyRateProvider;
use crate::core::tool::{ConvertCurrencyCall, ToolInvocation, convert_currency_declaration};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Wraps the user's request in instructions describing the conversion tool.
pub fn build_prompt(user_input: &str) -> String {
    format!(
        "I can help you convert amounts between different currencies using the 'convert_currency' tool.

To use this tool, please follow one of these formats:
- '<amount> <base_currency> to <target_currency>' (e.g., '100 USD to INR' to convert 100 USD to INR).
- '<base_currency> to <target_currency>' (e.g., 'USD to INR' to convert 1 USD to INR by default).

Make sure to use valid three-letter currency codes (e.g., USD for US Dollar, EUR for Euro, INR for Indian Rupee).

{}
",
        user_input.trim()
    )
}

/// Sends `query` to `model` and returns the lines to show the user: model
/// text verbatim, and the result of each tool call in reply order.
pub async fn answer(
    model: &dyn ChatModel,
    rates: &(dyn CurrencyRateProvider + Send + Sync),
    query: &str,
) -> Result<Vec<String>> {
    let tools = [convert_currency_declaration()];
    let parts = model
        .send(&build_prompt(query), &tools)
        .await
        .context("Failed to get a reply from the model")?;
    debug!(parts = parts.len(), "Model replied");

    let mut lines = Vec::with_capacity(parts.len());
    for part in parts {
        match part {
            ReplyPart::Text(text) => lines.push(text.trim_end().to_string()),
            ReplyPart::FunctionCall(invocation) => {
                lines.push(dispatch(rates, &invocation).await);
            }
        }
    }
    Ok(lines)
}

/// Validates a model function call and runs it.
pub async fn dispatch(
    rates: &(dyn CurrencyRateProvider + Send + Sync),
    invocation: &ToolInvocation,
) -> String {
    match ConvertCurrencyCall::try_from(invocation) {
        Ok(call) => {
            info!(?call, "Running tool call");
            convert(
                rates,
                call.amount,
                &call.base_currency,
                &call.target_currency,
            )
            .await
        }
        Err(e) => {
            warn!(?invocation, error = %e, "Rejected tool call");
            format!("Could not run tool call: {e}")
        }
    }
}
