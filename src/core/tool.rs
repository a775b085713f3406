//! Tool declarations and validation of model-issued function calls.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

pub const CONVERT_CURRENCY: &str = "convert_currency";

/// Amount assumed when the request names no quantity ("USD to INR").
pub const DEFAULT_AMOUNT: f64 = 1.0;

/// A function the model may call, described with a JSON schema.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

pub fn convert_currency_declaration() -> ToolDeclaration {
    ToolDeclaration {
        name: CONVERT_CURRENCY.to_string(),
        description: "Converts the amount from base_currency to target_currency.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "amount": {
                    "type": "number",
                    "description": "Amount of base_currency to convert. Defaults to 1."
                },
                "base_currency": {
                    "type": "string",
                    "description": "Three-letter code of the currency to convert from, e.g. USD."
                },
                "target_currency": {
                    "type": "string",
                    "description": "Three-letter code of the currency to convert to, e.g. INR."
                }
            },
            "required": ["base_currency", "target_currency"]
        }),
    }
}

/// A function call as emitted by the model, arguments still untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ToolCallError {
    #[error("unknown tool '{0}'")]
    UnknownTool(String),
    #[error("missing argument '{0}'")]
    MissingArgument(&'static str),
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },
}

/// A validated `convert_currency` call.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertCurrencyCall {
    pub amount: f64,
    pub base_currency: String,
    pub target_currency: String,
}

impl TryFrom<&ToolInvocation> for ConvertCurrencyCall {
    type Error = ToolCallError;

    fn try_from(invocation: &ToolInvocation) -> Result<Self, Self::Error> {
        if invocation.name != CONVERT_CURRENCY {
            return Err(ToolCallError::UnknownTool(invocation.name.clone()));
        }

        let args = &invocation.args;
        Ok(ConvertCurrencyCall {
            amount: parse_amount(args.get("amount"))?,
            base_currency: required_str(args, "base_currency")?,
            target_currency: required_str(args, "target_currency")?,
        })
    }
}

fn parse_amount(value: Option<&Value>) -> Result<f64, ToolCallError> {
    let invalid = |reason: String| ToolCallError::InvalidArgument {
        name: "amount",
        reason,
    };

    let amount = match value {
        None | Some(Value::Null) => return Ok(DEFAULT_AMOUNT),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| invalid(format!("{n} is not representable as a float")))?,
        // Models occasionally quote numbers
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(format!("'{s}' is not a number ({e})")))?,
        Some(other) => return Err(invalid(format!("expected a number, got {other}"))),
    };

    if !amount.is_finite() {
        return Err(invalid(format!("{amount} is not finite")));
    }
    Ok(amount)
}

fn required_str(args: &Map<String, Value>, name: &'static str) -> Result<String, ToolCallError> {
    match args.get(name) {
        None | Some(Value::Null) => Err(ToolCallError::MissingArgument(name)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ToolCallError::MissingArgument(name)),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(other) => Err(ToolCallError::InvalidArgument {
            name,
            reason: format!("expected a string, got {other}"),
        }),
    }
}
