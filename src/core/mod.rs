//! Core business logic abstractions

pub mod assistant;
pub mod chat;
pub mod config;
pub mod convert;
pub mod currency;
pub mod log;
pub mod tool;

// Re-export main types for cleaner imports
pub use chat::{ChatModel, ReplyPart};
pub use currency::{CurrencyRateProvider, RateQuote};
pub use tool::{ConvertCurrencyCall, ToolCallError, ToolInvocation};
