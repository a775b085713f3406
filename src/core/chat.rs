//! Language model abstractions

use crate::core::tool::{ToolDeclaration, ToolInvocation};
use anyhow::Result;
use async_trait::async_trait;

/// One piece of a model reply, in the order the model produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyPart {
    Text(String),
    FunctionCall(ToolInvocation),
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends a single user turn with `tools` available and returns the reply.
    async fn send(&self, prompt: &str, tools: &[ToolDeclaration]) -> Result<Vec<ReplyPart>>;
}
