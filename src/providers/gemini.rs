//! Google Gemini `generateContent` client with function calling.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::core::chat::{ChatModel, ReplyPart};
use crate::core::tool::{ToolDeclaration, ToolInvocation};
use crate::providers::http_client;

pub struct GeminiProvider {
    base_url: String,
    model: String,
    api_key: String,
    client: Client,
}

impl GeminiProvider {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Result<Self> {
        Ok(GeminiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.trim_start_matches("models/").to_string(),
            api_key: api_key.to_string(),
            client: http_client()?,
        })
    }

    fn endpoint(&self) -> Result<Url> {
        let url = Url::parse_with_params(
            &format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ),
            &[("key", self.api_key.as_str())],
        )?;
        Ok(url)
    }

    fn build_request<'a>(prompt: &'a str, tools: &'a [ToolDeclaration]) -> GenerateRequest<'a> {
        let tools = if tools.is_empty() {
            None
        } else {
            Some(vec![GeminiTool {
                function_declarations: tools,
            }])
        };

        GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            tools,
        }
    }

    fn into_parts(response: GenerateResponse) -> Result<Vec<ReplyPart>> {
        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            match response.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => anyhow!("Prompt was blocked by the model: {}", reason),
                None => anyhow!("No candidates in model response"),
            }
        })?;

        let finish_reason = candidate.finish_reason;
        let parts: Vec<ReplyPart> = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| match part {
                ResponsePart {
                    function_call: Some(call),
                    ..
                } => Some(ReplyPart::FunctionCall(ToolInvocation {
                    name: call.name,
                    args: call.args,
                })),
                ResponsePart {
                    text: Some(text), ..
                } if !text.trim().is_empty() => Some(ReplyPart::Text(text)),
                _ => None,
            })
            .collect();

        if parts.is_empty() {
            return Err(anyhow!(
                "Model returned no content (finish reason: {})",
                finish_reason.as_deref().unwrap_or("unknown")
            ));
        }
        Ok(parts)
    }
}

#[async_trait]
impl ChatModel for GeminiProvider {
    #[instrument(name = "GeminiGenerate", skip_all)]
    async fn send(&self, prompt: &str, tools: &[ToolDeclaration]) -> Result<Vec<ReplyPart>> {
        let request = Self::build_request(prompt, tools);
        debug!(model = %self.model, tools = tools.len(), "Sending prompt to model");

        let response = self
            .client
            .post(self.endpoint()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                anyhow!(
                    "Request error: {} for model: {}",
                    e.without_url(),
                    self.model
                )
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<ErrorResponse>(&body) {
                return Err(anyhow!(
                    "Model request failed with HTTP {}: {}",
                    status,
                    error.error.message
                ));
            }
            return Err(anyhow!("Model request failed with HTTP {}: {}", status, body));
        }

        let data: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| anyhow!("Failed to parse model response: {}", e))?;
        debug!(response = ?data, "Received model response");

        Self::into_parts(data)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool<'a>>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTool<'a> {
    function_declarations: &'a [ToolDeclaration],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    function_call: Option<FunctionCall>,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
