//! Gemini provider — native `generateContent` client over reqwest.
//!
//! Talks to the Generative Language REST API directly so the request body,
//! including `thinkingConfig`, is fully under our control.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::llm::provider::{
    ChatMessage, CompletionRequest, CompletionResponse, FinishReason, LlmProvider, Role,
};

const PROVIDER: &str = "gemini";

// ── Wire format ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    response_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

// ── Provider ────────────────────────────────────────────────────────────

/// Gemini `generateContent` provider.
pub struct GeminiProvider {
    api_key: SecretString,
    model: String,
    api_base: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(
        api_key: SecretString,
        model: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            api_key,
            model: model.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = build_request(request);

        tracing::debug!(model = %self.model, "Sending generateContent request");

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let retry_after = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            let body = resp.text().await.unwrap_or_default();
            return Err(status_error(status, &self.model, retry_after, body));
        }

        let raw = resp.text().await.map_err(|e| LlmError::RequestFailed {
            provider: PROVIDER.to_string(),
            reason: format!("Failed to read response body: {}", e),
        })?;

        parse_response(&raw)
    }
}

// ── Mapping helpers ─────────────────────────────────────────────────────

fn text_content(role: Option<&'static str>, text: String) -> RequestContent {
    RequestContent {
        role,
        parts: vec![RequestPart { text }],
    }
}

fn build_request(request: CompletionRequest) -> GenerateContentRequest {
    let mut system_parts: Vec<String> = Vec::new();
    let mut contents = Vec::with_capacity(request.messages.len());

    for ChatMessage { role, content } in request.messages {
        match role {
            Role::System => system_parts.push(content),
            Role::User => contents.push(text_content(Some("user"), content)),
            Role::Assistant => contents.push(text_content(Some("model"), content)),
        }
    }

    let system_instruction =
        (!system_parts.is_empty()).then(|| text_content(None, system_parts.join("\n\n")));

    let generation_config = GenerationConfig {
        temperature: request.temperature,
        max_output_tokens: request.max_tokens,
        thinking_config: request.thinking_budget.map(|thinking_budget| ThinkingConfig {
            thinking_budget,
        }),
    };
    let has_generation_config = generation_config.temperature.is_some()
        || generation_config.max_output_tokens.is_some()
        || generation_config.thinking_config.is_some();

    GenerateContentRequest {
        contents,
        system_instruction,
        generation_config: has_generation_config.then_some(generation_config),
    }
}

fn status_error(
    status: StatusCode,
    model: &str,
    retry_after: Option<Duration>,
    body: String,
) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::AuthFailed {
            provider: PROVIDER.to_string(),
        },
        StatusCode::NOT_FOUND => LlmError::ModelNotAvailable {
            provider: PROVIDER.to_string(),
            model: model.to_string(),
        },
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited {
            provider: PROVIDER.to_string(),
            retry_after,
        },
        _ => LlmError::RequestFailed {
            provider: PROVIDER.to_string(),
            reason: format!("HTTP {}: {}", status, body),
        },
    }
}

fn parse_response(raw: &str) -> Result<CompletionResponse, LlmError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(raw).map_err(|e| LlmError::InvalidResponse {
            provider: PROVIDER.to_string(),
            reason: e.to_string(),
        })?;

    let first = parsed.candidates.into_iter().next();

    let finish_reason = first
        .as_ref()
        .and_then(|c| c.finish_reason.as_deref())
        .map(finish_reason_from)
        .unwrap_or(FinishReason::Unknown);

    // Thought summaries are not part of the answer.
    let content = first
        .and_then(|c| c.content)
        .map(|c| {
            c.parts
                .into_iter()
                .filter(|p| !p.thought.unwrap_or(false))
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    let (input_tokens, output_tokens) = parsed
        .usage_metadata
        .map(|u| (u.prompt_token_count, u.candidates_token_count))
        .unwrap_or((0, 0));

    Ok(CompletionResponse {
        content,
        input_tokens,
        output_tokens,
        finish_reason,
        response_id: parsed.response_id,
    })
}

fn finish_reason_from(raw: &str) -> FinishReason {
    match raw {
        "STOP" => FinishReason::Stop,
        "MAX_TOKENS" => FinishReason::Length,
        "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII" => {
            FinishReason::ContentFilter
        }
        _ => FinishReason::Unknown,
    }
}
