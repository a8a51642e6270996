//! OpenAI-compatible HTTP reasoning gateway
//!
//! Speaks `POST {base_url}/chat/completions` against OpenRouter or OpenAI.

use crate::config::{FileReasoningConfig, ReasoningProvider};
use async_trait::async_trait;
use planner_application::{ChatMessage, ChatRole, GatewayError, ReasoningGateway};
use planner_domain::{Model, parse_json_record};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const EXTRACTION_SYSTEM_PROMPT: &str = "You output ONLY valid minified JSON. No markdown.";

/// Errors raised while talking to the HTTP endpoint
#[derive(Debug, Error)]
pub enum HttpGatewayError {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("response contained no choices")]
    EmptyChoices,
}

impl From<reqwest::Error> for HttpGatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(e)
        }
    }
}

impl From<HttpGatewayError> for GatewayError {
    fn from(e: HttpGatewayError) -> Self {
        match e {
            HttpGatewayError::Timeout => GatewayError::Timeout,
            HttpGatewayError::Transport(e) => GatewayError::ConnectionError(e.to_string()),
            e @ HttpGatewayError::Status { .. } => GatewayError::RequestFailed(e.to_string()),
            e @ (HttpGatewayError::Decode(_) | HttpGatewayError::EmptyChoices) => {
                GatewayError::InvalidResponse(e.to_string())
            }
        }
    }
}

/// Connection settings resolved from `[reasoning]`
#[derive(Debug, Clone)]
pub struct HttpGatewaySettings {
    pub provider: ReasoningProvider,
    pub base_url: String,
    pub api_key: String,
    pub model: Model,
    pub chat_temperature: f32,
    pub extraction_temperature: f32,
    pub timeout: Duration,
    pub referer: Option<String>,
    pub title: Option<String>,
}

impl HttpGatewaySettings {
    /// Resolve settings, reading the API key from the configured variable.
    pub fn from_config(config: &FileReasoningConfig) -> Result<Self, GatewayError> {
        let key_env = config.api_key_env_name();
        let api_key = std::env::var(key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GatewayError::Configuration(format!("{key_env} is not set")))?;
        Ok(Self::with_api_key(config, api_key))
    }

    pub fn with_api_key(config: &FileReasoningConfig, api_key: impl Into<String>) -> Self {
        Self {
            provider: config.provider,
            base_url: config.endpoint().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: config.parse_model(),
            chat_temperature: config.chat_temperature,
            extraction_temperature: config.extraction_temperature,
            timeout: config.timeout(),
            referer: config.referer.clone().filter(|v| !v.is_empty()),
            title: config.title.clone().filter(|v| !v.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: String,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Reasoning gateway backed by an OpenAI-compatible chat completions API
pub struct HttpReasoningGateway {
    client: Client,
    settings: HttpGatewaySettings,
}

impl HttpReasoningGateway {
    pub fn new(settings: HttpGatewaySettings) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;
        Ok(Self { client, settings })
    }

    pub fn from_config(config: &FileReasoningConfig) -> Result<Self, GatewayError> {
        Self::new(HttpGatewaySettings::from_config(config)?)
    }

    pub fn settings(&self) -> &HttpGatewaySettings {
        &self.settings
    }

    fn build_request<'a>(
        &self,
        system_prompt: &'a str,
        messages: &'a [ChatMessage],
        model_hint: Option<&Model>,
        temperature: f32,
    ) -> CompletionRequest<'a> {
        let model = model_hint.unwrap_or(&self.settings.model);
        let mut wire = Vec::with_capacity(messages.len() + 1);
        wire.push(WireMessage {
            role: "system",
            content: system_prompt,
        });
        wire.extend(messages.iter().map(|m| WireMessage {
            role: match m.role {
                ChatRole::User => "user",
                ChatRole::Assistant => "assistant",
            },
            content: &m.content,
        }));

        CompletionRequest {
            model: self.settings.provider.model_id(model),
            messages: wire,
            temperature,
        }
    }

    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, HttpGatewayError> {
        let url = format!("{}/chat/completions", self.settings.base_url);

        let mut builder = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(request);
        if self.settings.provider == ReasoningProvider::OpenRouter {
            if let Some(referer) = &self.settings.referer {
                builder = builder.header("HTTP-Referer", referer);
            }
            if let Some(title) = &self.settings.title {
                builder = builder.header("X-Title", title);
            }
        }

        debug!("POST {} (model {})", url, request.model);
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Reasoning service returned {}", status);
            return Err(HttpGatewayError::Status { status, body });
        }

        let body = response.text().await?;
        parse_completion(&body)
    }
}

fn parse_completion(body: &str) -> Result<String, HttpGatewayError> {
    let response: CompletionResponse =
        serde_json::from_str(body).map_err(|e| HttpGatewayError::Decode(e.to_string()))?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(HttpGatewayError::EmptyChoices)?;
    Ok(choice.message.content.unwrap_or_default())
}

fn extraction_payload(prompt: &str, context: &str) -> String {
    let context = serde_json::from_str::<Value>(context)
        .unwrap_or_else(|_| Value::String(context.to_string()));
    json!({"prompt": prompt, "context": context}).to_string()
}

#[async_trait]
impl ReasoningGateway for HttpReasoningGateway {
    async fn converse(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
        model_hint: Option<&Model>,
    ) -> Result<String, GatewayError> {
        let request = self.build_request(
            system_prompt,
            messages,
            model_hint,
            self.settings.chat_temperature,
        );
        Ok(self.complete(&request).await?)
    }

    async fn extract_structured(
        &self,
        prompt: &str,
        context: &str,
    ) -> Result<Option<Map<String, Value>>, GatewayError> {
        let payload = [ChatMessage::user(extraction_payload(prompt, context))];
        let request = self.build_request(
            EXTRACTION_SYSTEM_PROMPT,
            &payload,
            None,
            self.settings.extraction_temperature,
        );
        let raw = self.complete(&request).await?;

        let record = parse_json_record(&raw);
        if record.is_none() {
            debug!("Extraction reply was not a JSON object ({} bytes)", raw.len());
        }
        Ok(record)
    }
}
