//! Reasoning Gateway port
//!
//! Defines the interface for communicating with the reasoning service that
//! backs panel design, worker turns, extraction and aggregation.

use async_trait::async_trait;
use planner_domain::Model;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur during reasoning gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message of a conversation sent to the reasoning service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Gateway to the reasoning service
///
/// This port defines how the application layer talks to the reasoning
/// service. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ReasoningGateway: Send + Sync {
    /// Free-text conversation turn.
    ///
    /// `model_hint` is a preference; adapters may ignore it.
    async fn converse(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
        model_hint: Option<&Model>,
    ) -> Result<String, GatewayError>;

    /// Ask for a structured record.
    ///
    /// Returns `Ok(None)` when the service answered but the answer was not a
    /// JSON object. Transport failures are `Err`.
    async fn extract_structured(
        &self,
        prompt: &str,
        context: &str,
    ) -> Result<Option<Map<String, Value>>, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_serialization() {
        let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hi");
        assert_eq!(ChatMessage::assistant("ok").role, ChatRole::Assistant);
    }

    #[test]
    fn test_gateway_error_display() {
        assert_eq!(GatewayError::Timeout.to_string(), "Timeout");
        assert_eq!(
            GatewayError::RequestFailed("HTTP 500".to_string()).to_string(),
            "Request failed: HTTP 500"
        );
    }
}
