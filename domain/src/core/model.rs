//! Model value object representing a reasoning model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reasoning models a panel worker may prefer (Value Object)
///
/// Identifiers follow the OpenRouter `vendor/model` convention. Loose family
/// names such as `"Claude"` or `"DeepSeek"` (which panel designers tend to
/// produce) resolve to the canonical model of that family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Anthropic
    ClaudeSonnet35,
    // OpenAI
    Gpt4oMini,
    Gpt4o,
    // Google
    Gemini15Pro,
    // DeepSeek
    DeepseekR1,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::ClaudeSonnet35 => "anthropic/claude-3.5-sonnet",
            Model::Gpt4oMini => "openai/gpt-4o-mini",
            Model::Gpt4o => "openai/gpt-4o",
            Model::Gemini15Pro => "google/gemini-1.5-pro",
            Model::DeepseekR1 => "deepseek/deepseek-r1",
            Model::Custom(s) => s,
        }
    }

    /// Model identifier without the `vendor/` prefix.
    ///
    /// Useful for providers (e.g. OpenAI) that do not accept routed ids.
    pub fn bare_name(&self) -> &str {
        let id = self.as_str();
        id.split_once('/').map(|(_, name)| name).unwrap_or(id)
    }

    /// Check if this is a Claude model
    pub fn is_claude(&self) -> bool {
        matches!(self, Model::ClaudeSonnet35)
    }

    /// Check if this is a GPT model
    pub fn is_gpt(&self) -> bool {
        matches!(self, Model::Gpt4oMini | Model::Gpt4o)
    }

    /// Check if this is a Gemini model
    pub fn is_gemini(&self) -> bool {
        matches!(self, Model::Gemini15Pro)
    }
}

impl Default for Model {
    /// Returns the default model (GPT-4o-mini)
    fn default() -> Self {
        Model::Gpt4oMini
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.to_ascii_lowercase().as_str() {
            "anthropic/claude-3.5-sonnet" | "claude" | "claude-3.5-sonnet" => Model::ClaudeSonnet35,
            "openai/gpt-4o-mini" | "gpt-4o-mini" | "gpt" => Model::Gpt4oMini,
            "openai/gpt-4o" | "gpt-4o" => Model::Gpt4o,
            "google/gemini-1.5-pro" | "gemini" | "gemini-1.5-pro" => Model::Gemini15Pro,
            "deepseek/deepseek-r1" | "deepseek" | "deepseek-r1" => Model::DeepseekR1,
            _ => Model::Custom(trimmed.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse();
        Ok(model)
    }
}
