//! Reasoning service configuration from TOML (`[reasoning]` section)

use planner_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible endpoints the HTTP gateway can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningProvider {
    #[default]
    OpenRouter,
    OpenAi,
}

impl ReasoningProvider {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenRouter => "https://openrouter.ai/api/v1",
            Self::OpenAi => "https://api.openai.com/v1",
        }
    }

    pub fn default_api_key_env(self) -> &'static str {
        match self {
            Self::OpenRouter => "OPENROUTER_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// OpenRouter accepts routed `vendor/model` ids, OpenAI only bare names.
    pub fn model_id(self, model: &Model) -> String {
        match self {
            Self::OpenRouter => model.as_str().to_string(),
            Self::OpenAi => model.bare_name().to_string(),
        }
    }
}

impl std::fmt::Display for ReasoningProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenRouter => write!(f, "openrouter"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

/// Raw reasoning configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReasoningConfig {
    pub provider: ReasoningProvider,
    /// Overrides the provider's default endpoint.
    pub base_url: Option<String>,
    /// Environment variable holding the API key. Defaults by provider.
    pub api_key_env: Option<String>,
    /// Model used for every call unless a worker hint applies.
    pub model: String,
    pub timeout_seconds: u64,
    pub chat_temperature: f32,
    pub extraction_temperature: f32,
    /// Forward panel workers' model preferences to the service.
    pub honor_model_hints: bool,
    /// OpenRouter `HTTP-Referer` header.
    pub referer: Option<String>,
    /// OpenRouter `X-Title` header.
    pub title: Option<String>,
}

impl Default for FileReasoningConfig {
    fn default() -> Self {
        Self {
            provider: ReasoningProvider::OpenRouter,
            base_url: None,
            api_key_env: None,
            model: Model::default().to_string(),
            timeout_seconds: 60,
            chat_temperature: 0.4,
            extraction_temperature: 0.2,
            honor_model_hints: false,
            referer: None,
            title: Some("swarm-planner".to_string()),
        }
    }
}

impl FileReasoningConfig {
    pub fn endpoint(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }

    pub fn api_key_env_name(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| self.provider.default_api_key_env())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn parse_model(&self) -> Model {
        let Ok(model) = self.model.parse();
        model
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModel,
                "reasoning.model cannot be empty",
            ));
        }
        if self.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "reasoning.timeout_seconds cannot be 0",
            ));
        }
        for (field, value) in [
            ("chat_temperature", self.chat_temperature),
            ("extraction_temperature", self.extraction_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::TemperatureOutOfRange,
                    format!("reasoning.{field} must be within 0.0..=2.0, got {value}"),
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_defaults() {
        let config = FileReasoningConfig::default();
        assert_eq!(config.endpoint(), "https://openrouter.ai/api/v1");
        assert_eq!(config.api_key_env_name(), "OPENROUTER_API_KEY");
        assert_eq!(config.timeout(), Duration::from_secs(60));

        let config = FileReasoningConfig {
            provider: ReasoningProvider::OpenAi,
            ..Default::default()
        };
        assert_eq!(config.endpoint(), "https://api.openai.com/v1");
        assert_eq!(config.api_key_env_name(), "OPENAI_API_KEY");
    }

    #[test]
    fn test_explicit_overrides() {
        let toml_str = r#"
[reasoning]
provider = "openai"
base_url = "http://localhost:8000/v1"
api_key_env = "LOCAL_KEY"
model = "gpt-4o"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let reasoning = config.reasoning;
        assert_eq!(reasoning.provider, ReasoningProvider::OpenAi);
        assert_eq!(reasoning.endpoint(), "http://localhost:8000/v1");
        assert_eq!(reasoning.api_key_env_name(), "LOCAL_KEY");
        assert_eq!(reasoning.parse_model(), Model::Gpt4o);
    }

    #[test]
    fn test_model_id_per_provider() {
        let model = Model::ClaudeSonnet35;
        assert_eq!(
            ReasoningProvider::OpenRouter.model_id(&model),
            "anthropic/claude-3.5-sonnet"
        );
        assert_eq!(
            ReasoningProvider::OpenAi.model_id(&Model::Gpt4oMini),
            "gpt-4o-mini"
        );
    }

    #[test]
    fn test_validate_reports_each_problem() {
        let config = FileReasoningConfig {
            model: "  ".to_string(),
            timeout_seconds: 0,
            chat_temperature: 3.5,
            ..Default::default()
        };
        let codes: Vec<_> = config.validate().into_iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![
                ConfigIssueCode::EmptyModel,
                ConfigIssueCode::ZeroTimeout,
                ConfigIssueCode::TemperatureOutOfRange,
            ]
        );
    }
}
