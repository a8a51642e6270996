//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod output;
mod planning;
mod reasoning;

pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use planning::FilePlanningConfig;
pub use reasoning::{FileReasoningConfig, ReasoningProvider};

use planner_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Reasoning service endpoint, model and sampling
    pub reasoning: FileReasoningConfig,
    /// Round count, history window and failure policy
    pub planning: FilePlanningConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Reads the API key variable from the process environment.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.validate_with(|name| std::env::var(name).ok())
    }

    /// Validate with an explicit environment lookup.
    pub fn validate_with(&self, env: impl Fn(&str) -> Option<String>) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.reasoning.validate());
        issues.extend(self.planning.parse_rounds().1);

        if self.planning.history_window == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroHistoryWindow,
                "planning.history_window is 0, workers will not see earlier replies",
            ));
        }

        let key_env = self.reasoning.api_key_env_name();
        if env(key_env).is_none_or(|key| key.trim().is_empty()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingApiKey,
                format!(
                    "{key_env} is not set (required by the {} provider)",
                    self.reasoning.provider
                ),
            ));
        }

        issues
    }
}
