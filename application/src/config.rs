//! Application-level configuration.
//!
//! This module provides configuration types that control how the planning
//! use cases behave, such as the history window and worker failure policy.

use planner_domain::RoundCount;
use serde::{Deserialize, Serialize};

/// What a round does when one worker's reasoning call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerFailurePolicy {
    /// Abort the round and the session (default).
    #[default]
    Abort,
    /// Drop that worker's contribution for the round. A round in which every
    /// worker fails still aborts.
    Skip,
}

impl std::str::FromStr for WorkerFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(format!(
                "unknown worker failure policy '{other}' (expected abort or skip)"
            )),
        }
    }
}

/// Planning behavior configuration.
#[derive(Debug, Clone)]
pub struct PlanningConfig {
    /// Number of most recent contributions shown to each worker.
    pub history_window: usize,
    /// Reaction to a failed worker call.
    pub failure_policy: WorkerFailurePolicy,
    /// Pass each worker's model hint to the gateway.
    pub honor_model_hints: bool,
    /// Round count used when a request carries no override.
    pub default_rounds: Option<RoundCount>,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            history_window: 4,
            failure_policy: WorkerFailurePolicy::Abort,
            honor_model_hints: false,
            default_rounds: None,
        }
    }
}

impl PlanningConfig {
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub fn with_failure_policy(mut self, policy: WorkerFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_model_hints(mut self, honor: bool) -> Self {
        self.honor_model_hints = honor;
        self
    }

    pub fn with_default_rounds(mut self, rounds: Option<RoundCount>) -> Self {
        self.default_rounds = rounds;
        self
    }
}
