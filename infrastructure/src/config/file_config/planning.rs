//! Planning configuration from TOML (`[planning]` section)

use planner_application::{PlanningConfig, WorkerFailurePolicy};
use planner_domain::{ConfigIssue, ConfigIssueCode, RoundCount};
use serde::{Deserialize, Serialize};

/// Raw planning configuration from TOML
///
/// ```toml
/// [planning]
/// rounds = 3
/// history_window = 4
/// on_worker_failure = "skip"
/// execution_plan = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePlanningConfig {
    /// Round count used when the request has no override (2-4).
    pub rounds: Option<u8>,
    /// Number of recent contributions each worker sees.
    pub history_window: usize,
    /// `abort` or `skip`.
    pub on_worker_failure: WorkerFailurePolicy,
    /// Draft an execution plan after the session.
    pub execution_plan: bool,
}

impl Default for FilePlanningConfig {
    fn default() -> Self {
        Self {
            rounds: None,
            history_window: 4,
            on_worker_failure: WorkerFailurePolicy::Abort,
            execution_plan: true,
        }
    }
}

impl FilePlanningConfig {
    /// Parse the configured round count, reporting an out-of-range value.
    pub fn parse_rounds(&self) -> (Option<RoundCount>, Option<ConfigIssue>) {
        match self.rounds.map(RoundCount::new) {
            None => (None, None),
            Some(Ok(rounds)) => (Some(rounds), None),
            Some(Err(_)) => (
                None,
                Some(ConfigIssue::error(
                    ConfigIssueCode::RoundsOutOfRange,
                    format!(
                        "planning.rounds must be between {} and {}, got {}",
                        RoundCount::MIN,
                        RoundCount::MAX,
                        self.rounds.unwrap_or_default()
                    ),
                )),
            ),
        }
    }

    pub fn to_planning_config(&self, honor_model_hints: bool) -> PlanningConfig {
        PlanningConfig::default()
            .with_history_window(self.history_window)
            .with_failure_policy(self.on_worker_failure)
            .with_model_hints(honor_model_hints)
            .with_default_rounds(self.parse_rounds().0)
    }
}
