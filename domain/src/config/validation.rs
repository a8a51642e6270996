//! Configuration validation issues.
//!
//! Loaded configuration is checked before a session starts. Each problem is
//! reported as a [`ConfigIssue`] with a severity; the caller decides whether
//! to abort.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `planning.rounds` outside the supported range.
    RoundsOutOfRange,
    /// `reasoning.timeout_seconds` is zero.
    ZeroTimeout,
    /// `planning.history_window` is zero, so workers see no prior replies.
    ZeroHistoryWindow,
    /// `reasoning.model` is empty.
    EmptyModel,
    /// A sampling temperature outside `0.0..=2.0`.
    TemperatureOutOfRange,
    /// The API key environment variable is not set.
    MissingApiKey,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", label, self.message)
    }
}
