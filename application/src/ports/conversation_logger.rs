//! Transcript port
//!
//! A planning session reports what happened to a [`ConversationLogger`]:
//! the panel it settled on, every worker reply with its extracted update,
//! extraction misses, skipped workers, the aggregation outcome and failures.
//! Diagnostics stay on `tracing`; this port is the replayable record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};

/// One transcript entry
pub struct ConversationEvent {
    /// Snake-case kind, e.g. `panel_designed` or `worker_reply`
    pub event_type: &'static str,
    pub timestamp: DateTime<Utc>,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Flatten into a single transcript record.
    ///
    /// Object payloads gain `type` and `timestamp` (RFC 3339, milliseconds);
    /// any other payload is nested under `data`.
    pub fn into_record(self) -> Value {
        let timestamp = self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);

        match self.payload {
            Value::Object(mut map) => {
                map.insert("type".to_string(), Value::from(self.event_type));
                map.insert("timestamp".to_string(), Value::String(timestamp));
                Value::Object(map)
            }
            other => json!({
                "type": self.event_type,
                "timestamp": timestamp,
                "data": other,
            }),
        }
    }
}

/// Sink for transcript entries.
///
/// Called from the orchestration loop between rounds, never concurrently
/// with a merge. Write failures must not reach the session.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every entry
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
