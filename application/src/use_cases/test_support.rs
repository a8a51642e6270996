//! Scripted reasoning gateway shared by the use case tests.

use crate::ports::event_sink::PlanEventSink;
use crate::ports::reasoning_gateway::{ChatMessage, GatewayError, ReasoningGateway};
use async_trait::async_trait;
use planner_domain::{Model, PlanEvent};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub(crate) enum DesignerReply {
    Record(Value),
    Absent,
    Fail,
}

pub(crate) enum AggregatorReply {
    /// Echo the current document with `project.summary` set
    Echo,
    Record(Value),
    Absent,
    Fail,
}

/// Gateway whose answers depend only on the worker name and round.
///
/// Worker replies are `"{name} says round {k}"`; extraction turns each reply
/// into `{"notes": [reply]}` unless a per-worker update is scripted.
pub(crate) struct StubGateway {
    designer: DesignerReply,
    aggregator: AggregatorReply,
    plan: Option<Value>,
    latency_ms: HashMap<String, u64>,
    failures: Vec<(String, usize)>,
    extraction_failures: Vec<String>,
    updates: HashMap<String, Value>,
    pub(crate) converse_calls: AtomicUsize,
    pub(crate) hints: Mutex<Vec<Option<Model>>>,
    pub(crate) log: Mutex<Vec<String>>,
}

impl StubGateway {
    pub(crate) fn new() -> Self {
        Self {
            designer: DesignerReply::Absent,
            aggregator: AggregatorReply::Echo,
            plan: None,
            latency_ms: HashMap::new(),
            failures: Vec::new(),
            extraction_failures: Vec::new(),
            updates: HashMap::new(),
            converse_calls: AtomicUsize::new(0),
            hints: Mutex::new(Vec::new()),
            log: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_designer(mut self, reply: DesignerReply) -> Self {
        self.designer = reply;
        self
    }

    pub(crate) fn with_aggregator(mut self, reply: AggregatorReply) -> Self {
        self.aggregator = reply;
        self
    }

    pub(crate) fn with_plan(mut self, plan: Value) -> Self {
        self.plan = Some(plan);
        self
    }

    pub(crate) fn with_latency(mut self, worker: &str, ms: u64) -> Self {
        self.latency_ms.insert(worker.to_string(), ms);
        self
    }

    pub(crate) fn failing(mut self, worker: &str, round: usize) -> Self {
        self.failures.push((worker.to_string(), round));
        self
    }

    pub(crate) fn failing_extraction(mut self, worker: &str) -> Self {
        self.extraction_failures.push(worker.to_string());
        self
    }

    pub(crate) fn with_update(mut self, worker: &str, update: Value) -> Self {
        self.updates.insert(worker.to_string(), update);
        self
    }

    pub(crate) fn log_entries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

fn worker_name(system_prompt: &str) -> String {
    system_prompt
        .strip_prefix("You are ")
        .and_then(|rest| rest.split_once(" - "))
        .map(|(name, _)| name.to_string())
        .unwrap_or_default()
}

fn round_number(messages: &[ChatMessage]) -> usize {
    messages
        .first()
        .and_then(|m| m.content.strip_prefix("Round "))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn object(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

#[async_trait]
impl ReasoningGateway for StubGateway {
    async fn converse(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
        model_hint: Option<&Model>,
    ) -> Result<String, GatewayError> {
        self.converse_calls.fetch_add(1, Ordering::SeqCst);
        self.hints.lock().unwrap().push(model_hint.cloned());
        let name = worker_name(system_prompt);
        let round = round_number(messages);
        self.log.lock().unwrap().push(format!("start {} {}", name, round));

        if let Some(ms) = self.latency_ms.get(&name) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        if self.failures.iter().any(|(w, r)| *w == name && *r == round) {
            return Err(GatewayError::RequestFailed(format!("{} unavailable", name)));
        }

        self.log.lock().unwrap().push(format!("finish {} {}", name, round));
        Ok(format!("{} says round {}", name, round))
    }

    async fn extract_structured(
        &self,
        _prompt: &str,
        context: &str,
    ) -> Result<Option<Map<String, Value>>, GatewayError> {
        let context: Value = serde_json::from_str(context).unwrap_or(Value::Null);

        if let Some(agent) = context.get("agent").and_then(Value::as_str) {
            if self.extraction_failures.iter().any(|w| w == agent) {
                return Err(GatewayError::Timeout);
            }
            if let Some(update) = self.updates.get(agent) {
                return Ok(object(update.clone()));
            }
            let note = context.get("note").cloned().unwrap_or(Value::Null);
            return Ok(object(json!({ "notes": [note] })));
        }

        if context.get("rounds_hint").is_some() {
            return match &self.designer {
                DesignerReply::Record(value) => Ok(object(value.clone())),
                DesignerReply::Absent => Ok(None),
                DesignerReply::Fail => Err(GatewayError::ConnectionError("refused".to_string())),
            };
        }

        if let Some(current) = context.get("current") {
            return match &self.aggregator {
                AggregatorReply::Echo => {
                    let mut current = current.clone();
                    current["project"]["summary"] = json!("Aggregated summary");
                    Ok(object(current))
                }
                AggregatorReply::Record(value) => Ok(object(value.clone())),
                AggregatorReply::Absent => Ok(None),
                AggregatorReply::Fail => Err(GatewayError::Timeout),
            };
        }

        if context.get("brief_summary").is_some() {
            return Ok(self.plan.clone().and_then(object));
        }

        Ok(None)
    }
}

/// Sink recording every event it receives
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) events: Mutex<Vec<PlanEvent>>,
}

impl RecordingSink {
    pub(crate) fn types(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| match e {
                PlanEvent::Contribution(c) => format!("contribution:{}:{}", c.worker_id, c.round),
                PlanEvent::RoundComplete { round } => format!("round_complete:{}", round),
                other => other.type_name().to_string(),
            })
            .collect()
    }
}

impl PlanEventSink for RecordingSink {
    fn emit(&self, event: &PlanEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
