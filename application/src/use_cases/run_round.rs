//! Run Round use case
//!
//! Executes one discussion round: every panel worker is called concurrently,
//! then results are merged into the cumulative document in panel order.
//!
//! # Flow
//!
//! 1. Build each worker's prompt from the objective, brief summary, its
//!    focus list and the most recent contributions
//! 2. Fan out: one task per worker running `converse` then `extract_structured`
//! 3. Fan in: wait for every task (the earliest failure in panel order
//!    aborts the rest)
//! 4. In panel order: merge the update, append the contribution, emit an event
//! 5. Emit `round_complete`

use super::run_planning::PlanningError;
use crate::config::{PlanningConfig, WorkerFailurePolicy};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::event_sink::PlanEventSink;
use crate::ports::reasoning_gateway::{ChatMessage, GatewayError, ReasoningGateway};
use planner_domain::{
    Contribution, DocumentUpdate, PanelSpec, PlanEvent, PromptTemplate, RoundState,
    WorkerDescriptor, truncate,
};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What one worker produced in a round
struct WorkerReply {
    content: String,
    update: Option<Map<String, Value>>,
}

/// Executes single rounds of a planning session
pub struct RoundExecutor<G: ReasoningGateway + 'static> {
    gateway: Arc<G>,
    config: PlanningConfig,
}

impl<G: ReasoningGateway + 'static> RoundExecutor<G> {
    pub fn new(gateway: Arc<G>, config: PlanningConfig) -> Self {
        Self { gateway, config }
    }

    /// Run `round` (1-based) against `state` and return the new contributions
    /// in panel order.
    ///
    /// `state` must have an active round; merges happen only after every
    /// worker call has completed.
    #[allow(clippy::too_many_arguments)]
    pub async fn run_round(
        &self,
        panel: &PanelSpec,
        brief_summary: &str,
        round: usize,
        state: &mut RoundState,
        sink: &dyn PlanEventSink,
        logger: &dyn ConversationLogger,
        cancellation: &CancellationToken,
    ) -> Result<Vec<Contribution>, PlanningError> {
        let workers = panel.workers();
        info!(
            "Round {} of {}: {} workers",
            round,
            state.max_rounds(),
            workers.len()
        );

        let recent = state.history().recent(self.config.history_window).to_vec();
        let mut join_set = JoinSet::new();

        for (index, worker) in workers.iter().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            let system = PromptTemplate::worker_system(worker);
            let prompt = PromptTemplate::worker_prompt(
                round,
                state.max_rounds(),
                panel.shared_objective(),
                brief_summary,
                worker,
                &recent,
            );
            let name = worker.name.clone();
            let brief_summary = brief_summary.to_string();
            let hint = worker
                .model_hint
                .clone()
                .filter(|_| self.config.honor_model_hints);

            join_set.spawn(async move {
                let reply =
                    Self::ask_worker(&gateway, &system, &prompt, &name, &brief_summary, hint).await;
                (index, reply)
            });
        }

        let mut slots: Vec<Option<Result<WorkerReply, GatewayError>>> =
            (0..workers.len()).map(|_| None).collect();

        loop {
            let next = tokio::select! {
                biased;
                _ = cancellation.cancelled() => {
                    join_set.abort_all();
                    info!("Round {} cancelled", round);
                    return Err(PlanningError::Cancelled);
                }
                next = join_set.join_next() => next,
            };

            match next {
                None => break,
                Some(Ok((index, reply))) => {
                    if let Err(e) = &reply {
                        warn!("Worker {} failed in round {}: {}", workers[index].id, round, e);
                    }
                    slots[index] = Some(reply);
                }
                Some(Err(e)) => warn!("Worker task join error: {}", e),
            }

            // Abort on the earliest failure in panel order, once every
            // worker ahead of it has answered.
            if self.config.failure_policy == WorkerFailurePolicy::Abort
                && let Some(first) = slots.iter().position(|s| !matches!(s, Some(Ok(_))))
                && let Some(Err(source)) = slots[first].take()
            {
                join_set.abort_all();
                return Err(PlanningError::WorkerCallFailure {
                    worker: workers[first].id.clone(),
                    round,
                    source,
                });
            }
        }

        // A task that ended without a reply (panicked) counts as a failed call
        let mut results = Vec::with_capacity(workers.len());
        for (worker, slot) in workers.iter().zip(slots) {
            let result = slot.unwrap_or_else(|| {
                Err(GatewayError::Other("worker task ended without a reply".to_string()))
            });
            match result {
                Err(source) if self.config.failure_policy == WorkerFailurePolicy::Abort => {
                    return Err(PlanningError::WorkerCallFailure {
                        worker: worker.id.clone(),
                        round,
                        source,
                    });
                }
                result => results.push(result),
            }
        }

        // Skip policy: a round with no surviving worker still aborts
        if !results.iter().any(Result::is_ok) {
            if let Some((worker, Err(source))) = workers.iter().zip(results).next() {
                return Err(PlanningError::WorkerCallFailure {
                    worker: worker.id.clone(),
                    round,
                    source,
                });
            }
            return Ok(Vec::new());
        }

        let mut contributions = Vec::with_capacity(workers.len());
        for (worker, result) in workers.iter().zip(results) {
            let reply = match result {
                Ok(reply) => reply,
                Err(e) => {
                    logger.log(ConversationEvent::new(
                        "worker_skipped",
                        json!({"worker": worker.id, "round": round, "error": e.to_string()}),
                    ));
                    continue;
                }
            };

            let update = Self::accept_update(worker, round, reply.update, logger);
            let contribution =
                Contribution::new(worker.id.clone(), worker.name.clone(), reply.content, round);

            logger.log(ConversationEvent::new(
                "worker_reply",
                json!({
                    "worker": worker.id,
                    "name": worker.name,
                    "round": round,
                    "content": contribution.content,
                    "update": update.fields(),
                }),
            ));

            if state.apply(contribution.clone(), &update) {
                sink.emit(&PlanEvent::Contribution(contribution.clone()));
                contributions.push(contribution);
            } else {
                warn!(
                    "Contribution of {} for round {} rejected by session state",
                    worker.id, round
                );
            }
        }

        sink.emit(&PlanEvent::RoundComplete { round });
        logger.log(ConversationEvent::new(
            "round_complete",
            json!({"round": round, "contributions": contributions.len()}),
        ));
        info!("Round {} complete ({} contributions)", round, contributions.len());

        Ok(contributions)
    }

    /// One worker turn: reasoning call, then extraction of its reply
    async fn ask_worker(
        gateway: &G,
        system: &str,
        prompt: &str,
        name: &str,
        brief_summary: &str,
        model_hint: Option<planner_domain::Model>,
    ) -> Result<WorkerReply, GatewayError> {
        let content = gateway
            .converse(system, &[ChatMessage::user(prompt)], model_hint.as_ref())
            .await?;
        debug!("{} replied: {}", name, truncate(&content, 80));

        let context = PromptTemplate::extraction_context(name, &content, brief_summary);
        let update = gateway
            .extract_structured(&PromptTemplate::extraction_prompt(), &context)
            .await?;

        Ok(WorkerReply { content, update })
    }

    /// Turn an extraction result into a document update, logging misses.
    fn accept_update(
        worker: &WorkerDescriptor,
        round: usize,
        update: Option<Map<String, Value>>,
        logger: &dyn ConversationLogger,
    ) -> DocumentUpdate {
        let Some(fields) = update else {
            debug!("Extraction miss for {} in round {}", worker.id, round);
            logger.log(ConversationEvent::new(
                "extraction_miss",
                json!({"worker": worker.id, "round": round}),
            ));
            return DocumentUpdate::empty();
        };

        let update = DocumentUpdate::from_map(fields);
        for deviation in update.deviations() {
            debug!("Update from {} reshapes {}", worker.id, deviation);
        }
        update
    }
}
