//! Run Planning use case
//!
//! Orchestrates a full planning session:
//!
//! ```text
//! brief -> panel design -> round x N -> aggregation -> SessionResult
//! ```
//!
//! Batch callers use [`RunPlanningUseCase::plan`]; live observers use
//! [`RunPlanningUseCase::plan_stream`] with a [`PlanEventSink`]. Both
//! produce the same final state.

use super::design_panel::DesignPanelUseCase;
use super::run_round::RoundExecutor;
use crate::config::PlanningConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::document_renderer::DocumentRenderer;
use crate::ports::event_sink::{NoEvents, PlanEventSink};
use crate::ports::reasoning_gateway::{GatewayError, ReasoningGateway};
use planner_domain::{
    AggregationOutcome, CumulativeDocument, DomainError, PlanEvent, ProjectBrief, PromptTemplate,
    RoundCount, RoundState, SessionResult, WorkerId,
};
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Errors that end a planning session
#[derive(Error, Debug)]
pub enum PlanningError {
    #[error("Project brief is required: {0}")]
    InvalidBrief(String),

    #[error("Round count must be between {min} and {max}, got {got}")]
    InvalidRounds { got: u8, min: u8, max: u8 },

    #[error("Panel has no workers")]
    EmptyPanel,

    #[error("Invalid document update: {0}")]
    InvalidUpdate(String),

    #[error("Worker {worker} failed in round {round}: {source}")]
    WorkerCallFailure {
        worker: WorkerId,
        round: usize,
        #[source]
        source: GatewayError,
    },

    #[error("Planning session cancelled")]
    Cancelled,
}

impl PlanningError {
    /// Stable snake_case name used in error events
    pub fn kind(&self) -> &'static str {
        match self {
            PlanningError::InvalidBrief(_) => "invalid_brief",
            PlanningError::InvalidRounds { .. } => "invalid_rounds",
            PlanningError::EmptyPanel => "empty_panel",
            PlanningError::InvalidUpdate(_) => "invalid_update",
            PlanningError::WorkerCallFailure { .. } => "worker_call_failure",
            PlanningError::Cancelled => "cancelled",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, PlanningError::Cancelled)
    }
}

impl From<DomainError> for PlanningError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidBrief(reason) => PlanningError::InvalidBrief(reason),
            DomainError::InvalidRounds { got, min, max } => {
                PlanningError::InvalidRounds { got, min, max }
            }
            DomainError::EmptyPanel => PlanningError::EmptyPanel,
            DomainError::Cancelled => PlanningError::Cancelled,
            DomainError::InvalidUpdate(reason) => PlanningError::InvalidUpdate(reason),
        }
    }
}

/// Input for the RunPlanning use case
#[derive(Debug, Clone)]
pub struct PlanningInput {
    /// The project brief
    pub brief: ProjectBrief,
    /// Explicit round count; validated against 2..=4 when the session starts
    pub rounds: Option<u8>,
}

impl PlanningInput {
    pub fn new(brief: ProjectBrief) -> Self {
        Self {
            brief,
            rounds: None,
        }
    }

    /// Validate a raw JSON brief.
    pub fn from_value(brief: Value) -> Result<Self, PlanningError> {
        Ok(Self::new(ProjectBrief::new(brief)?))
    }

    pub fn with_rounds(mut self, rounds: Option<u8>) -> Self {
        self.rounds = rounds;
        self
    }
}

/// Use case for running a planning session
pub struct RunPlanningUseCase<G: ReasoningGateway + 'static> {
    gateway: Arc<G>,
    renderer: Arc<dyn DocumentRenderer>,
    config: PlanningConfig,
    logger: Arc<dyn ConversationLogger>,
    cancellation: CancellationToken,
}

impl<G: ReasoningGateway + 'static> RunPlanningUseCase<G> {
    pub fn new(gateway: Arc<G>, renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self {
            gateway,
            renderer,
            config: PlanningConfig::default(),
            logger: Arc::new(NoConversationLogger),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_config(mut self, config: PlanningConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Run a session and return only the terminal result
    pub async fn plan(&self, input: PlanningInput) -> Result<SessionResult, PlanningError> {
        self.plan_stream(input, &NoEvents).await
    }

    /// Run a session, reporting every lifecycle event to `sink`
    ///
    /// On failure the sink receives an `error` event before this returns.
    pub async fn plan_stream(
        &self,
        input: PlanningInput,
        sink: &dyn PlanEventSink,
    ) -> Result<SessionResult, PlanningError> {
        match self.run(input, sink).await {
            Ok(result) => {
                sink.emit(&PlanEvent::Final(Box::new(result.clone())));
                Ok(result)
            }
            Err(e) => {
                warn!("Planning session failed: {}", e);
                self.logger.log(ConversationEvent::new(
                    "session_failed",
                    json!({"kind": e.kind(), "message": e.to_string()}),
                ));
                sink.emit(&PlanEvent::Error {
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        input: PlanningInput,
        sink: &dyn PlanEventSink,
    ) -> Result<SessionResult, PlanningError> {
        let rounds_override = match input.rounds {
            Some(rounds) => Some(RoundCount::new(rounds)?),
            None => self.config.default_rounds,
        };
        self.check_cancelled()?;

        // INIT: panel and session state
        let designer = DesignPanelUseCase::new(Arc::clone(&self.gateway));
        let panel = tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => return Err(PlanningError::Cancelled),
            panel = designer.execute(&input.brief, rounds_override) => panel,
        };
        self.logger.log(ConversationEvent::new(
            "panel_designed",
            json!({
                "rounds": panel.rounds().get(),
                "origin": panel.origin(),
                "workers": panel.workers(),
            }),
        ));
        sink.emit(&PlanEvent::PanelReady(panel.clone()));

        let brief_summary = input.brief.summary();
        let mut state = RoundState::new(panel.rounds());
        let executor = RoundExecutor::new(Arc::clone(&self.gateway), self.config.clone());

        // ROUND_ACTIVE x N
        while let Some(round) = state.begin_round() {
            self.check_cancelled()?;
            executor
                .run_round(
                    &panel,
                    &brief_summary,
                    round,
                    &mut state,
                    sink,
                    self.logger.as_ref(),
                    &self.cancellation,
                )
                .await?;
            state.end_round();
        }

        // AGGREGATING
        self.check_cancelled()?;
        let outcome = self.aggregate(&input.brief, &mut state).await?;

        // DONE
        let rendered = self.renderer.render(state.document(), state.history());
        info!(
            "Planning session complete: {} contributions over {} rounds",
            state.history().len(),
            state.max_rounds()
        );
        Ok(state.finish(panel, outcome, rendered))
    }

    /// Reconcile the full history against the document.
    ///
    /// Failure keeps the pre-aggregation document and is reported on the
    /// result, never as an error.
    async fn aggregate(
        &self,
        brief: &ProjectBrief,
        state: &mut RoundState,
    ) -> Result<AggregationOutcome, PlanningError> {
        let context = PromptTemplate::aggregation_context(
            brief,
            state.history(),
            &state.document().to_value(),
        );
        let prompt = PromptTemplate::aggregator_prompt();
        let aggregated = tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => return Err(PlanningError::Cancelled),
            aggregated = self.gateway.extract_structured(&prompt, &context) => aggregated,
        };

        let outcome = match aggregated {
            Ok(Some(record)) if record.is_empty() => AggregationOutcome::Degraded {
                reason: "aggregator returned an empty document".to_string(),
            },
            Ok(Some(record)) => {
                state.replace_document(CumulativeDocument::from_record(&record));
                AggregationOutcome::Applied
            }
            Ok(None) => AggregationOutcome::Degraded {
                reason: "aggregator returned no structured document".to_string(),
            },
            Err(e) => AggregationOutcome::Degraded {
                reason: format!("aggregation call failed: {}", e),
            },
        };

        match &outcome {
            AggregationOutcome::Applied => info!("Aggregation applied"),
            AggregationOutcome::Degraded { reason } => {
                warn!("Aggregation degraded, keeping per-round document: {}", reason)
            }
        }
        self.logger.log(ConversationEvent::new(
            "aggregation",
            json!({"outcome": outcome, "document": state.document()}),
        ));
        Ok(outcome)
    }

    fn check_cancelled(&self) -> Result<(), PlanningError> {
        if self.cancellation.is_cancelled() {
            return Err(PlanningError::Cancelled);
        }
        Ok(())
    }
}
