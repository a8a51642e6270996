//! Application layer for swarm-planner
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{PlanningConfig, WorkerFailurePolicy};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    document_renderer::{DocumentRenderer, JsonDocumentRenderer},
    event_sink::{NoEvents, PlanEventSink},
    reasoning_gateway::{ChatMessage, ChatRole, GatewayError, ReasoningGateway},
};
pub use use_cases::design_panel::DesignPanelUseCase;
pub use use_cases::draft_execution_plan::DraftExecutionPlanUseCase;
pub use use_cases::run_planning::{PlanningError, PlanningInput, RunPlanningUseCase};
pub use use_cases::run_round::RoundExecutor;
