//! Infrastructure layer for swarm-planner
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the HTTP reasoning gateway, configuration
//! file loading, the JSONL transcript logger and Markdown renderers.

pub mod config;
pub mod gateway;
pub mod logging;
pub mod render;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileConfig, FileLoggingConfig, FileOutputConfig,
    FilePlanningConfig, FileReasoningConfig, ReasoningProvider,
};
pub use gateway::{HttpGatewayError, HttpGatewaySettings, HttpReasoningGateway};
pub use logging::JsonlConversationLogger;
pub use render::{MarkdownDocumentRenderer, render_execution_markdown};
