//! Presentation layer for swarm-planner
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters and the NDJSON event stream.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::ndjson::NdjsonEventSink;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
