//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod conversation_logger;
pub mod document_renderer;
pub mod event_sink;
pub mod reasoning_gateway;
