//! Reasoning service adapters
//!
//! Implementations of the [`ReasoningGateway`](planner_application::ReasoningGateway) port.

mod http;

pub use http::{HttpGatewayError, HttpGatewaySettings, HttpReasoningGateway};
