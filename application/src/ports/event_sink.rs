//! Event sink port
//!
//! Defines the interface for observing a planning session while it runs.
//! Attaching a sink never changes the session's final state.

use planner_domain::PlanEvent;

/// Receiver of session lifecycle events
///
/// Implementations live in the presentation layer (progress bars, NDJSON
/// streams) or forward events elsewhere. `emit` is synchronous and must
/// not fail; events arrive in the documented session order.
pub trait PlanEventSink: Send + Sync {
    fn emit(&self, event: &PlanEvent);
}

/// No-op sink used by batch invocations
pub struct NoEvents;

impl PlanEventSink for NoEvents {
    fn emit(&self, _event: &PlanEvent) {}
}
