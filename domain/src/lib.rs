//! Domain layer for swarm-planner
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Panel
//!
//! A panel is the set of workers that debate one project brief. Each worker
//! has a persona and an ordered list of focus responsibilities. Panels come
//! from a designer call or, when that degrades, from a fixed canonical set.
//!
//! ## Cumulative Document
//!
//! The requirements document the panel builds round by round. It starts
//! from a fixed template and changes only through the merge engine:
//!
//! - **Records** merge recursively
//! - **Lists** are unioned with order-preserving deduplication
//! - **Scalars** are overwritten by the last writer in panel order
//!
//! ## Session
//!
//! `Init -> RoundActive (xN) -> Aggregating -> Done`, producing a
//! [`SessionResult`] and a stream of [`PlanEvent`]s.

pub mod brief;
pub mod config;
pub mod core;
pub mod document;
pub mod orchestration;
pub mod panel;
pub mod plan;
pub mod prompt;

// Re-export commonly used types
pub use brief::{EMPTY_BRIEF_SUMMARY, ProjectBrief};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError,
    model::Model,
    slug::slugify,
    string::{single_line, truncate},
};
pub use document::{
    CumulativeDocument, DocumentUpdate, ShapeDeviation, canonical_key, merge_into, merge_list,
    parse_json_record, requirements_template,
};
pub use orchestration::{
    entities::{RoundState, SessionPhase},
    event::PlanEvent,
    value_objects::{AggregationOutcome, Contribution, DiscussionHistory, SessionResult},
};
pub use panel::{
    PanelOrigin, PanelSpec, RoundCount, WorkerDescriptor, WorkerId, fallback_panel,
    normalize_candidate,
};
pub use plan::ExecutionPlan;
pub use prompt::PromptTemplate;
