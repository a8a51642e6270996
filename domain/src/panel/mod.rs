//! Panel domain
//!
//! A panel is the set of workers collaborating on one planning session,
//! plus the round budget and the objective they share.
//!
//! - [`entities`] - [`WorkerDescriptor`], [`PanelSpec`], [`RoundCount`]
//! - [`candidate`] - normalisation of a designer's raw proposal
//! - [`fallback`] - the canonical panel used when design degrades

pub mod candidate;
pub mod entities;
pub mod fallback;

pub use candidate::normalize_candidate;
pub use entities::{PanelOrigin, PanelSpec, RoundCount, WorkerDescriptor, WorkerId};
pub use fallback::fallback_panel;
