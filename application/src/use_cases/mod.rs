//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod design_panel;
pub mod draft_execution_plan;
pub mod run_planning;
pub mod run_round;

#[cfg(test)]
pub(crate) mod test_support;
