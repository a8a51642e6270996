//! Prompt domain
//!
//! Templates for generating prompts at each stage of a planning session.

mod template;

pub use template::{NO_PRIOR_RESPONSES, PromptTemplate};
