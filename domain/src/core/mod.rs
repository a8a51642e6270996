//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - reasoning models a worker may prefer
//! - [`slug::slugify`] - stable identifiers derived from display names
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
pub mod slug;
pub mod string;
