//! Planning session orchestration domain
//!
//! This module contains the session state machine, the discussion history
//! and the events a session emits while it runs.

pub mod entities;
pub mod event;
pub mod value_objects;
