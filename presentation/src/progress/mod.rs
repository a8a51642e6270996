//! Live session feedback: progress display and event streaming

pub mod ndjson;
pub mod reporter;
