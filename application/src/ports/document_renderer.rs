//! Document renderer port
//!
//! Turns the final cumulative document into a human-readable form.

use planner_domain::{CumulativeDocument, DiscussionHistory};

/// Renders a cumulative document (and the debate that produced it)
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &CumulativeDocument, history: &DiscussionHistory) -> String;
}

/// Renders the document as pretty-printed JSON
pub struct JsonDocumentRenderer;

impl DocumentRenderer for JsonDocumentRenderer {
    fn render(&self, document: &CumulativeDocument, _history: &DiscussionHistory) -> String {
        serde_json::to_string_pretty(document.fields()).unwrap_or_default()
    }
}
