//! Markdown renderers for session output

mod document;
mod execution;

pub use document::MarkdownDocumentRenderer;
pub use execution::render_execution_markdown;
