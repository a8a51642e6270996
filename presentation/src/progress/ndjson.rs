//! NDJSON event stream

use planner_application::PlanEventSink;
use planner_domain::PlanEvent;
use std::io::{Stdout, Write};
use std::sync::Mutex;

/// Writes each event as one `{"type": ..., "payload": ...}` line
pub struct NdjsonEventSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl NdjsonEventSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> NdjsonEventSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> PlanEventSink for NdjsonEventSink<W> {
    fn emit(&self, event: &PlanEvent) {
        let Ok(line) = serde_json::to_string(event) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}
