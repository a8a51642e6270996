//! Progress reporting for planning sessions
//!
//! Both reporters draw on stderr so stdout stays reserved for results.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use planner_application::PlanEventSink;
use planner_domain::{PanelSpec, PlanEvent};
use std::sync::Mutex;

/// Reports progress during a session with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
    /// (workers, rounds) of the current panel
    shape: Mutex<(usize, usize)>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            shape: Mutex::new((0, 0)),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn start(&self, panel: &PanelSpec) {
        let workers = panel.workers().len();
        let total = workers * panel.rounds().as_usize();

        let pb = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
        pb.set_style(Self::round_style());
        pb.set_prefix("Round 1");
        pb.println(format!(
            "{} {} workers, {} rounds",
            "Panel ready:".cyan().bold(),
            workers,
            panel.rounds()
        ));
        pb.set_message("Waiting for contributions...");

        if let Ok(mut slot) = self.shape.lock() {
            *slot = (workers, panel.rounds().as_usize());
        }
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(pb);
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(slot) = self.bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            f(pb);
        }
    }

    fn finish(&self, message: String, failed: bool) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(pb) = slot.take()
        {
            if failed {
                pb.abandon_with_message(message);
            } else {
                pb.finish_with_message(message);
            }
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanEventSink for ProgressReporter {
    fn emit(&self, event: &PlanEvent) {
        match event {
            PlanEvent::PanelReady(panel) => self.start(panel),
            PlanEvent::Contribution(contribution) => self.with_bar(|pb| {
                pb.set_message(format!("{} {}", "v".green(), contribution.worker_name));
                pb.inc(1);
            }),
            PlanEvent::RoundComplete { round } => {
                let (workers, rounds) = self.shape.lock().map(|s| *s).unwrap_or_default();
                self.with_bar(|pb| {
                    pb.println(format!(
                        "  {} Round {} complete ({} contributions)",
                        "v".green(),
                        round,
                        workers
                    ));
                    if *round < rounds {
                        pb.set_prefix(format!("Round {}", round + 1));
                    } else {
                        pb.set_prefix("Aggregating");
                    }
                });
            }
            PlanEvent::Final(result) => {
                let note = if result.aggregation.is_degraded() {
                    " (aggregation skipped)"
                } else {
                    ""
                };
                self.finish(format!("{}{}", "Session complete!".green(), note), false);
            }
            PlanEvent::Error { kind, message } => {
                self.finish(format!("{} {}: {}", "x".red(), kind, message), true);
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl PlanEventSink for SimpleProgress {
    fn emit(&self, event: &PlanEvent) {
        match event {
            PlanEvent::PanelReady(panel) => {
                eprintln!(
                    "{} {} ({} workers, {} rounds)",
                    "->".cyan(),
                    "Panel ready".bold(),
                    panel.workers().len(),
                    panel.rounds()
                );
            }
            PlanEvent::Contribution(contribution) => {
                eprintln!(
                    "  {} {} (round {})",
                    "v".green(),
                    contribution.worker_name,
                    contribution.round
                );
            }
            PlanEvent::RoundComplete { round } => {
                eprintln!("{} Round {} complete", "->".cyan(), round);
            }
            PlanEvent::Final(_) => eprintln!("{}", "Session complete".green()),
            PlanEvent::Error { kind, message } => {
                eprintln!("  {} {}: {}", "x".red(), kind, message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_domain::{Contribution, WorkerId, fallback_panel};

    #[test]
    fn test_reporter_tracks_session() {
        let reporter = ProgressReporter::new();
        reporter.emit(&PlanEvent::PanelReady(fallback_panel(None, "test")));

        assert_eq!(*reporter.shape.lock().unwrap(), (4, 2));
        let len = reporter.bar.lock().unwrap().as_ref().and_then(|pb| pb.length());
        assert_eq!(len, Some(8));

        reporter.emit(&PlanEvent::Contribution(Contribution::new(
            WorkerId::new("frontend-lead"),
            "Frontend Lead",
            "SPA",
            1,
        )));
        let pos = reporter.bar.lock().unwrap().as_ref().map(|pb| pb.position());
        assert_eq!(pos, Some(1));

        reporter.emit(&PlanEvent::Error {
            kind: "cancelled".to_string(),
            message: "interrupted".to_string(),
        });
        assert!(reporter.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_events_before_panel_are_ignored() {
        let reporter = ProgressReporter::new();
        reporter.emit(&PlanEvent::RoundComplete { round: 1 });
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}
