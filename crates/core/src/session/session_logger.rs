use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for frame-ingestion events.
///
/// Lets the CLI, tests and any other front end observe a capture without
/// the ingestion loop knowing how output is presented.
pub trait SessionLogger: Send {
    /// Report how many frames the session has committed so far.
    fn progress(&mut self, committed: usize, capacity: usize);

    /// Count one occurrence of a named tick outcome (e.g. "implausible").
    fn count(&mut self, name: &str);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-capture summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn progress(&mut self, _committed: usize, _capacity: usize) {}
    fn count(&mut self, _name: &str) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger: throttled progress through `log`, per-outcome
/// counters and a summary at the end of the capture.
pub struct StdoutSessionLogger {
    throttle_frames: usize,
    counters: HashMap<String, usize>,
    start_time: Instant,
    committed: usize,
    last_reported: usize,
}

impl StdoutSessionLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            counters: HashMap::new(),
            start_time: Instant::now(),
            committed: 0,
            last_reported: 0,
        }
    }

    /// Returns the formatted summary, or `None` if nothing was observed.
    pub fn summary_string(&self) -> Option<String> {
        if self.counters.is_empty() && self.committed == 0 {
            return None;
        }

        let elapsed = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Capture summary ({} frames committed, {elapsed:.1}s):",
            self.committed
        )];

        let mut names: Vec<_> = self.counters.keys().collect();
        names.sort();
        for name in names {
            lines.push(format!("  {name:12}: {}", self.counters[name]));
        }

        Some(lines.join("\n"))
    }

    pub fn count_for(&self, name: &str) -> usize {
        self.counters.get(name).copied().unwrap_or(0)
    }
}

impl Default for StdoutSessionLogger {
    fn default() -> Self {
        Self::new(50)
    }
}

impl SessionLogger for StdoutSessionLogger {
    fn progress(&mut self, committed: usize, capacity: usize) {
        self.committed = committed;
        let due = committed >= self.last_reported + self.throttle_frames;
        if due || (committed == capacity && committed != self.last_reported) {
            self.last_reported = committed;
            log::info!("Captured {committed}/{capacity} frames");
        }
    }

    fn count(&mut self, name: &str) {
        *self.counters.entry(name.to_string()).or_default() += 1;
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
