//! Line-oriented reporting sink for run diagnostics.
//!
//! Core operations never print. Anything a user must see (the assigned and
//! skipped donor counts above all) goes through a [`Reporter`] supplied by the
//! caller.

use tracing::info;

pub trait Reporter {
    fn record(&mut self, line: &str);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn record(&mut self, line: &str) {
        (**self).record(line);
    }
}

/// Collects lines in memory.
impl Reporter for Vec<String> {
    fn record(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Forwards lines to the `tracing` subscriber at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn record(&mut self, line: &str) {
        info!(target: "drate::report", "{line}");
    }
}

/// Discards every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn record(&mut self, _line: &str) {}
}
