use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for one pipeline phase (reading, analyzing).
///
/// Hidden in quiet mode or when stderr is not a TTY, so stdout stays clean.
#[derive(Clone)]
pub struct PhaseProgress {
    progress_bar: ProgressBar,
    counter: Arc<AtomicU64>,
}

impl PhaseProgress {
    #[must_use]
    pub fn new(phase: &str, total: u64, quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(phase, total, quiet, is_tty)
    }

    fn new_with_visibility(phase: &str, total: u64, quiet: bool, is_tty: bool) -> Self {
        let progress_bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            Self::visible_bar(phase, total)
        };

        Self {
            progress_bar,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    fn visible_bar(phase: &str, total: u64) -> ProgressBar {
        let template = format!(
            "{{spinner:.green}} {phase:<9} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} files ({{percent}}%)"
        );
        let style = ProgressStyle::default_bar()
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        let pb = ProgressBar::new(total);
        pb.set_style(style);
        pb
    }

    /// Thread-safe; called from worker threads.
    pub fn inc(&self) {
        let count = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.progress_bar.set_position(count);
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    /// Finishes the progress bar and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
