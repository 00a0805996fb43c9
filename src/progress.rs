//! Step-by-step progress display for the deploy pipeline

use std::cell::Cell;
use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Numbered steps shown as a spinner, with one summary line per finished step
pub struct StepProgress {
    bar: ProgressBar,
    total: usize,
    current: Cell<usize>,
}

impl StepProgress {
    /// Create a visible display for `total` steps
    pub fn new(total: usize) -> Self {
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        Self::with_bar(bar, total)
    }

    /// Display that prints nothing (tests, `--json`)
    pub fn hidden(total: usize) -> Self {
        Self::with_bar(ProgressBar::hidden(), total)
    }

    fn with_bar(bar: ProgressBar, total: usize) -> Self {
        Self {
            bar,
            total,
            current: Cell::new(0),
        }
    }

    /// Start the next step
    pub fn begin(&self, description: &str) {
        let step = self.current.get() + 1;
        self.current.set(step);
        self.bar.set_prefix(format!("[{step}/{}]", self.total));
        self.bar.set_message(description.to_string());
    }

    /// Finish the current step with a result line
    pub fn done(&self, detail: impl AsRef<str>) {
        self.line(&Style::new().green().apply_to("✓").to_string(), detail.as_ref());
    }

    /// Finish the current step with a warning line
    pub fn warn(&self, detail: impl AsRef<str>) {
        self.line(&Style::new().yellow().apply_to("!").to_string(), detail.as_ref());
    }

    /// Mark the current step as not run
    pub fn skip(&self, detail: impl AsRef<str>) {
        self.line(&Style::new().dim().apply_to("-").to_string(), detail.as_ref());
    }

    /// Clear the spinner once every step ran
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Leave the spinner on failure
    pub fn abandon(&self) {
        self.bar.abandon();
    }

    pub fn current(&self) -> usize {
        self.current.get()
    }

    fn line(&self, marker: &str, detail: &str) {
        let prefix = Style::new()
            .bold()
            .apply_to(format!("[{}/{}]", self.current.get(), self.total));
        self.bar.println(format!("{marker} {prefix} {detail}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_counted() {
        let progress = StepProgress::hidden(3);
        assert_eq!(progress.current(), 0);
        progress.begin("one");
        progress.done("ok");
        progress.begin("two");
        progress.skip("nothing to do");
        assert_eq!(progress.current(), 2);
        progress.finish();
    }
}
