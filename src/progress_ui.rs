//! Spinner-backed progress sink for interactive runs.

use std::time::Duration;

use harvest_core::ProgressSink;
use indicatif::{ProgressBar, ProgressStyle};

/// Prints each progress line above a spinner that shows the latest line.
pub(crate) struct SpinnerSink {
    spinner: ProgressBar,
}

impl SpinnerSink {
    pub(crate) fn start() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self { spinner }
    }

    #[cfg(test)]
    fn hidden() -> Self {
        Self {
            spinner: ProgressBar::hidden(),
        }
    }

    pub(crate) fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressSink for SpinnerSink {
    fn line(&self, text: &str) {
        self.spinner.println(text);
        self.spinner.set_message(text.trim().to_string());
    }
}
