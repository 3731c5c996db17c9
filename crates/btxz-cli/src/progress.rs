//! Spinner shown while a command runs.
//!
//! Key derivation and whole-payload authentication give no meaningful
//! intermediate progress, so a spinner is all there is to show.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::time::Duration;

/// Whether a spinner should be drawn: never with `--quiet`, `--json`, or
/// when stderr is not a terminal.
#[must_use]
pub fn should_show(quiet: bool, json: bool) -> bool {
    !quiet && !json && Term::stderr().is_term()
}

/// Spinner on stderr, cleared on drop.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Starts a spinner with `message`, or a no-op when `enabled` is false.
    #[must_use]
    pub fn start(message: &str, enabled: bool) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar: Some(bar) }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
