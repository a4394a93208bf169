//! Terminal rendering of controller transitions.

use std::io::{self, IsTerminal, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use maze_core::Presenter;
use maze_model::{Dimension, DisplayTier};
use maze_sizing::CLASSIC_RULES;
use tracing::{trace, warn};

type Sink = Mutex<Box<dyn Write + Send>>;

/// Writes mazes to one stream and field errors to another, with a spinner
/// while the generator runs.
pub struct TerminalPresenter {
    out: Sink,
    err: Sink,
    tier: Mutex<DisplayTier>,
    spinner: Mutex<Option<ProgressBar>>,
    show_spinner: bool,
}

impl TerminalPresenter {
    /// Stdout for mazes, stderr for errors; the spinner only shows on a
    /// terminal.
    pub fn new() -> Self {
        let show_spinner = io::stderr().is_terminal();
        let mut presenter = Self::with_writers(Box::new(io::stdout()), Box::new(io::stderr()));
        presenter.show_spinner = show_spinner;
        presenter
    }

    /// Custom sinks, no spinner.
    pub fn with_writers(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
            tier: Mutex::new(CLASSIC_RULES[0].tier),
            spinner: Mutex::new(None),
            show_spinner: false,
        }
    }

    /// Tier the next maze is displayed with.
    pub fn current_tier(&self) -> DisplayTier {
        *lock(&self.tier)
    }

    fn write(&self, sink: &Sink, text: &str) {
        let mut writer = lock(sink);
        let written = writeln!(writer, "{text}").and_then(|()| writer.flush());
        if let Err(error) = written {
            warn!(%error, "failed to write to terminal");
        }
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for TerminalPresenter {
    fn show_field_error(&self, field: Dimension, message: &str) {
        self.write(&self.err, &format!("{field}: {message}"));
    }

    fn hide_field_error(&self, field: Dimension) {
        trace!(%field, "field accepted");
    }

    fn set_field_value(&self, field: Dimension, value: u32) {
        trace!(%field, value, "field normalized");
    }

    fn set_loading(&self, loading: bool) {
        let mut spinner = lock(&self.spinner);
        if loading {
            if self.show_spinner && spinner.is_none() {
                *spinner = Some(start_spinner());
            }
        } else if let Some(bar) = spinner.take() {
            bar.finish_and_clear();
        }
    }

    fn render_output(&self, text: &str, tier: Option<DisplayTier>) {
        let tier = {
            let mut current = lock(&self.tier);
            if let Some(tier) = tier {
                *current = tier;
            }
            *current
        };
        self.write(&self.out, &format!("[{tier}]\n{}", text.trim_end()));
    }
}

fn start_spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({elapsed})") {
        bar.set_style(style);
    }
    bar.set_message("Building maze");
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
