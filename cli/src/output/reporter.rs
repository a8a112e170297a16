//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use std::cell::RefCell;

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"`
/// - `success()` prints `"  ✓ {message}"`
/// - `warn()` prints `"  ⚠ {message}"`
/// - `line()` prints tool output indented and dimmed
/// - `show()` prints a line undimmed, even when `ctx.quiet`
///
/// The rest are suppressed when `ctx.quiet`. While a countdown spinner is
/// active, the next message clears it first.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    countdown: RefCell<Option<ProgressBar>>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            countdown: RefCell::new(None),
        }
    }

    fn clear_countdown(&self) {
        if let Some(pb) = self.countdown.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        self.clear_countdown();
        if !self.ctx.quiet {
            println!("  {} {message}", "→".style(self.ctx.styles.step));
        }
    }

    fn success(&self, message: &str) {
        self.clear_countdown();
        self.ctx.success(message);
    }

    fn warn(&self, message: &str) {
        self.clear_countdown();
        self.ctx.warn(message);
    }

    fn line(&self, line: &str) {
        if !self.ctx.quiet {
            println!("    {}", line.style(self.ctx.styles.dim));
        }
    }

    fn show(&self, line: &str) {
        self.clear_countdown();
        println!("    {line}");
    }

    fn countdown(&self, remaining_secs: u64) {
        let msg = progress::countdown_message(remaining_secs);
        if self.ctx.show_progress() {
            let mut slot = self.countdown.borrow_mut();
            slot.get_or_insert_with(|| progress::spinner(&msg))
                .set_message(msg);
        } else if !self.ctx.quiet {
            println!("    {msg}");
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        self.clear_countdown();
    }
}
