//! Non-interactive UI for CI/headless environments.

use std::io::Write;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Plain text, no spinners. In CI (detected via `is_ci()`) the per-check
/// progress lines are suppressed since they add noise to build logs.
pub struct NonInteractiveUI {
    mode: OutputMode,
    is_ci: bool,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            is_ci: crate::shell::is_ci(),
        }
    }

    /// Create with explicit CI flag (for testing).
    pub fn with_ci(mode: OutputMode, is_ci: bool) -> Self {
        Self { mode, is_ci }
    }

    fn shows_progress(&self) -> bool {
        self.mode.shows_spinners() && !self.is_ci
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("✓ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let show = self.shows_progress() && self.mode.shows_check_progress();
        if show {
            eprintln!("  {}", message);
        }
        Box::new(NoopSpinner { show })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            eprintln!("\n{}\n", title);
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            eprintln!("  {}", hint);
        }
    }

    fn write_report(&mut self, report: &str) {
        let mut stdout = std::io::stdout();
        write!(stdout, "{}", report).ok();
        stdout.flush().ok();
    }
}

/// Spinner stand-in that prints progress lines instead of animating.
struct NoopSpinner {
    show: bool,
}

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, msg: &str) {
        if self.show {
            eprintln!("  {}", msg);
        }
    }

    fn finish_and_clear(&mut self) {}
}
