//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use preinstall::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Checking host");
//! ui.success("Ready to install");
//!
//! assert!(ui.messages().contains(&"Checking host".to_string()));
//! assert!(ui.successes().contains(&"Ready to install".to_string()));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    hints: Vec<String>,
    spinners: Vec<String>,
    reports: Vec<String>,
    spinner_log: Rc<RefCell<Vec<SpinnerEvent>>>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Messages passed to `message`.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Messages passed to `success`.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Messages passed to `error`.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Titles passed to `show_header`.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Hints passed to `show_hint`.
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Initial messages of every spinner started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Reports passed to `write_report`.
    pub fn reports(&self) -> &[String] {
        &self.reports
    }

    /// Everything the spinners handed out by this UI recorded.
    pub fn spinner_events(&self) -> Vec<SpinnerEvent> {
        self.spinner_log.borrow().clone()
    }

    /// Check whether any captured output line contains `needle`.
    pub fn has_output(&self, needle: &str) -> bool {
        self.messages
            .iter()
            .chain(&self.successes)
            .chain(&self.errors)
            .chain(&self.hints)
            .any(|line| line.contains(needle))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            log: Rc::clone(&self.spinner_log),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_hint(&mut self, hint: &str) {
        self.hints.push(hint.to_string());
    }

    fn write_report(&mut self, report: &str) {
        self.reports.push(report.to_string());
    }
}

/// Something a [`MockSpinner`] was told to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinnerEvent {
    /// `set_message` was called.
    Message(String),
    /// `finish_and_clear` was called.
    Cleared,
}

/// Mock spinner that records into its parent [`MockUI`].
#[derive(Debug, Default)]
pub struct MockSpinner {
    log: Rc<RefCell<Vec<SpinnerEvent>>>,
}

impl MockSpinner {
    /// Create a detached mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    pub fn events(&self) -> Vec<SpinnerEvent> {
        self.log.borrow().clone()
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.log
            .borrow_mut()
            .push(SpinnerEvent::Message(msg.to_string()));
    }

    fn finish_and_clear(&mut self) {
        self.log.borrow_mut().push(SpinnerEvent::Cleared);
    }
}
