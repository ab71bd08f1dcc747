//! Visual theme and styling.

use console::Style;

use crate::checks::ReportClass;

/// Terminal theme.
#[derive(Debug, Clone)]
pub struct PreinstallTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning and advisory messages (orange).
    pub warning: Style,
    /// Style for error and blocking messages (red bold).
    pub error: Style,
    /// Style for running elements (magenta).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (magenta bold).
    pub header: Style,
    /// Style for counters (dim).
    pub counter: Style,
    /// Style for contextual hints (magenta dim).
    pub hint: Style,
}

impl Default for PreinstallTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PreinstallTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().magenta(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().magenta(),
            counter: Style::new().dim(),
            hint: Style::new().magenta().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            counter: Style::new(),
            hint: Style::new(),
        }
    }

    /// Pick the theme for the given color preference.
    pub fn for_color(use_color: bool) -> Self {
        if use_color {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Style for a check result of the given class.
    ///
    /// Passed results that carry a caveat are styled as warnings by the
    /// caller; this only maps the class.
    pub fn class_style(&self, class: ReportClass) -> &Style {
        match class {
            ReportClass::Passed => &self.success,
            ReportClass::Advisory => &self.warning,
            ReportClass::Blocking => &self.error,
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("◆"),
            self.highlight.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
