//! List command implementation.
//!
//! The `preinstall list` command lists the checks in the order they run.

use serde::Serialize;

use crate::checks::CheckId;
use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::ui::theme::PreinstallTheme;
use crate::ui::{should_use_colors, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// One row of the check listing.
#[derive(Debug, Serialize)]
struct CheckEntry {
    position: usize,
    id: &'static str,
    name: &'static str,
    critical: bool,
}

impl From<CheckId> for CheckEntry {
    fn from(id: CheckId) -> Self {
        Self {
            position: id.position(),
            id: id.key(),
            name: id.name(),
            critical: id.is_critical(),
        }
    }
}

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }

    fn entries(&self) -> Vec<CheckEntry> {
        CheckId::ALL
            .into_iter()
            .filter(|id| !self.args.critical_only || id.is_critical())
            .map(CheckEntry::from)
            .collect()
    }

    fn format_text(&self, entries: &[CheckEntry]) -> String {
        let theme = PreinstallTheme::for_color(should_use_colors());
        let mut out = String::new();
        for entry in entries {
            let kind = if entry.critical {
                theme.error.apply_to("critical")
            } else {
                theme.warning.apply_to("advisory")
            };
            out.push_str(&format!(
                "  {} {:<16} {:<28} {}\n",
                theme.counter.apply_to(format!("[{:>2}]", entry.position)),
                theme.highlight.apply_to(entry.id),
                entry.name,
                kind
            ));
        }
        out
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let entries = self.entries();

        if self.args.json {
            let json = serde_json::to_string_pretty(&entries).map_err(anyhow::Error::from)?;
            ui.write_report(&format!("{}\n", json));
        } else {
            ui.show_header("System requirement checks");
            ui.write_report(&self.format_text(&entries));
            ui.show_hint("Critical checks block installation when they fail.");
        }

        Ok(CommandResult::success())
    }
}
