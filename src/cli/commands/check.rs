//! Check command implementation.
//!
//! The `preinstall check` command runs the checklist against this host and
//! writes the report.

use std::fs;
use std::path::{Path, PathBuf};

use crate::checks::CheckResult;
use crate::cli::args::CheckArgs;
use crate::config::{load_config, validate, AgentConfig, PreinstallConfig};
use crate::error::{PreinstallError, Result};
use crate::facts::{HostFacts, SystemFacts};
use crate::report::{render_to_string, ReportFormat};
use crate::runner::{Checklist, ChecklistProgress, Verdict};
use crate::ui::{should_use_colors, OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Exit code when at least one critical requirement is not met.
pub const EXIT_NOT_INSTALLABLE: i32 = 1;

/// Exit code when configuration could not be loaded or is invalid.
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: CheckArgs,
    facts: Box<dyn HostFacts>,
}

impl CheckCommand {
    /// Create a new check command probing the real host.
    pub fn new(project_root: &Path, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: None,
            args,
            facts: Box::new(SystemFacts::new()),
        }
    }

    /// Use an explicit config file instead of project discovery.
    pub fn with_config_override(mut self, path: Option<PathBuf>) -> Self {
        self.config_override = path;
        self
    }

    /// Probe `facts` instead of the real host.
    pub fn with_facts(mut self, facts: impl HostFacts + 'static) -> Self {
        self.facts = Box::new(facts);
        self
    }

    /// Load config and layer the agent config and CLI flags on top.
    ///
    /// Precedence, lowest first: config files, agent config, flags.
    fn resolve_config(&self) -> Result<PreinstallConfig> {
        let mut config = load_config(&self.project_root, self.config_override.as_deref())?;

        if let Some(ref path) = self.args.agent_config {
            let agent = AgentConfig::load(path)?;
            tracing::debug!("Seeding check parameters from {}", path.display());
            agent.apply(&mut config.checks);
        }

        if let Some(ref path) = self.args.database_path {
            config.checks.database_path = Some(path.clone());
        }
        if let Some(port) = self.args.port {
            config.checks.port = port;
        }
        if let Some(format) = self.args.format {
            config.settings.format = format;
        }
        if self.args.parallel {
            config.settings.parallel = true;
        }

        validate(&config)?;
        Ok(config)
    }

    fn show_parameters(&self, config: &PreinstallConfig, ui: &mut dyn UserInterface) {
        let checks = &config.checks;
        ui.message(&format!("  Port: {}", checks.port));
        match checks.database_path {
            Some(ref path) => ui.message(&format!("  Database path: {}", path.display())),
            None => ui.message("  Database path: (not specified)"),
        }
        ui.message(&format!(
            "  Mode: {}",
            if config.settings.parallel {
                "parallel"
            } else {
                "sequential"
            }
        ));
    }

    fn run_checklist(
        &self,
        config: &PreinstallConfig,
        ui: &mut dyn UserInterface,
    ) -> (Vec<CheckResult>, Verdict) {
        let checklist = Checklist::new(config.checks.clone()).parallel(config.settings.parallel);

        let mut spinner = ui.start_spinner("Running system requirement checks...");
        let results = checklist.run_with_progress(&*self.facts, |event| {
            if let ChecklistProgress::CheckStarting { id, index, total } = event {
                spinner.set_message(&format!("[{}/{}] {}", index + 1, total, id.name()));
            }
        });
        spinner.finish_and_clear();

        let verdict = Verdict::from_results(&results);
        (results, verdict)
    }

    fn deliver(&self, report: &str, ui: &mut dyn UserInterface) -> Result<()> {
        match self.args.output {
            Some(ref path) => {
                fs::write(path, report)?;
                ui.success(&format!("Report written to {}", path.display()));
            }
            None => ui.write_report(report),
        }
        Ok(())
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match self.resolve_config() {
            Ok(config) => config,
            Err(
                e @ (PreinstallError::ConfigNotFound { .. }
                | PreinstallError::ConfigParseError { .. }
                | PreinstallError::ConfigValidationError { .. }),
            ) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(EXIT_CONFIG_ERROR));
            }
            Err(e) => return Err(e),
        };

        // Apply config default_output when no CLI flag was explicitly set
        if ui.output_mode() == OutputMode::Normal {
            ui.set_output_mode(config.settings.default_output.into());
        }

        if ui.output_mode() == OutputMode::Verbose {
            ui.show_header("Check parameters");
            self.show_parameters(&config, ui);
        }

        let (results, verdict) = self.run_checklist(&config, ui);

        let format = config.settings.format;
        let use_color =
            format == ReportFormat::Human && self.args.output.is_none() && should_use_colors();
        let report = render_to_string(format, use_color, &results, &verdict)?;
        self.deliver(&report, ui)?;

        if verdict.can_install {
            Ok(CommandResult::success())
        } else {
            let blocking: Vec<&str> = results
                .iter()
                .filter(|r| r.is_blocking())
                .map(|r| r.id.name())
                .collect();
            tracing::debug!("Blocking checks: {}", blocking.join(", "));
            Ok(CommandResult::failure(EXIT_NOT_INSTALLABLE))
        }
    }
}
