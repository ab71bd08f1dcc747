//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{CheckArgs, Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

use super::check::CheckCommand;

/// Exit code when a command could not finish, for example because the report
/// could not be rendered or written.
pub const EXIT_RUNTIME_ERROR: i32 = 3;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Check(args)) => self.check(cli, args.clone()).execute(ui),
            Some(Commands::List(args)) => {
                let cmd = super::list::ListCommand::new(args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            // Default to check with default args
            None => self.check(cli, CheckArgs::default()).execute(ui),
        }
    }

    /// Dispatch a command and turn the outcome into a process exit code.
    ///
    /// Errors are shown through `ui` and exit with [`EXIT_RUNTIME_ERROR`],
    /// which never collides with a verdict or configuration exit code.
    pub fn run(&self, cli: &Cli, ui: &mut dyn UserInterface) -> i32 {
        match self.dispatch(cli, ui) {
            Ok(result) => result.exit_code,
            Err(e) => {
                tracing::debug!("Command failed: {:?}", e);
                ui.error(&format!("Error: {}", e));
                EXIT_RUNTIME_ERROR
            }
        }
    }

    fn check(&self, cli: &Cli, args: CheckArgs) -> CheckCommand {
        CheckCommand::new(&self.project_root, args).with_config_override(cli.config.clone())
    }
}
