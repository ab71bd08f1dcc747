//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::report::ReportFormat;

/// preinstall - Check whether this host is ready for the agent installation.
#[derive(Debug, Parser)]
#[command(name = "preinstall")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (replaces .preinstall/config.yml discovery)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the readiness checks (default if no command specified)
    Check(CheckArgs),

    /// List the checks and whether they block installation
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Legacy database directory to inspect
    #[arg(long, value_name = "DIR")]
    pub database_path: Option<PathBuf>,

    /// Port the agent will listen on
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Report format (defaults to settings.format, then human)
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Run the checks concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Seed database path and port from the agent's JSON config
    #[arg(long, value_name = "FILE")]
    pub agent_config: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// List only checks that block installation when they fail
    #[arg(long)]
    pub critical_only: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_uses_tool_description() {
        let about = Cli::command()
            .get_about()
            .map(|s| s.to_string())
            .unwrap_or_default();
        assert!(about.starts_with("preinstall - Check whether this host"));
        assert!(about.contains("ready for the agent installation"));
    }

    #[test]
    fn parses_check_flags() {
        let cli = Cli::try_parse_from([
            "preinstall",
            "check",
            "--database-path",
            "/data/legacy",
            "--port",
            "9000",
            "--format",
            "json",
            "--parallel",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Check(args)) => {
                assert_eq!(args.database_path, Some(PathBuf::from("/data/legacy")));
                assert_eq!(args.port, Some(9000));
                assert_eq!(args.format, Some(ReportFormat::Json));
                assert!(args.parallel);
            }
            other => panic!("expected check command, got {:?}", other),
        }
    }

    #[test]
    fn rejects_port_zero() {
        assert!(Cli::try_parse_from(["preinstall", "check", "--port", "0"]).is_err());
    }

    #[test]
    fn rejects_port_out_of_range() {
        assert!(Cli::try_parse_from(["preinstall", "check", "--port", "70000"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["preinstall", "list", "--quiet", "--no-color"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.no_color);
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["preinstall"]).unwrap();
        assert!(cli.command.is_none());
    }
}
