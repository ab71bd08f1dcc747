//! Command-line interface for preinstall.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, ListArgs};
pub use commands::{
    CheckCommand, Command, CommandDispatcher, CommandResult, EXIT_CONFIG_ERROR,
    EXIT_NOT_INSTALLABLE, EXIT_RUNTIME_ERROR,
};
