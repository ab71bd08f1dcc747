//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`preinstall check`, `preinstall list`)
//! - Shared initialization logic
//! - Consistent global flag handling

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod list;

pub use check::{CheckCommand, EXIT_CONFIG_ERROR, EXIT_NOT_INSTALLABLE};
pub use dispatcher::{Command, CommandDispatcher, CommandResult, EXIT_RUNTIME_ERROR};
