//! External program execution and platform detection.

pub mod command;
pub mod platform;

pub use command::{run_program, CommandOptions, CommandResult};
pub use platform::{is_ci, is_elevated, Platform};
