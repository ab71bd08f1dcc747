//! preinstall - Pre-installation readiness checks.
//!
//! Before an agent is installed on a host, `preinstall` probes the host for
//! everything the installation needs and reports whether it may proceed.
//!
//! # Modules
//!
//! - [`checks`] - The ten checks and the result model
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`error`] - Error types and result aliases
//! - [`facts`] - Host fact providers the checks query
//! - [`report`] - HTML, terminal, and JSON report renderers
//! - [`runner`] - Checklist execution and the installability verdict
//! - [`shell`] - External program execution and platform detection
//! - [`ui`] - Spinners, themes, and terminal output
//!
//! # Example
//!
//! ```
//! use preinstall::config::CheckSettings;
//! use preinstall::facts::StaticFacts;
//! use preinstall::runner::{Checklist, Verdict};
//!
//! let results = Checklist::new(CheckSettings::default()).run(&StaticFacts::healthy());
//! let verdict = Verdict::from_results(&results);
//!
//! assert_eq!(verdict.total, 10);
//! assert!(verdict.can_install);
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod facts;
pub mod report;
pub mod runner;
pub mod shell;
pub mod ui;

pub use checks::{CheckId, CheckResult, ReportClass, Status};
pub use error::{PreinstallError, Result};
pub use report::{ReportFormat, ReportRenderer};
pub use runner::{Checklist, Verdict};
