//! CLI module for lessonguard
//!
//! Provides command-line interface for:
//! - validate (default): validate every course, print findings, write the report
//! - metrics: write the content metrics report
//! - manifest inspect: print a normalized manifest summary
//! - manifest upgrade: rewrite a manifest in the canonical versioned form

mod args;
mod commands;
mod config;
mod console;
mod errors;

pub use args::{Cli, Command, ManifestAction, MetricsArgs, ReportTarget, ValidateArgs};
pub use commands::{
    inspect, metrics, metrics_with, run, run_command, upgrade, validate, validate_with,
    EXIT_FAILED, EXIT_PASSED,
};
pub use config::{Config, MetricsSettings, ValidateSettings};
pub use console::{render_findings, render_metrics, render_outcome, summary_line};
pub use errors::{CliError, CliErrorCode, CliResult};
