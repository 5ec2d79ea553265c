//! CLI argument definitions using clap
//!
//! Commands:
//! - lessonguard [--report[=<path>]] [--config <path>] ...
//! - lessonguard validate [same flags]
//! - lessonguard metrics [--output <path>] [--fail-on-metadata-gaps]
//! - lessonguard manifest inspect <file>
//! - lessonguard manifest upgrade <file>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// lessonguard - validates course content trees
#[derive(Parser, Debug)]
#[command(name = "lessonguard")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub validate: ValidateArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate every course and optionally write the report
    Validate(ValidateArgs),

    /// Write the content metrics report
    Metrics(MetricsArgs),

    /// Inspect or migrate a manifest file
    Manifest {
        #[command(subcommand)]
        action: ManifestAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ManifestAction {
    /// Print the normalized manifest summary as JSON
    Inspect {
        /// Manifest file
        file: PathBuf,
    },

    /// Rewrite a manifest in the canonical versioned form
    Upgrade {
        /// Manifest file
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Path to configuration file
    #[arg(long, default_value = "./lessonguard.json")]
    pub config: PathBuf,

    /// Workspace root (overrides config)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Course directory, relative to the workspace root (overrides config)
    #[arg(long = "content-root")]
    pub content_root: Option<PathBuf>,

    /// Minimum log severity: trace, info, warn, error, fatal
    #[arg(long = "log-level")]
    pub log_level: Option<String>,

    /// Write the JSON report; without a value the configured path is used
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    pub report: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct MetricsArgs {
    /// Path to configuration file
    #[arg(long, default_value = "./lessonguard.json")]
    pub config: PathBuf,

    /// Workspace root (overrides config)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Course directory, relative to the workspace root (overrides config)
    #[arg(long = "content-root")]
    pub content_root: Option<PathBuf>,

    /// Minimum log severity: trace, info, warn, error, fatal
    #[arg(long = "log-level")]
    pub log_level: Option<String>,

    /// Where to write the metrics report (defaults to the configured path)
    #[arg(long, visible_alias = "report")]
    pub output: Option<PathBuf>,

    /// Exit with failure when any exercise or supplement lacks generation metadata
    #[arg(long = "fail-on-metadata-gaps", visible_alias = "check")]
    pub fail_on_metadata_gaps: bool,
}

/// What `--report` asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTarget {
    /// Flag absent
    None,
    /// Flag present without value
    Default,
    /// Explicit path
    Path(PathBuf),
}

impl ValidateArgs {
    pub fn report_target(&self) -> ReportTarget {
        match self.report.as_deref().map(str::trim) {
            None => ReportTarget::None,
            Some("") => ReportTarget::Default,
            Some(value) => ReportTarget::Path(PathBuf::from(value)),
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
