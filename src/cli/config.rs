//! Configuration file and flag overrides

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::args::{MetricsArgs, ReportTarget, ValidateArgs};
use super::errors::{CliError, CliResult};
use crate::observability::Severity;
use crate::runner::RunnerConfig;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root that report paths are relative to
    #[serde(default = "default_workspace_root")]
    pub workspace_root: String,

    /// Course directory, relative to the workspace root
    #[serde(default = "default_content_root")]
    pub content_root: String,

    /// Report path used when `--report` has no value
    #[serde(default = "default_report_path")]
    pub report_path: String,

    /// Metrics report path used when `metrics` has no `--output`
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,

    /// Minimum log severity
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_workspace_root() -> String {
    ".".to_string()
}
fn default_content_root() -> String {
    "src/content/courses".to_string()
}
fn default_report_path() -> String {
    "reports/content-validation-report.json".to_string()
}
fn default_metrics_path() -> String {
    "reports/content-observability.json".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_root: default_workspace_root(),
            content_root: default_content_root(),
            report_path: default_report_path(),
            metrics_path: default_metrics_path(),
            log_level: default_log_level(),
        }
    }
}

/// Everything a validation run needs, after overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateSettings {
    pub runner: RunnerConfig,
    /// Where to write the report, if requested
    pub report_path: Option<PathBuf>,
    pub log_level: Severity,
}

/// Everything a metrics run needs, after overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSettings {
    pub runner: RunnerConfig,
    pub output_path: PathBuf,
    pub fail_on_metadata_gaps: bool,
    pub log_level: Severity,
}

impl Config {
    /// Load configuration from file. An absent file yields the defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(CliError::config_error(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.content_root.trim().is_empty() {
            return Err(CliError::config_error("content_root must not be empty"));
        }

        if self.report_path.trim().is_empty() {
            return Err(CliError::config_error("report_path must not be empty"));
        }

        if self.metrics_path.trim().is_empty() {
            return Err(CliError::config_error("metrics_path must not be empty"));
        }

        self.severity()?;

        Ok(())
    }

    fn severity(&self) -> CliResult<Severity> {
        Severity::from_str(&self.log_level)
            .map_err(|e| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    fn apply_overrides(
        &mut self,
        root: Option<&PathBuf>,
        content_root: Option<&PathBuf>,
        log_level: Option<&String>,
    ) -> CliResult<()> {
        if let Some(root) = root {
            self.workspace_root = root.to_string_lossy().into_owned();
        }
        if let Some(content_root) = content_root {
            self.content_root = content_root.to_string_lossy().into_owned();
        }
        if let Some(log_level) = log_level {
            self.log_level = log_level.clone();
        }
        self.validate()
    }

    /// Applies command line overrides and resolves paths.
    pub fn resolve(mut self, args: &ValidateArgs) -> CliResult<ValidateSettings> {
        self.apply_overrides(
            args.root.as_ref(),
            args.content_root.as_ref(),
            args.log_level.as_ref(),
        )?;

        let workspace_root = PathBuf::from(&self.workspace_root);
        let report_path = match args.report_target() {
            ReportTarget::None => None,
            ReportTarget::Default => Some(workspace_root.join(&self.report_path)),
            ReportTarget::Path(path) => Some(workspace_root.join(path)),
        };

        Ok(ValidateSettings {
            runner: RunnerConfig::new(workspace_root, &self.content_root),
            report_path,
            log_level: self.severity()?,
        })
    }

    /// Applies `metrics` overrides. The output path is resolved against the workspace root.
    pub fn resolve_metrics(mut self, args: &MetricsArgs) -> CliResult<MetricsSettings> {
        self.apply_overrides(
            args.root.as_ref(),
            args.content_root.as_ref(),
            args.log_level.as_ref(),
        )?;

        let workspace_root = PathBuf::from(&self.workspace_root);
        let output_path = match &args.output {
            Some(path) => workspace_root.join(path),
            None => workspace_root.join(&self.metrics_path),
        };

        Ok(MetricsSettings {
            runner: RunnerConfig::new(workspace_root, &self.content_root),
            output_path,
            fail_on_metadata_gaps: args.fail_on_metadata_gaps,
            log_level: self.severity()?,
        })
    }
}
