//! CLI command implementations
//!
//! Commands run on a single-threaded tokio runtime. `run` returns the
//! process exit code; errors are printed by `main`.

use std::path::Path;

use serde_json::{json, Value};

use crate::manifest::{self, Manifest};
use crate::observability::Logger;
use crate::report::MetricsReport;
use crate::runner::{self, RunOutcome};

use super::args::{Cli, Command, ManifestAction, MetricsArgs, ValidateArgs};
use super::config::{Config, MetricsSettings, ValidateSettings};
use super::console;
use super::errors::{CliError, CliResult};

/// Exit code for a passing run
pub const EXIT_PASSED: i32 = 0;
/// Exit code for a run with problems, or any CLI error
pub const EXIT_FAILED: i32 = 1;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<i32> {
    let cli = Cli::parse_args();
    run_command(cli)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cli: Cli) -> CliResult<i32> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::io_error(format!("Failed to start runtime: {}", e)))?;

    match cli.command {
        None => runtime.block_on(validate(&cli.validate)),
        Some(Command::Validate(args)) => runtime.block_on(validate(&args)),
        Some(Command::Metrics(args)) => runtime.block_on(metrics(&args)),
        Some(Command::Manifest { action }) => {
            runtime.block_on(manifest_command(action))?;
            Ok(EXIT_PASSED)
        }
    }
}

/// Validates every course, prints the findings and optionally writes the report.
pub async fn validate(args: &ValidateArgs) -> CliResult<i32> {
    let settings = Config::load(&args.config)?.resolve(args)?;
    Logger::set_min_severity(settings.log_level);

    let outcome = validate_with(&settings).await?;
    console::print_outcome(&outcome, &settings.runner.workspace_root)?;

    Ok(if outcome.passed() {
        EXIT_PASSED
    } else {
        EXIT_FAILED
    })
}

/// Runs validation and writes the report when one was requested.
///
/// A report that cannot be written is printed as an error and does not
/// fail the run.
pub async fn validate_with(settings: &ValidateSettings) -> CliResult<RunOutcome> {
    let outcome = runner::run(&settings.runner).await?;

    if let Some(path) = &settings.report_path {
        match runner::write_report(path, &outcome.report).await {
            Ok(()) => {
                let shown = path.display().to_string();
                Logger::info("REPORT_WRITTEN", &[("path", shown.as_str())]);
                console::print_report_saved(path, &settings.runner.workspace_root);
            }
            Err(e) => {
                let shown = path.display().to_string();
                let message = e.to_string();
                Logger::error(
                    "REPORT_WRITE_FAILED",
                    &[("error", message.as_str()), ("path", shown.as_str())],
                );
                console::print_report_failed(path, &message);
            }
        }
    }

    Ok(outcome)
}

/// Writes the content metrics report and prints its summary.
///
/// With `--fail-on-metadata-gaps`, any exercise or supplement without
/// complete generation metadata makes the run fail.
pub async fn metrics(args: &MetricsArgs) -> CliResult<i32> {
    let settings = Config::load(&args.config)?.resolve_metrics(args)?;
    Logger::set_min_severity(settings.log_level);

    let report = metrics_with(&settings).await?;
    console::print_metrics(&report, &settings.output_path, &settings.runner.workspace_root)?;

    if settings.fail_on_metadata_gaps {
        let gaps = report.metadata_gaps();
        if !gaps.is_empty() {
            console::print_metadata_gaps(&gaps);
            return Ok(EXIT_FAILED);
        }
    }
    Ok(EXIT_PASSED)
}

/// Collects the metrics and writes them to the configured output path.
///
/// Unlike the validation report, a metrics file that cannot be written
/// fails the command.
pub async fn metrics_with(settings: &MetricsSettings) -> CliResult<MetricsReport> {
    let report = runner::collect_metrics(&settings.runner.content_root).await?;
    runner::write_report(&settings.output_path, &report).await?;

    let shown = settings.output_path.display().to_string();
    Logger::info("METRICS_WRITTEN", &[("path", shown.as_str())]);
    Ok(report)
}

async fn manifest_command(action: ManifestAction) -> CliResult<()> {
    let summary = match action {
        ManifestAction::Inspect { file } => inspect(&file).await?,
        ManifestAction::Upgrade { file } => upgrade(&file).await?,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Summary of the normalized manifest at `file`.
pub async fn inspect(file: &Path) -> CliResult<Value> {
    let manifest = manifest::read(file).await?;
    Ok(describe(&manifest))
}

/// Rewrites the manifest at `file` in the canonical versioned form.
pub async fn upgrade(file: &Path) -> CliResult<Value> {
    let before = manifest::read(file).await?;
    if before.missing {
        return Err(CliError::io_error(format!(
            "Manifest {} does not exist",
            file.display()
        )));
    }

    let upgraded = manifest::update(file, |draft| async move { draft }).await?;
    let shown = file.display().to_string();
    Logger::info(
        "MANIFEST_UPGRADED",
        &[("legacy", if before.legacy { "true" } else { "false" }), ("path", shown.as_str())],
    );
    Ok(describe(&upgraded))
}

fn describe(manifest: &Manifest) -> Value {
    let metadata: Vec<&str> = manifest.metadata.keys().map(String::as_str).collect();
    json!({
        "file": manifest.file_path.as_ref().map(|p| p.display().to_string()),
        "version": manifest.version,
        "legacy": manifest.legacy,
        "missing": manifest.missing,
        "generatedAt": manifest.generated_at,
        "entries": manifest.len(),
        "metadata": metadata,
    })
}
