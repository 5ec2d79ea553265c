//! Console rendering of validation and metrics runs
//!
//! Findings are grouped by course, then by file, in the order they were
//! found within each file. The summary line always comes last.

use std::io::{self, Write};
use std::path::Path;

use crate::findings::Finding;
use crate::report::{relative_display, MetricsReport};
use crate::runner::RunOutcome;

use super::errors::CliResult;

const FAILURE_HEADER: &str = "❌ Content validation failed.";
const WARNING_HEADER: &str = "⚠️  Content validation warnings:";

/// Renders the full console output for a run.
pub fn render_outcome(outcome: &RunOutcome, workspace_root: &Path) -> String {
    let mut out = String::new();
    let findings = &outcome.findings;

    if findings.has_problems() {
        out.push_str(FAILURE_HEADER);
        out.push('\n');
        for line in render_findings(&findings.problems, workspace_root) {
            out.push_str(&line);
            out.push('\n');
        }
    }

    if findings.has_warnings() {
        out.push_str(WARNING_HEADER);
        out.push('\n');
        for line in render_findings(&findings.warnings, workspace_root) {
            out.push_str(&line);
            out.push('\n');
        }
    }

    out.push_str(&summary_line(outcome));
    out.push('\n');
    out
}

/// `- [course] path: message` per finding, grouped by course and file.
pub fn render_findings(findings: &[Finding], workspace_root: &Path) -> Vec<String> {
    let mut ordered: Vec<&Finding> = findings.iter().collect();
    // stable: keeps discovery order within one file
    ordered.sort_by(|a, b| a.course.cmp(&b.course).then_with(|| a.file.cmp(&b.file)));

    ordered
        .into_iter()
        .map(|finding| {
            format!(
                "- [{}] {}: {}",
                finding.course,
                relative_display(workspace_root, &finding.file),
                finding.message
            )
        })
        .collect()
}

pub fn summary_line(outcome: &RunOutcome) -> String {
    let courses = outcome.courses.len();
    let lessons = outcome.total_lessons;
    let problems = outcome.findings.problems.len();
    let warnings = outcome.findings.warnings.len();

    if problems > 0 {
        format!(
            "❌ Content validation failed with {} problem(s) and {} warning(s) across {} courses ({} lessons).",
            problems, warnings, courses, lessons
        )
    } else if warnings > 0 {
        format!(
            "✅ Content validation passed with {} warning(s) for {} courses ({} lessons).",
            warnings, courses, lessons
        )
    } else {
        format!(
            "✅ Content validation passed for {} courses ({} lessons).",
            courses, lessons
        )
    }
}

/// Writes the rendered run to stdout.
pub fn print_outcome(outcome: &RunOutcome, workspace_root: &Path) -> CliResult<()> {
    let mut stdout = io::stdout();
    stdout.write_all(render_outcome(outcome, workspace_root).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

pub fn print_report_saved(path: &Path, workspace_root: &Path) {
    println!("📝 Report saved to {}", relative_display(workspace_root, path));
}

/// Report write failures do not change the exit code.
pub fn print_report_failed(path: &Path, message: &str) {
    eprintln!("Failed to write report {}: {}", path.display(), message);
}

/// Summary lines of a metrics run.
pub fn render_metrics(report: &MetricsReport, output_path: &Path, workspace_root: &Path) -> String {
    let totals = &report.totals;
    format!(
        "📊 Metrics report saved to {}\n\
         Lessons: {} (available: {}, unavailable: {})\n\
         MD3 blocks: {} ({:.1}%); legacy blocks: {} ({:.1}%)\n\
         Exercises with complete metadata: {}/{}; supplements: {}/{}\n",
        relative_display(workspace_root, output_path),
        totals.lessons.total,
        totals.lessons.available,
        totals.lessons.unavailable,
        totals.lessons.md3_blocks,
        report.md3_share(),
        totals.lessons.legacy_blocks,
        report.legacy_share(),
        totals.exercises.with_metadata,
        totals.exercises.total,
        totals.supplements.with_metadata,
        totals.supplements.total,
    )
}

pub fn print_metrics(report: &MetricsReport, output_path: &Path, workspace_root: &Path) -> CliResult<()> {
    let mut stdout = io::stdout();
    stdout.write_all(render_metrics(report, output_path, workspace_root).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

pub fn print_metadata_gaps(gaps: &[String]) {
    eprintln!("\nGeneration metadata gaps:");
    for gap in gaps {
        eprintln!("- {}", gap);
    }
}
