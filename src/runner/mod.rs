//! Validation driver
//!
//! Enumerates the course directories under the content root, validates
//! every course concurrently and builds the report. Courses are merged in
//! name order, so two runs over the same tree produce the same report
//! apart from `generatedAt`.

mod course;
mod errors;
mod metrics;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use futures_util::future::join_all;
use serde::Serialize;
use tokio::fs;

pub use course::{collect_lesson_files, validate_course, CourseOutcome};
pub use errors::{RunnerError, RunnerResult};
pub use metrics::{collect_metrics, course_metrics};

use crate::documents::ArtifactKind;
use crate::findings::Findings;
use crate::observability::ObservationScope;
use crate::report::{build_report, summarize, GenerationReport, Report, ReportInput};

/// Where a run reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Root that report paths are relative to
    pub workspace_root: PathBuf,
    /// Directory holding one directory per course
    pub content_root: PathBuf,
}

impl RunnerConfig {
    /// `content_root` is resolved against `workspace_root` when relative.
    pub fn new(workspace_root: impl Into<PathBuf>, content_root: impl AsRef<Path>) -> Self {
        let workspace_root = workspace_root.into();
        let content_root = workspace_root.join(content_root);
        Self {
            workspace_root,
            content_root,
        }
    }
}

/// Result of a validation run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: Report,
    /// Every finding, courses in name order
    pub findings: Findings,
    pub courses: Vec<String>,
    pub total_lessons: usize,
}

impl RunOutcome {
    pub fn passed(&self) -> bool {
        !self.report.status.is_failure()
    }
}

/// Validates every course under the content root.
///
/// # Errors
///
/// Fails when the content root or a course's `lessons/` directory cannot
/// be listed. Everything else is reported as findings.
pub async fn run(config: &RunnerConfig) -> RunnerResult<RunOutcome> {
    let content_root = config.content_root.display().to_string();
    let scope =
        ObservationScope::with_fields("VALIDATION_RUN", &[("content_root", content_root.as_str())]);

    let courses = match list_courses(&config.content_root).await {
        Ok(courses) => courses,
        Err(e) => {
            scope.fail(&e.to_string());
            return Err(e);
        }
    };

    let results = join_all(
        courses
            .iter()
            .map(|course| validate_course(&config.content_root, course)),
    )
    .await;

    let mut findings = Findings::new();
    let mut lessons_per_course = BTreeMap::new();
    let mut generation = GenerationReport::new();
    let mut total_lessons = 0;
    for result in results {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                scope.fail(&e.to_string());
                return Err(e);
            }
        };
        total_lessons += outcome.lessons;
        lessons_per_course.insert(outcome.course.clone(), outcome.lessons);
        generation.push(ArtifactKind::Exercises, summarize(&outcome.course, &outcome.exercises));
        generation.push(
            ArtifactKind::Supplements,
            summarize(&outcome.course, &outcome.supplements),
        );
        findings.merge(outcome.findings);
    }

    let report = build_report(ReportInput {
        courses: &courses,
        total_lessons,
        findings: &findings,
        lessons_per_course: &lessons_per_course,
        generation: &generation,
        workspace_root: &config.workspace_root,
        content_root: &config.content_root,
    });

    let courses_count = courses.len().to_string();
    let problems = findings.problems.len().to_string();
    let warnings = findings.warnings.len().to_string();
    scope.complete_with_fields(&[
        ("courses", courses_count.as_str()),
        ("problems", problems.as_str()),
        ("status", report.status.as_str()),
        ("warnings", warnings.as_str()),
    ]);

    Ok(RunOutcome {
        report,
        findings,
        courses,
        total_lessons,
    })
}

/// Course directory names under `content_root`, sorted.
pub async fn list_courses(content_root: &Path) -> RunnerResult<Vec<String>> {
    let enumeration = |source: std::io::Error| RunnerError::CourseEnumeration {
        path: content_root.to_path_buf(),
        source,
    };

    let mut dir = fs::read_dir(content_root).await.map_err(enumeration)?;
    let mut courses = Vec::new();
    while let Some(entry) = dir.next_entry().await.map_err(enumeration)? {
        if entry.file_type().await.map_err(enumeration)?.is_dir() {
            courses.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    courses.sort();
    Ok(courses)
}

/// Writes a report as pretty JSON with a trailing newline.
pub async fn write_report<T: Serialize>(path: &Path, report: &T) -> RunnerResult<()> {
    let write_error = |source: std::io::Error| RunnerError::ReportWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(write_error)?;
        }
    }
    let mut payload = serde_json::to_string_pretty(report)?;
    payload.push('\n');
    fs::write(path, payload).await.map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_courses_ignores_files() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("poo")).unwrap();
        std::fs::create_dir_all(tmp.path().join("algi")).unwrap();
        std::fs::write(tmp.path().join("README.md"), "x").unwrap();

        let courses = list_courses(tmp.path()).await.unwrap();
        assert_eq!(courses, vec!["algi", "poo"]);
    }

    #[tokio::test]
    async fn test_missing_content_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let config = RunnerConfig::new(tmp.path(), "src/content/courses");

        let err = run(&config).await.unwrap_err();
        assert!(matches!(err, RunnerError::CourseEnumeration { .. }));
        assert_eq!(err.path(), Some(&config.content_root));
    }

    #[tokio::test]
    async fn test_empty_content_root_passes() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("courses")).unwrap();
        let config = RunnerConfig::new(tmp.path(), "courses");

        let outcome = run(&config).await.unwrap();
        assert!(outcome.passed());
        assert!(outcome.courses.is_empty());
        assert_eq!(outcome.report.totals.courses, 0);
    }

    #[test]
    fn test_config_resolves_content_root() {
        let config = RunnerConfig::new("/ws", "src/content/courses");
        assert_eq!(config.content_root, PathBuf::from("/ws/src/content/courses"));

        let config = RunnerConfig::new("/ws", "/abs/courses");
        assert_eq!(config.content_root, PathBuf::from("/abs/courses"));
    }
}
