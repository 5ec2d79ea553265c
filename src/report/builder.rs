//! Validation report assembly
//!
//! The report is always rebuilt from the flat problem and warning lists:
//! findings are grouped by course, then by file, and every group is sorted
//! so the output only depends on what was found, never on discovery order.

use std::collections::BTreeMap;
use std::path::{Component, Path};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::generation::GenerationReport;
use crate::findings::{Finding, FindingKind, Findings};
use crate::manifest::iso_timestamp;

/// Lesson id reported for findings on a course's `lessons.json`
pub const LESSONS_INDEX_ID: &str = "lessons-index";

/// Overall outcome of a run
///
/// `FailedWithWarnings` is part of the published status vocabulary but the
/// builder never produces it: any problem yields `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Passed,
    PassedWithWarnings,
    Failed,
    FailedWithWarnings,
}

impl ReportStatus {
    pub fn from_counts(problems: usize, warnings: usize) -> Self {
        if problems > 0 {
            ReportStatus::Failed
        } else if warnings > 0 {
            ReportStatus::PassedWithWarnings
        } else {
            ReportStatus::Passed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Passed => "passed",
            ReportStatus::PassedWithWarnings => "passed-with-warnings",
            ReportStatus::Failed => "failed",
            ReportStatus::FailedWithWarnings => "failed-with-warnings",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ReportStatus::Failed | ReportStatus::FailedWithWarnings)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub courses: usize,
    pub lessons: usize,
    pub lessons_with_issues: usize,
    pub problems: usize,
    pub warnings: usize,
}

/// A finding as listed under its file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedFinding {
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub message: String,
}

/// Findings of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonReport {
    /// Path relative to the workspace root, `/`-separated
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<String>,
    pub problems: Vec<ReportedFinding>,
    pub warnings: Vec<ReportedFinding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseReport {
    pub id: String,
    pub lessons_total: usize,
    pub lessons_with_issues: usize,
    pub problems: usize,
    pub warnings: usize,
    pub lessons: Vec<LessonReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: String,
    pub status: ReportStatus,
    pub totals: Totals,
    pub courses: Vec<CourseReport>,
    pub generation: GenerationReport,
}

/// Everything collected during one validation pass
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    /// Course slugs that were validated
    pub courses: &'a [String],
    pub total_lessons: usize,
    pub findings: &'a Findings,
    pub lessons_per_course: &'a BTreeMap<String, usize>,
    pub generation: &'a GenerationReport,
    /// Root file paths are reported relative to
    pub workspace_root: &'a Path,
    /// Directory holding the course directories
    pub content_root: &'a Path,
}

/// Builds the report, stamped with the current time.
pub fn build_report(input: ReportInput<'_>) -> Report {
    build_report_at(input, Utc::now())
}

/// Builds the report with an explicit `generatedAt`.
pub fn build_report_at(input: ReportInput<'_>, now: DateTime<Utc>) -> Report {
    let mut courses: BTreeMap<&str, CourseReport> = input
        .courses
        .iter()
        .map(|course| {
            let report = CourseReport {
                id: course.clone(),
                lessons_total: input.lessons_per_course.get(course).copied().unwrap_or(0),
                lessons_with_issues: 0,
                problems: 0,
                warnings: 0,
                lessons: Vec::new(),
            };
            (course.as_str(), report)
        })
        .collect();
    let mut files: BTreeMap<(&str, String), LessonReport> = BTreeMap::new();

    let grouped = input
        .findings
        .problems
        .iter()
        .map(|finding| (finding, true))
        .chain(input.findings.warnings.iter().map(|finding| (finding, false)));
    for (finding, is_problem) in grouped {
        let course = courses
            .entry(finding.course.as_str())
            .or_insert_with(|| CourseReport {
                id: finding.course.clone(),
                lessons_total: input.lessons_per_course.get(&finding.course).copied().unwrap_or(0),
                lessons_with_issues: 0,
                problems: 0,
                warnings: 0,
                lessons: Vec::new(),
            });
        if is_problem {
            course.problems += 1;
        } else {
            course.warnings += 1;
        }

        let file = relative_display(input.workspace_root, &finding.file);
        let lesson = files
            .entry((finding.course.as_str(), file.clone()))
            .or_insert_with(|| LessonReport {
                file,
                lesson_id: derive_lesson_id(input.content_root, &finding.course, &finding.file),
                problems: Vec::new(),
                warnings: Vec::new(),
            });
        let reported = reported(finding);
        if is_problem {
            lesson.problems.push(reported);
        } else {
            lesson.warnings.push(reported);
        }
    }

    for ((course, _), lesson) in files {
        if let Some(report) = courses.get_mut(course) {
            report.lessons.push(lesson);
        }
    }
    let courses: Vec<CourseReport> = courses
        .into_values()
        .map(|mut course| {
            course.lessons_with_issues = course.lessons.len();
            course
        })
        .collect();

    let problems = input.findings.problems.len();
    let warnings = input.findings.warnings.len();
    Report {
        generated_at: iso_timestamp(now),
        status: ReportStatus::from_counts(problems, warnings),
        totals: Totals {
            courses: input.courses.len(),
            lessons: input.total_lessons,
            lessons_with_issues: courses.iter().map(|c| c.lessons_with_issues).sum(),
            problems,
            warnings,
        },
        courses,
        generation: input.generation.clone(),
    }
}

fn reported(finding: &Finding) -> ReportedFinding {
    ReportedFinding {
        kind: finding.kind,
        message: finding.message.clone(),
    }
}

/// Lesson id for a finding's file.
///
/// Files under `<course>/lessons/` use their stem; `<course>/lessons.json`
/// is the lessons index; anything else has no lesson id.
pub fn derive_lesson_id(content_root: &Path, course: &str, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(content_root.join(course)).ok()?;
    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    match segments.as_slice() {
        [dir, file, ..] if dir == "lessons" => Some(
            Path::new(file)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.clone()),
        ),
        [only] if only == "lessons.json" => Some(LESSONS_INDEX_ID.to_string()),
        _ => None,
    }
}

/// `path` relative to `root`, joined with `/`.
///
/// Paths outside `root` are rendered as given.
pub fn relative_display(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let segments: Vec<String> = relative
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        return path.display().to_string();
    }
    let joined = segments.join("/");
    // a root component renders as "/" on its own
    joined.replacen("//", "/", 1)
}
