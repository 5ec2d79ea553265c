//! Content metrics walk
//!
//! Reads the same tree as a validation run, but leniently: a document that
//! is missing or cannot be parsed counts as absent and is logged, never
//! reported.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use futures_util::future::join_all;
use serde_json::Value;
use tokio::fs;

use super::errors::RunnerResult;
use super::list_courses;
use crate::documents::{entry_id, ArtifactKind};
use crate::manifest;
use crate::observability::{Logger, ObservationScope};
use crate::report::{
    analyse_exercises, analyse_lessons, analyse_supplements, build_metrics, CourseMetrics,
    MetricsReport,
};

/// Collects content metrics for every course under `content_root`.
///
/// # Errors
///
/// Fails only when the content root cannot be listed.
pub async fn collect_metrics(content_root: &Path) -> RunnerResult<MetricsReport> {
    let shown = content_root.display().to_string();
    let scope = ObservationScope::with_fields("METRICS_RUN", &[("content_root", shown.as_str())]);

    let courses = match list_courses(content_root).await {
        Ok(courses) => courses,
        Err(e) => {
            scope.fail(&e.to_string());
            return Err(e);
        }
    };

    let metrics = join_all(
        courses
            .iter()
            .map(|course| course_metrics(content_root, course)),
    )
    .await;
    let report = build_metrics(metrics);

    let courses = report.totals.courses.to_string();
    let blocks = report.totals.lessons.total_blocks.to_string();
    let lessons = report.totals.lessons.total.to_string();
    scope.complete_with_fields(&[
        ("blocks", blocks.as_str()),
        ("courses", courses.as_str()),
        ("lessons", lessons.as_str()),
    ]);
    Ok(report)
}

/// Metrics of `<content_root>/<course>`.
pub async fn course_metrics(content_root: &Path, course: &str) -> CourseMetrics {
    let course_dir = content_root.join(course);
    let meta = read_json(&course_dir.join("meta.json")).await;
    let lessons = read_entries(&course_dir.join("lessons.json")).await;
    let exercises = read_entries(&course_dir.join(ArtifactKind::Exercises.index_file())).await;
    let supplements = read_entries(&course_dir.join(ArtifactKind::Supplements.index_file())).await;

    let lesson_ids = lessons
        .iter()
        .filter(|entry| entry.get("file").and_then(Value::as_str).is_some())
        .filter_map(entry_id);
    let lesson_payloads = read_payloads(&course_dir.join("lessons"), lesson_ids).await;

    let exercise_dir = course_dir.join(ArtifactKind::Exercises.payload_dir());
    let exercise_payloads = read_payloads(&exercise_dir, exercises.iter().filter_map(entry_id)).await;

    CourseMetrics::new(
        course,
        meta.as_ref(),
        analyse_lessons(&lessons, &lesson_payloads),
        analyse_exercises(&exercises, &exercise_payloads),
        analyse_supplements(&supplements),
    )
}

/// `<dir>/<id>.json` for each id, keyed by id. Unreadable payloads are left out.
async fn read_payloads<'a>(
    dir: &Path,
    ids: impl Iterator<Item = &'a str>,
) -> BTreeMap<String, Value> {
    let ids: Vec<&str> = ids.collect();
    let payloads = join_all(ids.iter().map(|id| async move {
        read_json(&dir.join(format!("{}.json", id))).await
    }))
    .await;

    ids.into_iter()
        .zip(payloads)
        .filter_map(|(id, payload)| payload.map(|payload| (id.to_string(), payload)))
        .collect()
}

async fn read_entries(path: &Path) -> Vec<Value> {
    match read_json(path).await {
        Some(raw) => manifest::normalize(raw, Some(path.to_path_buf())).entries,
        None => Vec::new(),
    }
}

async fn read_json(path: &Path) -> Option<Value> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            skipped(path, &e.to_string());
            return None;
        }
    };
    match serde_json::from_str(raw.strip_prefix('\u{feff}').unwrap_or(&raw)) {
        Ok(value) => Some(value),
        Err(e) => {
            skipped(path, &e.to_string());
            None
        }
    }
}

fn skipped(path: &Path, error: &str) {
    let shown = path.display().to_string();
    Logger::warn(
        "METRICS_DOCUMENT_SKIPPED",
        &[("error", error), ("path", shown.as_str())],
    );
}
