//! Validation of one course directory
//!
//! meta -> lessons index (+ files on disk) -> exercises / supplements
//! indexes (+ payloads on disk) -> every lesson payload. Lesson payloads
//! are validated concurrently, each into its own buffer, and merged in
//! file-name order.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use futures_util::future::join_all;
use serde_json::Value;
use tokio::fs;

use super::errors::{RunnerError, RunnerResult};
use crate::documents::{
    check_lesson_files, check_payload_files, validate_generated_index_file, validate_lesson_file,
    validate_lessons_index_file, validate_meta_file, ArtifactKind,
};
use crate::findings::Findings;
use crate::observability::{Logger, ObservationScope};

/// Everything one course contributed to the run
#[derive(Debug, Clone, Default)]
pub struct CourseOutcome {
    pub course: String,
    pub findings: Findings,
    /// Lesson payloads found under `lessons/`
    pub lessons: usize,
    pub exercises: Vec<Value>,
    pub supplements: Vec<Value>,
}

/// Validates `<content_root>/<course>`.
///
/// # Errors
///
/// Fails only when the `lessons/` directory exists but cannot be listed.
pub async fn validate_course(content_root: &Path, course: &str) -> RunnerResult<CourseOutcome> {
    let scope = ObservationScope::with_fields("COURSE_VALIDATION", &[("course", course)]);
    let course_dir = content_root.join(course);
    let mut findings = Findings::new();

    validate_meta_file(course, &course_dir, &mut findings).await;

    let lessons_index = validate_lessons_index_file(course, &course_dir, &mut findings).await;
    findings.merge(check_lesson_files(course, &course_dir, &lessons_index).await);

    let exercises =
        validate_artifacts(ArtifactKind::Exercises, course, &course_dir, &mut findings).await;
    let supplements =
        validate_artifacts(ArtifactKind::Supplements, course, &course_dir, &mut findings).await;

    let lesson_files = match collect_lesson_files(&course_dir).await {
        Ok(files) => files,
        Err(e) => {
            scope.fail(&e.to_string());
            return Err(e);
        }
    };
    let buffers = join_all(
        lesson_files
            .iter()
            .map(|path| validate_lesson_file(course, path)),
    )
    .await;
    for buffer in buffers {
        findings.merge(buffer);
    }

    let problems = findings.problems.len().to_string();
    let warnings = findings.warnings.len().to_string();
    let lessons = lesson_files.len().to_string();
    scope.complete_with_fields(&[
        ("lessons", lessons.as_str()),
        ("problems", problems.as_str()),
        ("warnings", warnings.as_str()),
    ]);

    Ok(CourseOutcome {
        course: course.to_string(),
        findings,
        lessons: lesson_files.len(),
        exercises,
        supplements,
    })
}

async fn validate_artifacts(
    kind: ArtifactKind,
    course: &str,
    course_dir: &Path,
    findings: &mut Findings,
) -> Vec<Value> {
    let entries = validate_generated_index_file(kind, course, course_dir, findings).await;
    findings.merge(check_payload_files(kind, course, course_dir, &entries).await);
    entries
}

/// `.json` files under `<course_dir>/lessons`, sorted by name.
///
/// A missing `lessons/` directory holds no lessons.
pub async fn collect_lesson_files(course_dir: &Path) -> RunnerResult<Vec<PathBuf>> {
    let lessons_dir = course_dir.join("lessons");
    let enumeration = |source: std::io::Error| RunnerError::LessonEnumeration {
        path: lessons_dir.clone(),
        source,
    };

    let mut dir = match fs::read_dir(&lessons_dir).await {
        Ok(dir) => dir,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(enumeration(e)),
    };

    let mut files = Vec::new();
    while let Some(entry) = dir.next_entry().await.map_err(enumeration)? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            let shown = path.display().to_string();
            Logger::trace("LESSON_FILE_FOUND", &[("path", shown.as_str())]);
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
