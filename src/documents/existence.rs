//! On-disk existence checks for available index entries
//!
//! Lessons: every available entry must exist under `lessons/`; a `.vue`
//! wrapper (or an entry without extension, read as `.vue`) also needs its
//! `.json` payload next to it.
//! Exercises and supplements: available `.json` payloads must exist under
//! their payload directory.
//!
//! Each entry is checked concurrently into its own buffer; buffers are
//! merged in entry order.

use std::io::ErrorKind;
use std::path::Path;

use futures_util::future::join_all;
use serde_json::Value;
use tokio::fs;

use super::generated_index::ArtifactKind;
use super::source::{extension_of, stem_of};
use crate::findings::{FindingKind, Findings};

const LESSONS_DIR: &str = "lessons";
const WRAPPER_EXTENSION: &str = "vue";

/// Checks the available entries of `lessons.json`.
pub async fn check_lesson_files(course: &str, course_dir: &Path, entries: &[Value]) -> Findings {
    let lessons_dir = course_dir.join(LESSONS_DIR);
    let checks = entries
        .iter()
        .filter_map(available_file)
        .map(|file| check_lesson_entry(course, &lessons_dir, file));
    merge(join_all(checks).await)
}

async fn check_lesson_entry(course: &str, lessons_dir: &Path, file: &str) -> Findings {
    let mut findings = Findings::new();
    let target = lessons_dir.join(file);
    require_file(
        course,
        &target,
        FindingKind::Missing,
        format!("Listed in lessons.json but missing on disk ({}).", file),
        &mut findings,
    )
    .await;

    let extension = extension_of(file).unwrap_or(WRAPPER_EXTENSION);
    if extension == WRAPPER_EXTENSION {
        let payload = lessons_dir.join(format!("{}.json", stem_of(file)));
        require_file(
            course,
            &payload,
            FindingKind::MissingJson,
            format!("Wrapper {} found but JSON payload is missing.", file),
            &mut findings,
        )
        .await;
    }
    findings
}

/// Checks the available `.json` payloads of an exercises or supplements index.
pub async fn check_payload_files(
    kind: ArtifactKind,
    course: &str,
    course_dir: &Path,
    entries: &[Value],
) -> Findings {
    let payload_dir = course_dir.join(kind.payload_dir());
    let checks = entries
        .iter()
        .filter_map(available_file)
        .filter(|file| extension_of(file) == Some("json"))
        .map(|file| {
            let target = payload_dir.join(file);
            let message = format!(
                "Listed in {} but missing on disk ({}).",
                kind.index_file(),
                file
            );
            async move {
                let mut findings = Findings::new();
                require_file(course, &target, FindingKind::Missing, message, &mut findings).await;
                findings
            }
        });
    merge(join_all(checks).await)
}

/// The `file` of an entry marked `available: true`
fn available_file(entry: &Value) -> Option<&str> {
    if entry.get("available").and_then(Value::as_bool) != Some(true) {
        return None;
    }
    entry
        .get("file")
        .and_then(Value::as_str)
        .filter(|file| !file.trim().is_empty())
}

async fn require_file(
    course: &str,
    target: &Path,
    missing: FindingKind,
    message: String,
    findings: &mut Findings,
) {
    match fs::metadata(target).await {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            findings.problem(missing, target, course, message);
        }
        Err(e) => findings.problem(FindingKind::Read, target, course, e.to_string()),
    }
}

fn merge(buffers: Vec<Findings>) -> Findings {
    let mut merged = Findings::new();
    for buffer in buffers {
        merged.merge(buffer);
    }
    merged
}
