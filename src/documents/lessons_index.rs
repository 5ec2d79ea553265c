//! `lessons.json` validator

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::ids::{entry_id, report_duplicates};
use super::schemas::{check, SchemaKind};
use super::source::{extension_of, read_index, stem_of, Presence};
use crate::findings::{FindingKind, Findings};

pub const LESSON_ID_PATTERN: &str = r"^lesson-[0-9]{2,}$";

/// Extension every available lesson must point at
pub const PAYLOAD_EXTENSION: &str = "json";

static LESSON_ID_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(LESSON_ID_PATTERN).ok());

pub fn is_lesson_id(id: &str) -> bool {
    LESSON_ID_RE.as_ref().is_some_and(|re| re.is_match(id))
}

/// Reads `<course_dir>/lessons.json` and validates it.
///
/// Returns the entries when the index parsed and matched its schema,
/// otherwise an empty list.
pub async fn validate_lessons_index_file(
    course: &str,
    course_dir: &Path,
    findings: &mut Findings,
) -> Vec<Value> {
    let path = course_dir.join("lessons.json");
    match read_index(course, &path, Presence::Required, findings).await {
        Some(entries) => validate_lessons_index(course, &path, entries, findings),
        None => Vec::new(),
    }
}

/// Validates the entries of a lessons index.
pub fn validate_lessons_index(
    course: &str,
    path: &Path,
    entries: Vec<Value>,
    findings: &mut Findings,
) -> Vec<Value> {
    let entries = Value::Array(entries);
    if let Err(message) = check(SchemaKind::LessonsIndex, &entries) {
        findings.problem(FindingKind::Schema, path, course, message);
        return Vec::new();
    }
    let Value::Array(entries) = entries else {
        return Vec::new();
    };

    for entry in &entries {
        let id = entry_id(entry).unwrap_or_default();
        let file = entry.get("file").and_then(Value::as_str).unwrap_or_default();

        if !is_lesson_id(id) {
            findings.problem(
                FindingKind::Pattern,
                path,
                course,
                format!("Lesson id \"{}\" must follow the lesson-XX numeric pattern.", id),
            );
        }

        if stem_of(file) != id {
            findings.problem(
                FindingKind::Mismatch,
                path,
                course,
                format!("File name ({}) must match lesson id ({}).", file, id),
            );
        }

        let available = entry.get("available").and_then(Value::as_bool) == Some(true);
        if available && extension_of(file) != Some(PAYLOAD_EXTENSION) {
            findings.problem(
                FindingKind::Extension,
                path,
                course,
                format!(
                    "Available lesson \"{}\" must reference a .{} payload (found {}).",
                    id, PAYLOAD_EXTENSION, file
                ),
            );
        }
    }

    report_duplicates(course, path, "lesson", &entries, findings);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(entries: Value) -> (Vec<Value>, Findings) {
        let mut findings = Findings::new();
        let Value::Array(entries) = entries else {
            panic!("entries must be an array");
        };
        let kept = validate_lessons_index("algi", Path::new("algi/lessons.json"), entries, &mut findings);
        (kept, findings)
    }

    #[test]
    fn test_available_wrapper_needs_json_extension() {
        let (kept, findings) = run(json!([
            { "id": "lesson-01", "file": "lesson-01.vue", "available": true }
        ]));
        assert_eq!(kept.len(), 1);
        assert_eq!(findings.problems.len(), 1);
        assert_eq!(findings.problems[0].kind, FindingKind::Extension);
    }

    #[test]
    fn test_unavailable_wrapper_is_fine() {
        let (_, findings) = run(json!([
            { "id": "lesson-01", "file": "lesson-01.vue", "available": false }
        ]));
        assert!(findings.is_clean());
    }

    #[test]
    fn test_pattern_and_mismatch() {
        let (_, findings) = run(json!([
            { "id": "lesson-1", "file": "lesson-1.json", "available": true },
            { "id": "lesson-02", "file": "lesson-03.json", "available": true }
        ]));
        assert_eq!(findings.problems_of(FindingKind::Pattern).count(), 1);
        assert_eq!(findings.problems_of(FindingKind::Mismatch).count(), 1);
    }

    #[test]
    fn test_duplicates_are_reported_once_per_id() {
        let (_, findings) = run(json!([
            { "id": "lesson-01", "file": "lesson-01.json", "available": true },
            { "id": "lesson-01", "file": "lesson-01.json", "available": true },
            { "id": "lesson-01", "file": "lesson-01.json", "available": false }
        ]));
        let duplicates: Vec<_> = findings.problems_of(FindingKind::Duplicate).collect();
        assert_eq!(duplicates.len(), 1);
        assert!(duplicates[0].message.contains("entries[0] and entries[1] and entries[2]"));
    }

    #[test]
    fn test_schema_failure_returns_no_entries() {
        let (kept, findings) = run(json!([{ "id": "lesson-01", "file": "lesson-01.json" }]));
        assert!(kept.is_empty());
        assert_eq!(findings.problems_of(FindingKind::Schema).count(), 1);
    }
}
