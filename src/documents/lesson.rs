//! Lesson payload validator
//!
//! Order of checks for one `lessons/<id>.json`:
//! 1. read + parse (`read` / `parse` problems)
//! 2. lesson schema (`schema` problem, stops here)
//! 3. `id` equals the file stem (`mismatch`)
//! 4. advisory metadata (`metadata` warnings)
//! 5. every content block: legacy -> warning, unknown -> problem,
//!    supported -> its block rule

use std::path::Path;

use serde_json::Value;

use super::dates::is_iso_date;
use super::schemas::{check, SchemaKind};
use super::source::{read_document, Presence};
use crate::blocks::{validate_block, BlockContext, BlockType, Record};
use crate::findings::{FindingKind, Findings};

/// Reads one lesson file and validates it into a fresh buffer.
pub async fn validate_lesson_file(course: &str, path: &Path) -> Findings {
    let mut findings = Findings::new();
    if let Some(lesson) = read_document(course, path, Presence::Required, &mut findings).await {
        validate_lesson(course, path, &lesson, &mut findings);
    }
    findings
}

/// Validates a parsed lesson document.
pub fn validate_lesson(course: &str, path: &Path, lesson: &Value, findings: &mut Findings) {
    if let Err(message) = check(SchemaKind::Lesson, lesson) {
        findings.problem(FindingKind::Schema, path, course, message);
        return;
    }

    let expected = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let id = lesson.get("id").and_then(Value::as_str).unwrap_or_default();
    if id != expected {
        findings.problem(
            FindingKind::Mismatch,
            path,
            course,
            format!("Lesson JSON id ({}) must match file name ({}).", id, expected),
        );
    }

    check_metadata(course, path, lesson, findings);

    let blocks = lesson
        .get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    for (index, block) in blocks.iter().enumerate() {
        let Some(record) = Record::from_value(block) else {
            continue;
        };
        let type_name = record.text("type").unwrap_or_default();
        match BlockType::classify(type_name) {
            BlockType::Legacy(legacy) => findings.warning(
                FindingKind::LegacyBlock,
                path,
                course,
                format!(
                    "Legacy block at content[{}]: \"{}\" needs a future rework.",
                    index,
                    legacy.as_str()
                ),
            ),
            BlockType::Unknown(unknown) => findings.problem(
                FindingKind::UnknownBlock,
                path,
                course,
                format!("Unknown block at content[{}]: \"{}\".", index, unknown),
            ),
            BlockType::Supported(kind) => {
                let mut ctx = BlockContext {
                    course,
                    file: path,
                    index,
                    findings: &mut *findings,
                };
                validate_block(kind, &record, &mut ctx);
            }
        }
    }
}

/// Advisory fields; each absence is one `metadata` warning
fn check_metadata(course: &str, path: &Path, lesson: &Value, findings: &mut Findings) {
    let mut warn = |message: String| {
        findings.warning(FindingKind::Metadata, path, course, message);
    };

    for field in ["formatVersion", "summary", "objective"] {
        if !is_filled_text(lesson.get(field)) {
            warn(format!("Lesson metadata \"{}\" is missing or empty.", field));
        }
    }
    for field in ["competencies", "outcomes", "content"] {
        if !is_filled_list(lesson.get(field)) {
            warn(format!("Lesson metadata \"{}\" must list at least one item.", field));
        }
    }

    let metadata = lesson.get("metadata");
    let updated_at = metadata
        .and_then(|m| m.get("updatedAt"))
        .and_then(Value::as_str);
    if !updated_at.is_some_and(is_iso_date) {
        warn("Lesson metadata \"metadata.updatedAt\" must be a valid ISO date.".to_string());
    }
    if !is_filled_list(metadata.and_then(|m| m.get("owners"))) {
        warn("Lesson metadata \"metadata.owners\" must list at least one owner.".to_string());
    }
}

fn is_filled_text(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|text| !text.trim().is_empty())
}

fn is_filled_list(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PATH: &str = "courses/algi/lessons/lesson-01.json";

    fn complete_lesson(content: Value) -> Value {
        json!({
            "id": "lesson-01",
            "title": "Introdução",
            "formatVersion": "md3.lesson.v1",
            "summary": "Resumo",
            "objective": "Objetivo",
            "competencies": ["C1"],
            "outcomes": ["R1"],
            "content": content,
            "metadata": { "updatedAt": "2024-05-01", "owners": ["prof"] }
        })
    }

    fn run(lesson: Value) -> Findings {
        let mut findings = Findings::new();
        validate_lesson("algi", Path::new(PATH), &lesson, &mut findings);
        findings
    }

    #[test]
    fn test_complete_lesson_is_clean() {
        let findings = run(complete_lesson(json!([{ "type": "html", "html": "<p>Oi</p>" }])));
        assert!(findings.is_clean(), "{:?}", findings);
    }

    #[test]
    fn test_callout_variant_casing() {
        let findings = run(complete_lesson(json!([
            { "type": "callout", "content": "x", "variant": "Info" }
        ])));
        assert_eq!(findings.problems.len(), 1);
        assert_eq!(findings.problems[0].kind, FindingKind::BlockField);
        assert!(findings.problems[0].message.starts_with("content[0]: "));
        assert!(findings.problems[0].message.contains("\"info\""));
    }

    #[test]
    fn test_id_must_match_stem() {
        let mut lesson = complete_lesson(json!([]));
        lesson["id"] = json!("lesson-02");
        let findings = run(lesson);
        assert_eq!(findings.problems_of(FindingKind::Mismatch).count(), 1);
    }

    #[test]
    fn test_schema_failure_stops_validation() {
        let findings = run(json!({ "id": "lesson-01", "content": "html" }));
        assert_eq!(findings.problems.len(), 1);
        assert_eq!(findings.problems[0].kind, FindingKind::Schema);
        assert!(findings.warnings.is_empty());
    }

    #[test]
    fn test_legacy_and_unknown_blocks() {
        let findings = run(complete_lesson(json!([
            { "type": "quiz", "questions": [] },
            { "type": "flashcards" },
            { "type": "code", "code": "x" }
        ])));
        assert_eq!(findings.warnings_of(FindingKind::LegacyBlock).count(), 1);
        assert_eq!(findings.problems.len(), 1);
        assert_eq!(findings.problems[0].kind, FindingKind::UnknownBlock);
        assert!(findings.problems[0].message.contains("content[1]"));
    }

    #[test]
    fn test_missing_metadata_only_warns() {
        let findings = run(json!({
            "id": "lesson-01",
            "content": [{ "type": "html", "html": "x" }],
            "metadata": { "updatedAt": "last week" }
        }));
        assert!(findings.problems.is_empty());
        // formatVersion, summary, objective, competencies, outcomes, updatedAt, owners
        assert_eq!(findings.warnings_of(FindingKind::Metadata).count(), 7);
    }

    #[test]
    fn test_invalid_component_name() {
        let findings = run(complete_lesson(json!([
            { "type": "component", "component": "Flashcards" }
        ])));
        assert_eq!(findings.problems_of(FindingKind::InvalidComponent).count(), 1);
    }
}
