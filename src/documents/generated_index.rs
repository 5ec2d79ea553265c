//! `exercises.json` and `supplements.json` validators
//!
//! Both indexes list generated artifacts. Every entry must carry complete
//! generation metadata (`metadata.generatedBy`, `metadata.model`,
//! `metadata.timestamp`), each missing field reported on its own. An entry
//! points at its payload with `file`, `link` or both.

use std::path::Path;

use serde_json::Value;

use super::dates::is_iso_date;
use super::ids::{entry_id, report_duplicates};
use super::schemas::{check, SchemaKind};
use super::source::{read_index, stem_of, Presence};
use crate::findings::{FindingKind, Findings};

/// Supplement `type` values
pub const SUPPLEMENT_TYPES: &[&str] = &["reading", "lab", "project", "slide", "video", "reference"];

/// Generation metadata fields, in report order
pub const GENERATION_FIELDS: [&str; 3] = ["generatedBy", "model", "timestamp"];

/// Artifact indexes with generation metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    Exercises,
    Supplements,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 2] = [ArtifactKind::Exercises, ArtifactKind::Supplements];

    /// Index file name inside the course directory
    pub fn index_file(&self) -> &'static str {
        match self {
            ArtifactKind::Exercises => "exercises.json",
            ArtifactKind::Supplements => "supplements.json",
        }
    }

    /// Directory holding the payloads, relative to the course directory
    pub fn payload_dir(&self) -> &'static str {
        match self {
            ArtifactKind::Exercises => "exercises",
            ArtifactKind::Supplements => "supplements",
        }
    }

    fn schema(&self) -> SchemaKind {
        match self {
            ArtifactKind::Exercises => SchemaKind::ExercisesIndex,
            ArtifactKind::Supplements => SchemaKind::SupplementsIndex,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Exercises => "exercise",
            ArtifactKind::Supplements => "supplement",
        }
    }
}

/// Link prefix every relative link of `course` must start with
pub fn course_link_prefix(course: &str) -> String {
    format!("/courses/{}/", course)
}

pub fn is_absolute_url(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://")
}

/// Reads `<course_dir>/<kind index>` and validates it.
///
/// A missing index is an empty one.
pub async fn validate_generated_index_file(
    kind: ArtifactKind,
    course: &str,
    course_dir: &Path,
    findings: &mut Findings,
) -> Vec<Value> {
    let path = course_dir.join(kind.index_file());
    match read_index(course, &path, Presence::Optional, findings).await {
        Some(entries) => validate_generated_index(kind, course, &path, entries, findings),
        None => Vec::new(),
    }
}

/// Validates the entries of an exercises or supplements index.
pub fn validate_generated_index(
    kind: ArtifactKind,
    course: &str,
    path: &Path,
    entries: Vec<Value>,
    findings: &mut Findings,
) -> Vec<Value> {
    let entries = Value::Array(entries);
    if let Err(message) = check(kind.schema(), &entries) {
        findings.problem(FindingKind::Schema, path, course, message);
        return Vec::new();
    }
    let Value::Array(entries) = entries else {
        return Vec::new();
    };

    let prefix = course_link_prefix(course);
    for entry in &entries {
        let id = entry_id(entry).unwrap_or_default();
        let mut push = |finding: FindingKind, message: String| {
            findings.problem(finding, path, course, message);
        };

        for field in GENERATION_FIELDS {
            if !has_generation_field(entry, field) {
                push(
                    FindingKind::GenerationMetadata,
                    format!(
                        "Entry \"{}\" is missing generation metadata \"{}\"{}.",
                        id,
                        field,
                        if field == "timestamp" { " (valid ISO date)" } else { "" }
                    ),
                );
            }
        }

        let file = non_empty(entry.get("file"));
        let link = non_empty(entry.get("link"));

        if let Some(link) = link {
            if !link.starts_with(&prefix) && !is_absolute_url(link) {
                push(
                    FindingKind::Link,
                    format!(
                        "Entry \"{}\" link \"{}\" must start with {} or be an absolute URL.",
                        id, link, prefix
                    ),
                );
            }
        }

        if let Some(file) = file {
            if stem_of(file) != id {
                push(
                    FindingKind::Mismatch,
                    format!("File name ({}) must match {} id ({}).", file, kind.label(), id),
                );
            }
        }

        if file.is_none() && link.is_none() {
            push(
                FindingKind::Reference,
                format!("Entry \"{}\" must provide a \"file\" or a \"link\".", id),
            );
        }

        match kind {
            ArtifactKind::Supplements => {
                let supplement_type = entry.get("type").and_then(Value::as_str);
                if !supplement_type.is_some_and(|t| SUPPLEMENT_TYPES.iter().any(|known| *known == t)) {
                    push(
                        FindingKind::SupplementType,
                        format!(
                            "Supplement \"{}\" has type {} but must be one of: {}.",
                            id,
                            supplement_type.map_or("(none)".to_string(), |t| format!("\"{}\"", t)),
                            SUPPLEMENT_TYPES.join(", ")
                        ),
                    );
                }
            }
            ArtifactKind::Exercises => {
                if non_empty(entry.get("description")).is_none() {
                    push(
                        FindingKind::Description,
                        format!("Exercise \"{}\" requires a non-empty \"description\".", id),
                    );
                }
            }
        }
    }

    report_duplicates(course, path, kind.label(), &entries, findings);
    entries
}

/// A generation metadata field is present and, for `timestamp`, a valid date
pub fn has_generation_field(entry: &Value, field: &str) -> bool {
    let value = non_empty(entry.get("metadata").and_then(|m| m.get(field)));
    match field {
        "timestamp" => value.is_some_and(is_iso_date),
        _ => value.is_some(),
    }
}

fn non_empty(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(kind: ArtifactKind, entries: Value) -> Findings {
        let mut findings = Findings::new();
        let Value::Array(entries) = entries else {
            panic!("entries must be an array");
        };
        validate_generated_index(kind, "algi", Path::new("algi/index.json"), entries, &mut findings);
        findings
    }

    fn generated() -> Value {
        json!({
            "generatedBy": "faculty-workbench",
            "model": "gpt-4o",
            "timestamp": "2024-05-01T10:00:00.000Z"
        })
    }

    #[test]
    fn test_exercise_without_metadata() {
        let findings = run(ArtifactKind::Exercises, json!([{ "id": "ex-1", "file": "ex-1.md" }]));
        assert_eq!(findings.problems_of(FindingKind::GenerationMetadata).count(), 3);
        assert_eq!(findings.problems_of(FindingKind::Description).count(), 1);
        assert_eq!(findings.problems.len(), 4);
    }

    #[test]
    fn test_partial_metadata_reports_each_field() {
        let findings = run(
            ArtifactKind::Exercises,
            json!([{
                "id": "ex-1",
                "file": "ex-1.json",
                "description": "Vetores",
                "metadata": { "generatedBy": "x", "timestamp": "not a date" }
            }]),
        );
        let missing: Vec<_> = findings
            .problems_of(FindingKind::GenerationMetadata)
            .map(|p| p.message.as_str())
            .collect();
        assert_eq!(missing.len(), 2);
        assert!(missing[0].contains("\"model\""));
        assert!(missing[1].contains("\"timestamp\""));
    }

    #[test]
    fn test_links() {
        let findings = run(
            ArtifactKind::Supplements,
            json!([
                { "id": "s-1", "type": "video", "link": "/courses/algi/supplements/s-1", "metadata": generated() },
                { "id": "s-2", "type": "video", "link": "https://youtu.be/x", "metadata": generated() },
                { "id": "s-3", "type": "video", "link": "/courses/other/s-3", "metadata": generated() },
                { "id": "s-4", "type": "video", "metadata": generated() }
            ]),
        );
        assert_eq!(findings.problems_of(FindingKind::Link).count(), 1);
        assert_eq!(findings.problems_of(FindingKind::Reference).count(), 1);
        assert_eq!(findings.problems.len(), 2);
    }

    #[test]
    fn test_supplement_type_enum() {
        let findings = run(
            ArtifactKind::Supplements,
            json!([
                { "id": "s-1", "type": "reading", "file": "s-1.json", "metadata": generated() },
                { "id": "s-2", "type": "podcast", "file": "s-2.json", "metadata": generated() },
                { "id": "s-3", "file": "s-3.json", "metadata": generated() }
            ]),
        );
        assert_eq!(findings.problems_of(FindingKind::SupplementType).count(), 2);
    }

    #[test]
    fn test_exercise_file_mismatch_and_duplicates() {
        let findings = run(
            ArtifactKind::Exercises,
            json!([
                { "id": "ex-1", "file": "ex-01.json", "description": "a", "metadata": generated() },
                { "id": "ex-1", "file": "ex-1.json", "description": "b", "metadata": generated() }
            ]),
        );
        assert_eq!(findings.problems_of(FindingKind::Mismatch).count(), 1);
        assert_eq!(findings.problems_of(FindingKind::Duplicate).count(), 1);
    }
}
