//! Course `meta.json` validator

use std::path::Path;

use serde_json::{Map, Value};

use super::source::{read_document, Presence};
use crate::findings::{FindingKind, Findings};

/// Institutions a course may belong to
pub const INSTITUTIONS: &[&str] = &["Unichristus", "Unifametro"];

pub const MIN_TITLE_CHARS: usize = 8;
pub const MIN_DESCRIPTION_CHARS: usize = 60;

/// Reads `<course_dir>/meta.json` and validates it.
pub async fn validate_meta_file(course: &str, course_dir: &Path, findings: &mut Findings) {
    let path = course_dir.join("meta.json");
    if let Some(meta) = read_document(course, &path, Presence::Required, findings).await {
        validate_meta(course, &path, &meta, findings);
    }
}

/// Validates a parsed course meta document.
pub fn validate_meta(course: &str, path: &Path, meta: &Value, findings: &mut Findings) {
    let Some(meta) = meta.as_object() else {
        findings.problem(
            FindingKind::Schema,
            path,
            course,
            "meta.json must contain a JSON object.",
        );
        return;
    };
    let mut check = MetaCheck {
        course,
        path,
        meta,
        findings,
    };

    if let Some(id) = check.required("id") {
        if id != course {
            check.push(
                FindingKind::Mismatch,
                format!("Course id \"{}\" must match its directory name \"{}\".", id, course),
            );
        }
    }

    if let Some(title) = check.required("title") {
        check.min_length("title", title, MIN_TITLE_CHARS);
    }

    if let Some(institution) = check.required("institution") {
        let trimmed = institution.trim();
        if trimmed != institution {
            check.push(
                FindingKind::Whitespace,
                format!(
                    "Field \"institution\" must not have surrounding whitespace (\"{}\").",
                    institution
                ),
            );
        }
        if !INSTITUTIONS.iter().any(|known| *known == trimmed) {
            check.push(
                FindingKind::Institution,
                format!(
                    "Institution \"{}\" is not recognized. Allowed: {}.",
                    trimmed,
                    INSTITUTIONS.join(", ")
                ),
            );
        }
    }

    if let Some(description) = check.required("description") {
        check.min_length("description", description, MIN_DESCRIPTION_CHARS);
    }
}

struct MetaCheck<'a> {
    course: &'a str,
    path: &'a Path,
    meta: &'a Map<String, Value>,
    findings: &'a mut Findings,
}

impl<'a> MetaCheck<'a> {
    fn push(&mut self, kind: FindingKind, message: String) {
        self.findings.problem(kind, self.path, self.course, message);
    }

    /// A non-empty string field, or a `schema` problem
    fn required(&mut self, name: &str) -> Option<&'a str> {
        let meta: &'a Map<String, Value> = self.meta;
        match meta.get(name).and_then(Value::as_str) {
            Some(value) if !value.trim().is_empty() => Some(value),
            _ => {
                self.push(
                    FindingKind::Schema,
                    format!("Field \"{}\" in meta.json must be a non-empty string.", name),
                );
                None
            }
        }
    }

    fn min_length(&mut self, name: &str, value: &str, min: usize) {
        let count = value.trim().chars().count();
        if count < min {
            self.push(
                FindingKind::Length,
                format!(
                    "Field \"{}\" must have at least {} characters (found {}).",
                    name, min, count
                ),
            );
        }
    }
}
