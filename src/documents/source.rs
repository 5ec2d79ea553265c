//! Reading JSON documents and index manifests into findings
//!
//! Read and parse failures never escape from here: they become `missing`,
//! `read` or `parse` problems on the file, and the caller gets `None`.

use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tokio::fs;

use crate::findings::{FindingKind, Findings};
use crate::manifest;

/// How a missing file is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absence is a `missing` problem
    Required,
    /// Absence reads as an empty document
    Optional,
}

enum Loaded {
    Document(Value),
    Absent,
    Failed,
}

async fn load(course: &str, path: &Path, presence: Presence, findings: &mut Findings) -> Loaded {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            if presence == Presence::Required {
                findings.problem(
                    FindingKind::Missing,
                    path,
                    course,
                    format!("Required file {} is missing.", file_name(path)),
                );
                return Loaded::Failed;
            }
            return Loaded::Absent;
        }
        Err(e) => {
            findings.problem(FindingKind::Read, path, course, e.to_string());
            return Loaded::Failed;
        }
    };

    let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);
    match serde_json::from_str(raw) {
        Ok(value) => Loaded::Document(value),
        Err(e) => {
            findings.problem(
                FindingKind::Parse,
                path,
                course,
                format!("Invalid JSON in {}: {}", file_name(path), e),
            );
            Loaded::Failed
        }
    }
}

/// Reads and parses a standalone JSON document.
///
/// Returns `None` when the file is missing, unreadable or malformed; a
/// missing file is only reported under `Presence::Required`.
pub async fn read_document(
    course: &str,
    path: &Path,
    presence: Presence,
    findings: &mut Findings,
) -> Option<Value> {
    match load(course, path, presence, findings).await {
        Loaded::Document(value) => Some(value),
        Loaded::Absent | Loaded::Failed => None,
    }
}

/// Reads an index manifest and returns its entries.
///
/// Only a bare array or an object whose `entries` is an array is an index.
/// Any other shape is one `schema` problem and yields `None`. An absent
/// optional index yields no entries.
pub async fn read_index(
    course: &str,
    path: &Path,
    presence: Presence,
    findings: &mut Findings,
) -> Option<Vec<Value>> {
    let raw = match load(course, path, presence, findings).await {
        Loaded::Document(raw) => raw,
        Loaded::Absent => return Some(Vec::new()),
        Loaded::Failed => return None,
    };

    let is_index = match &raw {
        Value::Array(_) => true,
        Value::Object(object) => object.get("entries").is_some_and(Value::is_array),
        _ => false,
    };
    if !is_index {
        findings.problem(
            FindingKind::Schema,
            path,
            course,
            "/: expected an array or {version, entries: [...]}",
        );
        return None;
    }
    Some(manifest::normalize(raw, Some(path.to_path_buf())).entries)
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// File name without its last extension, `path.parse(file).name` style
pub(crate) fn stem_of(file: &str) -> &str {
    let base = file.rsplit(['/', '\\']).next().unwrap_or(file);
    match base.rfind('.') {
        Some(0) | None => base,
        Some(dot) => &base[..dot],
    }
}

/// Extension without the dot, if any
pub(crate) fn extension_of(file: &str) -> Option<&str> {
    let base = file.rsplit(['/', '\\']).next().unwrap_or(file);
    match base.rfind('.') {
        Some(0) | None => None,
        Some(dot) => Some(&base[dot + 1..]),
    }
}
