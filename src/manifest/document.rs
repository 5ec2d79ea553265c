//! In-memory manifest record and its normalize / serialize steps
//!
//! Accepted source shapes:
//! - bare array (legacy): `[ {..}, {..} ]`
//! - versioned object: `{ "version", "generatedAt", "entries", ...metadata }`
//! - anything else degrades to an empty legacy manifest
//!
//! `entries` is always a sequence, never absent.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Canonical version tag stamped on every written manifest
pub const MANIFEST_VERSION: &str = "edu.manifest.v1";

/// Version sentinel for sources without an explicit version tag
pub const LEGACY_VERSION: &str = "legacy";

/// Canonical wrapper around a versioned list of content-index entries
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// Version tag, `MANIFEST_VERSION` or `LEGACY_VERSION` for untagged sources
    pub version: String,
    /// ISO-8601 timestamp of the last write
    pub generated_at: Option<String>,
    /// Ordered index entries
    pub entries: Vec<Value>,
    /// Extension fields kept alongside the entries
    pub metadata: Map<String, Value>,
    /// Where the manifest was read from
    pub file_path: Option<PathBuf>,
    /// True if the source had no string version tag
    pub legacy: bool,
    /// True if the backing file did not exist
    pub missing: bool,
}

impl Manifest {
    /// Placeholder returned by `read` when the backing file does not exist
    pub fn missing(file_path: &Path) -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            generated_at: None,
            entries: Vec::new(),
            metadata: Map::new(),
            file_path: Some(file_path.to_path_buf()),
            legacy: false,
            missing: true,
        }
    }

    fn legacy_with(entries: Vec<Value>, file_path: Option<PathBuf>) -> Self {
        Self {
            version: LEGACY_VERSION.to_string(),
            generated_at: None,
            entries,
            metadata: Map::new(),
            file_path,
            legacy: true,
            missing: false,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Converts a parsed JSON value into a canonical manifest.
pub fn normalize(raw: Value, file_path: Option<PathBuf>) -> Manifest {
    match raw {
        Value::Array(entries) => Manifest::legacy_with(entries, file_path),
        Value::Object(mut object) => {
            let version = object.remove("version");
            let generated_at = object.remove("generatedAt");
            let entries = object.remove("entries");

            let (version, legacy) = match version {
                Some(Value::String(v)) => (v, false),
                _ => (LEGACY_VERSION.to_string(), true),
            };

            Manifest {
                version,
                generated_at: match generated_at {
                    Some(Value::String(ts)) => Some(ts),
                    _ => None,
                },
                entries: match entries {
                    Some(Value::Array(entries)) => entries,
                    _ => Vec::new(),
                },
                metadata: object,
                file_path,
                legacy,
                missing: false,
            }
        }
        _ => Manifest::legacy_with(Vec::new(), file_path),
    }
}

/// Serializes a manifest stamping the current time when `generated_at` is absent.
pub fn serialize(manifest: &Manifest) -> Value {
    serialize_at(manifest, Utc::now())
}

/// Serializes a manifest into its on-disk object form.
///
/// - `version` becomes `MANIFEST_VERSION` when empty or `"legacy"`
/// - `generatedAt` becomes `now` when absent
/// - `metadata` keys are flattened next to `version` / `generatedAt` / `entries`
pub fn serialize_at(manifest: &Manifest, now: DateTime<Utc>) -> Value {
    let version = canonical_version(&manifest.version);
    let generated_at = manifest
        .generated_at
        .clone()
        .unwrap_or_else(|| iso_timestamp(now));

    let mut output = Map::new();
    output.insert("version".into(), Value::String(version));
    output.insert("generatedAt".into(), Value::String(generated_at));
    output.insert("entries".into(), Value::Array(manifest.entries.clone()));
    for (key, value) in &manifest.metadata {
        output.insert(key.clone(), value.clone());
    }
    Value::Object(output)
}

/// Returns true only for an explicit, matching version tag.
pub fn ensure_version(manifest: &Manifest, expected: &str) -> bool {
    manifest.version != LEGACY_VERSION && manifest.version == expected
}

/// Entries of a bare array or of an object's `entries` field.
pub fn entries_of(value: Option<&Value>) -> &[Value] {
    let entries = match value {
        Some(Value::Array(entries)) => Some(entries),
        Some(Value::Object(object)) => object.get("entries").and_then(Value::as_array),
        _ => None,
    };
    entries.map(Vec::as_slice).unwrap_or(&[])
}

pub(crate) fn canonical_version(version: &str) -> String {
    if version.is_empty() || version == LEGACY_VERSION {
        MANIFEST_VERSION.to_string()
    } else {
        version.to_string()
    }
}

/// RFC 3339 UTC with millisecond precision, e.g. `2025-01-01T00:00:00.000Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
