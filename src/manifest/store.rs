//! Manifest file I/O
//!
//! - `read`: missing file becomes an empty manifest with `missing: true`
//! - `write`: pretty JSON + trailing newline, parent directories created
//! - `update`: read -> draft -> updater -> canonical version + fresh timestamp -> write
//!
//! `update` is the only mutation path; nothing is written until the updater
//! has produced the whole next manifest.

use std::future::Future;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tokio::fs;

use super::document::{canonical_version, iso_timestamp, normalize, serialize, Manifest};
use super::errors::{ManifestError, ManifestResult};

/// Reads and normalizes a manifest file.
///
/// # Errors
///
/// JSON syntax errors and I/O errors other than not-found are returned.
pub async fn read(file_path: &Path) -> ManifestResult<Manifest> {
    let raw = match fs::read_to_string(file_path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Manifest::missing(file_path)),
        Err(e) => {
            return Err(ManifestError::Read {
                path: file_path.to_path_buf(),
                source: e,
            })
        }
    };

    let data: Value = serde_json::from_str(strip_bom(&raw)).map_err(|e| ManifestError::Parse {
        path: file_path.to_path_buf(),
        source: e,
    })?;

    Ok(normalize(data, Some(file_path.to_path_buf())))
}

/// Serializes and writes a manifest, returning exactly what was written.
pub async fn write(file_path: &Path, manifest: &Manifest) -> ManifestResult<Value> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ManifestError::Write {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
    }

    let output = serialize(manifest);
    let mut payload =
        serde_json::to_string_pretty(&output).map_err(|e| ManifestError::Serialize {
            path: file_path.to_path_buf(),
            source: e,
        })?;
    payload.push('\n');

    fs::write(file_path, payload)
        .await
        .map_err(|e| ManifestError::Write {
            path: file_path.to_path_buf(),
            source: e,
        })?;

    Ok(output)
}

/// Applies `updater` to a draft of the manifest at `file_path` and writes the result.
///
/// The draft is an independent copy of the stored manifest. The written
/// manifest always carries the canonical version tag and a fresh
/// `generatedAt`, whatever the updater set.
pub async fn update<F, Fut>(file_path: &Path, updater: F) -> ManifestResult<Manifest>
where
    F: FnOnce(Manifest) -> Fut,
    Fut: Future<Output = Manifest>,
{
    let draft = read(file_path).await?;
    let mut next = updater(draft).await;
    next.version = canonical_version(&next.version);
    next.generated_at = Some(iso_timestamp(chrono::Utc::now()));
    next.file_path = Some(file_path.to_path_buf());
    next.legacy = false;
    next.missing = false;

    write(file_path, &next).await?;
    Ok(next)
}

fn strip_bom(raw: &str) -> &str {
    raw.strip_prefix('\u{feff}').unwrap_or(raw)
}
