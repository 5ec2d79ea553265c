//! Manifest normalizer for content indexes (lessons, exercises, supplements)
//!
//! Two on-disk shapes are accepted: a bare legacy array, or a versioned
//! object `{ version, generatedAt, entries, ...metadata }`. Everything written
//! back uses the versioned shape with the canonical `MANIFEST_VERSION` tag.

mod document;
mod errors;
mod store;

pub use document::{
    ensure_version, entries_of, iso_timestamp, normalize, serialize, serialize_at, Manifest,
    LEGACY_VERSION, MANIFEST_VERSION,
};
pub use errors::{ManifestError, ManifestResult};
pub use store::{read, update, write};
