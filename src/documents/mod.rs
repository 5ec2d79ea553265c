//! Document validators
//!
//! One validator per document kind of a course directory:
//! - `meta.json`: course identity and description
//! - `lessons.json`: lesson index (ids, file names, payload extension)
//! - `exercises.json` / `supplements.json`: generated artifact indexes
//! - `lessons/*.json`: lesson payloads, down to every content block
//!
//! Validators never fail. Read, parse and schema failures are recorded as
//! problems and the validator returns an empty entry list.

mod dates;
mod existence;
mod generated_index;
mod ids;
mod lesson;
mod lessons_index;
mod meta;
mod schemas;
mod source;

pub use dates::{is_iso_date, parse_iso};
pub use existence::{check_lesson_files, check_payload_files};
pub use generated_index::{
    course_link_prefix, has_generation_field, is_absolute_url, validate_generated_index,
    validate_generated_index_file, ArtifactKind, GENERATION_FIELDS, SUPPLEMENT_TYPES,
};
pub use ids::{duplicate_ids, entry_id};
pub use lesson::{validate_lesson, validate_lesson_file};
pub use lessons_index::{
    is_lesson_id, validate_lessons_index, validate_lessons_index_file, LESSON_ID_PATTERN,
};
pub use meta::{validate_meta, validate_meta_file, INSTITUTIONS};
pub use schemas::{check as check_schema, SchemaKind};
