//! Embedded JSON-Schema registry
//!
//! The four document schemas ship with the crate and are compiled once per
//! process. Index schemas describe the `entries` array of a manifest, so a
//! legacy bare array and a versioned object validate the same way.

use std::sync::OnceLock;

use jsonschema::JSONSchema;
use serde_json::Value;

const LESSON_SCHEMA: &str = include_str!("../../schemas/lesson.schema.json");
const LESSONS_INDEX_SCHEMA: &str = include_str!("../../schemas/lessons-index.schema.json");
const EXERCISES_INDEX_SCHEMA: &str = include_str!("../../schemas/exercises-index.schema.json");
const SUPPLEMENTS_INDEX_SCHEMA: &str = include_str!("../../schemas/supplements-index.schema.json");

/// Document kinds with an embedded schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Lesson,
    LessonsIndex,
    ExercisesIndex,
    SupplementsIndex,
}

impl SchemaKind {
    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::Lesson => "lesson",
            SchemaKind::LessonsIndex => "lessons-index",
            SchemaKind::ExercisesIndex => "exercises-index",
            SchemaKind::SupplementsIndex => "supplements-index",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            SchemaKind::Lesson => LESSON_SCHEMA,
            SchemaKind::LessonsIndex => LESSONS_INDEX_SCHEMA,
            SchemaKind::ExercisesIndex => EXERCISES_INDEX_SCHEMA,
            SchemaKind::SupplementsIndex => SUPPLEMENTS_INDEX_SCHEMA,
        }
    }
}

/// A compiled schema, or the reason it failed to compile
type Compiled = Result<JSONSchema, String>;

struct Registry {
    lesson: Compiled,
    lessons_index: Compiled,
    exercises_index: Compiled,
    supplements_index: Compiled,
}

impl Registry {
    fn load() -> Self {
        Self {
            lesson: compile(SchemaKind::Lesson),
            lessons_index: compile(SchemaKind::LessonsIndex),
            exercises_index: compile(SchemaKind::ExercisesIndex),
            supplements_index: compile(SchemaKind::SupplementsIndex),
        }
    }

    fn get(&self, kind: SchemaKind) -> &Compiled {
        match kind {
            SchemaKind::Lesson => &self.lesson,
            SchemaKind::LessonsIndex => &self.lessons_index,
            SchemaKind::ExercisesIndex => &self.exercises_index,
            SchemaKind::SupplementsIndex => &self.supplements_index,
        }
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn compile(kind: SchemaKind) -> Compiled {
    let schema: Value = serde_json::from_str(kind.source())
        .map_err(|e| format!("{} schema is not valid JSON: {}", kind.name(), e))?;
    JSONSchema::compile(&schema)
        .map_err(|e| format!("{} schema failed to compile: {}", kind.name(), e))
}

/// Validates `instance` against the schema for `kind`.
///
/// # Errors
///
/// Returns one line per violation, formatted `<instance path>: <error>`
/// and joined with newlines.
pub fn check(kind: SchemaKind, instance: &Value) -> Result<(), String> {
    let compiled = REGISTRY.get_or_init(Registry::load).get(kind);
    let schema = compiled.as_ref().map_err(Clone::clone)?;

    let result = schema.validate(instance);
    if let Err(errors) = result {
        let lines: Vec<String> = errors
            .map(|error| {
                let path = error.instance_path.to_string();
                let path = if path.is_empty() { "/".to_string() } else { path };
                format!("{}: {}", path, error)
            })
            .collect();
        return Err(lines.join("\n"));
    }
    Ok(())
}
