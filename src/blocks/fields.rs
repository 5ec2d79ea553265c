//! Typed views over block JSON
//!
//! A block field is narrowed once into `Field`, so every rule can tell an
//! absent field from one of the wrong shape. Lists of the wrong shape read as
//! empty; strings are "missing" when empty after trimming.

use std::fmt::Display;
use std::path::Path;

use serde_json::{Map, Value};

use crate::findings::{FindingKind, Findings};

/// One field of a block, narrowed by JSON shape
#[derive(Debug, Clone, Copy)]
pub enum Field<'a> {
    Absent,
    Null,
    Text(&'a str),
    List(&'a [Value]),
    Record(&'a Map<String, Value>),
    /// Number or boolean
    Scalar(&'a Value),
}

impl<'a> Field<'a> {
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None => Field::Absent,
            Some(Value::Null) => Field::Null,
            Some(Value::String(s)) => Field::Text(s),
            Some(Value::Array(items)) => Field::List(items),
            Some(Value::Object(map)) => Field::Record(map),
            Some(other) => Field::Scalar(other),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// The string value if it has non-whitespace content
    pub fn non_empty_text(&self) -> Option<&'a str> {
        match *self {
            Field::Text(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }

    /// List items, or an empty slice for anything that is not a list
    pub fn items(&self) -> &'a [Value] {
        match *self {
            Field::List(items) => items,
            _ => &[],
        }
    }

    /// Non-empty text, a non-empty list or a non-empty object
    pub fn is_renderable(&self) -> bool {
        match *self {
            Field::Text(s) => !s.trim().is_empty(),
            Field::List(items) => !items.is_empty(),
            Field::Record(map) => !map.is_empty(),
            _ => false,
        }
    }

    /// JSON type name for messages
    pub fn type_name(&self) -> &'static str {
        match *self {
            Field::Absent => "absent",
            Field::Null => "null",
            Field::Text(_) => "string",
            Field::List(_) => "array",
            Field::Record(_) => "object",
            Field::Scalar(Value::Bool(_)) => "boolean",
            Field::Scalar(_) => "number",
        }
    }
}

/// Read-only view of one JSON object (a block or an entry inside it)
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// Narrows a value into a record if it is a JSON object
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    pub fn field(&self, name: &str) -> Field<'a> {
        Field::of(self.map.get(name))
    }

    pub fn text(&self, name: &str) -> Option<&'a str> {
        self.field(name).non_empty_text()
    }

    pub fn has_text(&self, name: &str) -> bool {
        self.text(name).is_some()
    }

    pub fn items(&self, name: &str) -> &'a [Value] {
        self.field(name).items()
    }
}

/// Where a block sits and where its problems go
pub struct BlockContext<'a> {
    pub course: &'a str,
    pub file: &'a Path,
    /// Position inside the lesson's `content` array
    pub index: usize,
    pub findings: &'a mut Findings,
}

impl<'a> BlockContext<'a> {
    /// Records a `block-field` problem prefixed with `content[index]:`
    pub fn problem(&mut self, message: impl Display) {
        self.push(FindingKind::BlockField, message);
    }

    /// Records a problem of another kind, same prefix
    pub fn push(&mut self, kind: FindingKind, message: impl Display) {
        let message = format!("content[{}]: {}", self.index, message);
        self.findings.problem(kind, self.file, self.course, message);
    }

    /// Requires a non-empty string field; returns whether it was present
    pub fn require_text(&mut self, block: &Record<'_>, name: &str, message: impl Display) -> bool {
        if block.has_text(name) {
            true
        } else {
            self.problem(message);
            false
        }
    }

    /// Requires a non-empty list field; returns its items
    pub fn require_items<'b>(
        &mut self,
        block: &Record<'b>,
        name: &str,
        message: impl Display,
    ) -> &'b [Value] {
        let items = block.items(name);
        if items.is_empty() {
            self.problem(message);
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_whitespace_only_is_missing() {
        let value = json!("   \n\t");
        assert_eq!(Field::of(Some(&value)).non_empty_text(), None);
        let value = json!(" x ");
        assert_eq!(Field::of(Some(&value)).non_empty_text(), Some(" x "));
    }

    #[test]
    fn test_non_list_reads_as_empty() {
        let value = json!({ "a": 1 });
        assert!(Field::of(Some(&value)).items().is_empty());
        assert!(Field::of(None).items().is_empty());
    }

    #[test]
    fn test_absent_differs_from_null() {
        let null = Value::Null;
        assert!(Field::of(None).is_absent());
        assert!(!Field::of(Some(&null)).is_absent());
        assert_eq!(Field::of(Some(&null)).type_name(), "null");
    }

    #[test]
    fn test_renderable() {
        let cases = [
            (json!("text"), true),
            (json!(""), false),
            (json!([]), false),
            (json!([1]), true),
            (json!({}), false),
            (json!({ "html": "<p/>" }), true),
            (json!(12), false),
        ];
        for (value, expected) in cases {
            assert_eq!(Field::of(Some(&value)).is_renderable(), expected, "{}", value);
        }
    }

    #[test]
    fn test_context_prefixes_index() {
        let mut findings = Findings::new();
        let mut ctx = BlockContext {
            course: "algi",
            file: Path::new("lesson-01.json"),
            index: 3,
            findings: &mut findings,
        };
        ctx.problem("broken");

        assert_eq!(findings.problems[0].message, "content[3]: broken");
        assert_eq!(findings.problems[0].kind, FindingKind::BlockField);
    }
}
