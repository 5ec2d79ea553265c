//! Problems and warnings discovered during validation
//!
//! - Problem: blocking, fails the run
//! - Warning: advisory, reported but never fails the run
//!
//! Every validator appends into a `Findings` buffer it owns or was lent.
//! Concurrent tasks each fill their own buffer; buffers are merged at the
//! join point with `Findings::merge`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Category of a finding, serialized as the report's `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    /// Required file absent
    Missing,
    /// `.vue` wrapper without its `.json` payload
    MissingJson,
    /// File could not be read
    Read,
    /// File is not valid JSON
    Parse,
    /// JSON-Schema violation or field of the wrong shape
    Schema,
    /// id does not match the file name or directory slug
    Mismatch,
    /// id does not follow the required pattern
    Pattern,
    /// Same id listed twice in one index
    Duplicate,
    /// Available entry does not reference the payload extension
    Extension,
    /// Text shorter than the required minimum
    Length,
    /// Value carries surrounding whitespace
    Whitespace,
    /// Institution outside the allow-list
    Institution,
    /// Block field missing or malformed
    BlockField,
    /// Block type neither supported nor legacy
    UnknownBlock,
    /// Legacy block type still in use
    LegacyBlock,
    /// `component` block with an unknown component name
    InvalidComponent,
    /// Advisory lesson metadata absent
    Metadata,
    /// `generatedBy` / `model` / `timestamp` absent or invalid
    GenerationMetadata,
    /// Link outside the course prefix and not absolute
    Link,
    /// Entry has neither `file` nor `link`
    Reference,
    /// Supplement `type` outside the allowed set
    SupplementType,
    /// Exercise without description
    Description,
}

impl FindingKind {
    /// Returns the string code used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::Missing => "missing",
            FindingKind::MissingJson => "missing-json",
            FindingKind::Read => "read",
            FindingKind::Parse => "parse",
            FindingKind::Schema => "schema",
            FindingKind::Mismatch => "mismatch",
            FindingKind::Pattern => "pattern",
            FindingKind::Duplicate => "duplicate",
            FindingKind::Extension => "extension",
            FindingKind::Length => "length",
            FindingKind::Whitespace => "whitespace",
            FindingKind::Institution => "institution",
            FindingKind::BlockField => "block-field",
            FindingKind::UnknownBlock => "unknown-block",
            FindingKind::LegacyBlock => "legacy-block",
            FindingKind::InvalidComponent => "invalid-component",
            FindingKind::Metadata => "metadata",
            FindingKind::GenerationMetadata => "generation-metadata",
            FindingKind::Link => "link",
            FindingKind::Reference => "reference",
            FindingKind::SupplementType => "supplement-type",
            FindingKind::Description => "description",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One self-contained finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub kind: FindingKind,
    /// File the finding refers to
    pub file: PathBuf,
    /// Course directory slug
    pub course: String,
    pub message: String,
}

impl Finding {
    pub fn new(
        kind: FindingKind,
        file: impl Into<PathBuf>,
        course: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            file: file.into(),
            course: course.into(),
            message: message.into(),
        }
    }
}

/// Append-only problem and warning buffers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub problems: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a blocking problem
    pub fn problem(
        &mut self,
        kind: FindingKind,
        file: &Path,
        course: &str,
        message: impl Into<String>,
    ) {
        self.problems.push(Finding::new(kind, file, course, message));
    }

    /// Records an advisory warning
    pub fn warning(
        &mut self,
        kind: FindingKind,
        file: &Path,
        course: &str,
        message: impl Into<String>,
    ) {
        self.warnings.push(Finding::new(kind, file, course, message));
    }

    /// Appends another buffer, keeping its order
    pub fn merge(&mut self, other: Findings) {
        self.problems.extend(other.problems);
        self.warnings.extend(other.warnings);
    }

    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// True if there are no problems and no warnings
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty() && self.warnings.is_empty()
    }

    /// Problems of one kind, for assertions and summaries
    pub fn problems_of(&self, kind: FindingKind) -> impl Iterator<Item = &Finding> {
        self.problems.iter().filter(move |f| f.kind == kind)
    }

    /// Warnings of one kind
    pub fn warnings_of(&self, kind: FindingKind) -> impl Iterator<Item = &Finding> {
        self.warnings.iter().filter(move |f| f.kind == kind)
    }
}
