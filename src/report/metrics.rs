//! Content metrics report
//!
//! How much of each course is published, how many lesson blocks use the
//! MD3 components versus legacy ones, and how many exercises and
//! supplements carry complete generation metadata. Unlike the validation
//! report this never fails a document: unreadable payloads are skipped.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::blocks::{BlockKind, BlockType};
use crate::documents::{entry_id, has_generation_field, GENERATION_FIELDS};
use crate::manifest::iso_timestamp;

/// Key used in `blocksByType` for blocks without a string `type`
pub const UNKNOWN_BLOCK_TYPE: &str = "unknown";

/// Block counters of the metrics report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockFamily {
    Md3,
    Legacy,
    Other,
}

/// `html` counts as legacy here, next to the retired interactive blocks.
/// `legacySection` and unknown types count towards the total only.
fn block_family(type_name: &str) -> BlockFamily {
    match BlockType::classify(type_name) {
        BlockType::Legacy(_) | BlockType::Supported(BlockKind::Html) => BlockFamily::Legacy,
        BlockType::Supported(BlockKind::LegacySection) => BlockFamily::Other,
        BlockType::Supported(_) => BlockFamily::Md3,
        BlockType::Unknown(_) => BlockFamily::Other,
    }
}

fn is_available(entry: &Value) -> bool {
    entry.get("available").and_then(Value::as_bool) != Some(false)
}

fn has_complete_metadata(entry: &Value) -> bool {
    GENERATION_FIELDS
        .iter()
        .all(|field| has_generation_field(entry, field))
}

/// Lesson metrics of one course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonMetrics {
    pub total: usize,
    pub available: usize,
    pub unavailable: usize,
    pub total_blocks: usize,
    pub md3_blocks: usize,
    pub legacy_blocks: usize,
    pub legacy_lessons: usize,
    pub legacy_lesson_ids: Vec<String>,
    pub blocks_by_type: BTreeMap<String, usize>,
    pub legacy_blocks_by_type: BTreeMap<String, usize>,
}

/// Exercise metrics of one course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseMetrics {
    pub total: usize,
    pub available: usize,
    pub with_metadata: usize,
    /// Exercises whose payload still holds a `legacySection` block
    pub legacy_entries: usize,
    pub legacy_ids: Vec<String>,
}

/// Counters shared by supplements and the run-wide totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMetrics {
    pub total: usize,
    pub available: usize,
    pub with_metadata: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseMetrics {
    pub id: String,
    pub title: Option<String>,
    pub institution: Option<String>,
    pub lessons: LessonMetrics,
    pub exercises: ExerciseMetrics,
    pub supplements: ArtifactMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonTotals {
    pub total: usize,
    pub available: usize,
    pub unavailable: usize,
    pub legacy_lessons: usize,
    pub md3_blocks: usize,
    pub legacy_blocks: usize,
    pub total_blocks: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsTotals {
    pub courses: usize,
    pub lessons: LessonTotals,
    pub exercises: ArtifactMetrics,
    pub supplements: ArtifactMetrics,
}

/// The `content-observability.json` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub generated_at: String,
    pub totals: MetricsTotals,
    pub courses: Vec<CourseMetrics>,
}

/// Lesson metrics from the index entries and the lesson payloads keyed by id.
///
/// Every entry counts towards `total`; availability is only read from
/// object entries, and `available` defaults to true. Blocks are only read
/// for entries naming both an `id` and a `file`.
pub fn analyse_lessons(index: &[Value], payloads: &BTreeMap<String, Value>) -> LessonMetrics {
    let mut metrics = LessonMetrics {
        total: index.len(),
        ..LessonMetrics::default()
    };
    let mut legacy_lessons = BTreeSet::new();

    for entry in index.iter().filter(|entry| entry.is_object()) {
        if is_available(entry) {
            metrics.available += 1;
        } else {
            metrics.unavailable += 1;
        }

        let Some(id) = entry_id(entry) else {
            continue;
        };
        if entry.get("file").and_then(Value::as_str).is_none() {
            continue;
        }
        let Some(blocks) = payloads
            .get(id)
            .and_then(|lesson| lesson.get("content"))
            .and_then(Value::as_array)
        else {
            continue;
        };

        for block in blocks.iter().filter(|block| block.is_object()) {
            let type_name = block
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN_BLOCK_TYPE);
            *metrics.blocks_by_type.entry(type_name.to_string()).or_default() += 1;
            metrics.total_blocks += 1;

            match block_family(type_name) {
                BlockFamily::Legacy => {
                    metrics.legacy_blocks += 1;
                    *metrics
                        .legacy_blocks_by_type
                        .entry(type_name.to_string())
                        .or_default() += 1;
                    legacy_lessons.insert(id.to_string());
                }
                BlockFamily::Md3 => metrics.md3_blocks += 1,
                BlockFamily::Other => {}
            }
        }
    }

    metrics.legacy_lessons = legacy_lessons.len();
    metrics.legacy_lesson_ids = legacy_lessons.into_iter().collect();
    metrics
}

/// Exercise metrics from the index entries and the exercise payloads keyed by id.
pub fn analyse_exercises(entries: &[Value], payloads: &BTreeMap<String, Value>) -> ExerciseMetrics {
    let mut metrics = ExerciseMetrics {
        total: entries.len(),
        ..ExerciseMetrics::default()
    };
    let mut legacy_ids = BTreeSet::new();

    for entry in entries.iter().filter(|entry| entry.is_object()) {
        if is_available(entry) {
            metrics.available += 1;
        }
        if has_complete_metadata(entry) {
            metrics.with_metadata += 1;
        }

        let Some(id) = entry_id(entry) else {
            continue;
        };
        let has_legacy_section = payloads
            .get(id)
            .and_then(|exercise| exercise.get("content"))
            .and_then(Value::as_array)
            .is_some_and(|blocks| {
                blocks.iter().any(|block| {
                    block.get("type").and_then(Value::as_str)
                        == Some(BlockKind::LegacySection.as_str())
                })
            });
        if has_legacy_section && legacy_ids.insert(id.to_string()) {
            metrics.legacy_entries += 1;
        }
    }

    metrics.legacy_ids = legacy_ids.into_iter().collect();
    metrics
}

pub fn analyse_supplements(entries: &[Value]) -> ArtifactMetrics {
    let mut metrics = ArtifactMetrics {
        total: entries.len(),
        ..ArtifactMetrics::default()
    };
    for entry in entries.iter().filter(|entry| entry.is_object()) {
        if is_available(entry) {
            metrics.available += 1;
        }
        if has_complete_metadata(entry) {
            metrics.with_metadata += 1;
        }
    }
    metrics
}

impl CourseMetrics {
    /// `title` and `institution` are taken from the course meta when they are strings.
    pub fn new(
        id: &str,
        meta: Option<&Value>,
        lessons: LessonMetrics,
        exercises: ExerciseMetrics,
        supplements: ArtifactMetrics,
    ) -> Self {
        let text = |field: &str| {
            meta.and_then(|meta| meta.get(field))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            id: id.to_string(),
            title: text("title"),
            institution: text("institution"),
            lessons,
            exercises,
            supplements,
        }
    }
}

impl MetricsTotals {
    fn add(&mut self, course: &CourseMetrics) {
        let lessons = &course.lessons;
        self.lessons.total += lessons.total;
        self.lessons.available += lessons.available;
        self.lessons.unavailable += lessons.unavailable;
        self.lessons.legacy_lessons += lessons.legacy_lessons;
        self.lessons.md3_blocks += lessons.md3_blocks;
        self.lessons.legacy_blocks += lessons.legacy_blocks;
        self.lessons.total_blocks += lessons.total_blocks;

        self.exercises.total += course.exercises.total;
        self.exercises.available += course.exercises.available;
        self.exercises.with_metadata += course.exercises.with_metadata;

        self.supplements.total += course.supplements.total;
        self.supplements.available += course.supplements.available;
        self.supplements.with_metadata += course.supplements.with_metadata;
    }
}

pub fn build_metrics(courses: Vec<CourseMetrics>) -> MetricsReport {
    build_metrics_at(courses, Utc::now())
}

/// Builds the report with a fixed timestamp. Courses are sorted by id.
pub fn build_metrics_at(mut courses: Vec<CourseMetrics>, now: DateTime<Utc>) -> MetricsReport {
    courses.sort_by(|a, b| a.id.cmp(&b.id));
    let mut totals = MetricsTotals {
        courses: courses.len(),
        ..MetricsTotals::default()
    };
    for course in &courses {
        totals.add(course);
    }
    MetricsReport {
        generated_at: iso_timestamp(now),
        totals,
        courses,
    }
}

impl MetricsReport {
    /// Share of MD3 blocks among all lesson blocks, in percent
    pub fn md3_share(&self) -> f64 {
        percent(self.totals.lessons.md3_blocks, self.totals.lessons.total_blocks)
    }

    /// Share of legacy blocks among all lesson blocks, in percent
    pub fn legacy_share(&self) -> f64 {
        percent(self.totals.lessons.legacy_blocks, self.totals.lessons.total_blocks)
    }

    /// One line per course and index with entries lacking generation metadata.
    pub fn metadata_gaps(&self) -> Vec<String> {
        let mut gaps = Vec::new();
        for course in &self.courses {
            let indexes = [
                ("exercise", course.exercises.total, course.exercises.with_metadata),
                ("supplement", course.supplements.total, course.supplements.with_metadata),
            ];
            for (label, total, with_metadata) in indexes {
                if total > with_metadata {
                    gaps.push(format!(
                        "Course {}: {} {}(s) without generation metadata ({}).",
                        course.id,
                        total - with_metadata,
                        label,
                        GENERATION_FIELDS.join("/")
                    ));
                }
            }
        }
        gaps
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn metadata() -> Value {
        json!({ "generatedBy": "pipeline", "model": "m1", "timestamp": "2024-05-01T09:00:00Z" })
    }

    #[test]
    fn test_block_families() {
        assert_eq!(block_family("callout"), BlockFamily::Md3);
        assert_eq!(block_family("truthTable"), BlockFamily::Md3);
        assert_eq!(block_family("html"), BlockFamily::Legacy);
        assert_eq!(block_family("quiz"), BlockFamily::Legacy);
        assert_eq!(block_family("legacySection"), BlockFamily::Other);
        assert_eq!(block_family("slideshow"), BlockFamily::Other);
    }

    #[test]
    fn test_analyse_lessons() {
        let index = vec![
            json!({ "id": "lesson-01", "file": "lesson-01.json", "available": true }),
            json!({ "id": "lesson-02", "file": "lesson-02.json", "available": false }),
            json!({ "id": "lesson-03", "file": "lesson-03.json" }),
            json!({ "id": "lesson-04" }),
            json!("stray"),
        ];
        let mut payloads = BTreeMap::new();
        payloads.insert(
            "lesson-01".to_string(),
            json!({ "content": [
                { "type": "callout" },
                { "type": "html" },
                { "type": "quiz" },
                { "kind": "mystery" },
                "not a block"
            ] }),
        );
        payloads.insert(
            "lesson-02".to_string(),
            json!({ "content": [{ "type": "code" }, { "type": "legacySection" }] }),
        );
        payloads.insert("lesson-04".to_string(), json!({ "content": [{ "type": "html" }] }));

        let metrics = analyse_lessons(&index, &payloads);
        assert_eq!(metrics.total, 5);
        assert_eq!(metrics.available, 3);
        assert_eq!(metrics.unavailable, 1);
        assert_eq!(metrics.total_blocks, 6);
        assert_eq!(metrics.md3_blocks, 2);
        assert_eq!(metrics.legacy_blocks, 2);
        assert_eq!(metrics.legacy_lesson_ids, vec!["lesson-01"]);
        assert_eq!(metrics.legacy_lessons, 1);
        assert_eq!(metrics.blocks_by_type.get(UNKNOWN_BLOCK_TYPE), Some(&1));
        assert_eq!(metrics.legacy_blocks_by_type.get("quiz"), Some(&1));
        assert_eq!(metrics.legacy_blocks_by_type.get("code"), None);
    }

    #[test]
    fn test_analyse_exercises_and_supplements() {
        let entries = vec![
            json!({ "id": "ex-01", "available": true, "metadata": metadata() }),
            json!({ "id": "ex-02", "available": false, "metadata": { "generatedBy": "a", "model": "m" } }),
            json!({ "id": "ex-03" }),
        ];
        let mut payloads = BTreeMap::new();
        payloads.insert(
            "ex-02".to_string(),
            json!({ "content": [{ "type": "legacySection" }, { "type": "legacySection" }] }),
        );

        let exercises = analyse_exercises(&entries, &payloads);
        assert_eq!(exercises.total, 3);
        assert_eq!(exercises.available, 2);
        assert_eq!(exercises.with_metadata, 1);
        assert_eq!(exercises.legacy_entries, 1);
        assert_eq!(exercises.legacy_ids, vec!["ex-02"]);

        let supplements = analyse_supplements(&entries);
        assert_eq!(
            supplements,
            ArtifactMetrics { total: 3, available: 2, with_metadata: 1 }
        );
    }

    #[test]
    fn test_totals_and_gaps() {
        let course = |id: &str, with_metadata: usize| {
            CourseMetrics::new(
                id,
                Some(&json!({ "title": "Algoritmos I", "institution": 7 })),
                LessonMetrics {
                    total: 2,
                    available: 1,
                    unavailable: 1,
                    total_blocks: 4,
                    md3_blocks: 3,
                    legacy_blocks: 1,
                    ..LessonMetrics::default()
                },
                ExerciseMetrics {
                    total: 2,
                    with_metadata,
                    ..ExerciseMetrics::default()
                },
                ArtifactMetrics::default(),
            )
        };

        let report = build_metrics_at(
            vec![course("poo", 1), course("algi", 2)],
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        );
        assert_eq!(report.generated_at, "2025-03-01T12:00:00.000Z");
        assert_eq!(report.courses[0].id, "algi");
        assert_eq!(report.courses[0].title.as_deref(), Some("Algoritmos I"));
        assert_eq!(report.courses[0].institution, None);
        assert_eq!(report.totals.courses, 2);
        assert_eq!(report.totals.lessons.total_blocks, 8);
        assert_eq!(report.totals.exercises.with_metadata, 3);
        assert!((report.md3_share() - 75.0).abs() < f64::EPSILON);
        assert!((report.legacy_share() - 25.0).abs() < f64::EPSILON);

        let gaps = report.metadata_gaps();
        assert_eq!(
            gaps,
            vec!["Course poo: 1 exercise(s) without generation metadata (generatedBy/model/timestamp)."]
        );
    }

    #[test]
    fn test_empty_report_shares_are_zero() {
        let report = build_metrics(Vec::new());
        assert_eq!(report.md3_share(), 0.0);
        assert!(report.metadata_gaps().is_empty());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["totals"]["lessons"]["md3Blocks"], json!(0));
    }
}
