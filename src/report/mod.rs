//! Validation report
//!
//! - `builder`: course- and file-grouped findings with the overall status
//! - `generation`: generation metadata rollup of exercises and supplements
//! - `metrics`: publication, block and metadata coverage per course

mod builder;
mod generation;
mod metrics;

pub use builder::{
    build_report, build_report_at, derive_lesson_id, relative_display, CourseReport, LessonReport,
    Report, ReportInput, ReportStatus, ReportedFinding, Totals, LESSONS_INDEX_ID,
};
pub use generation::{summarize, GenerationEntry, GenerationReport, GenerationSummary};
pub use metrics::{
    analyse_exercises, analyse_lessons, analyse_supplements, build_metrics, build_metrics_at,
    ArtifactMetrics, CourseMetrics, ExerciseMetrics, LessonMetrics, LessonTotals, MetricsReport,
    MetricsTotals, UNKNOWN_BLOCK_TYPE,
};
