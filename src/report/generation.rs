//! Generation metadata rollup
//!
//! Per course and per artifact kind: how many entries carry complete
//! generation metadata, who and which model produced them, and the time
//! span they were produced in.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::documents::{entry_id, has_generation_field, parse_iso, ArtifactKind, GENERATION_FIELDS};

/// One entry of the rollup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationEntry {
    pub id: String,
    pub generated_by: Option<String>,
    pub model: Option<String>,
    pub timestamp: Option<String>,
    pub available: bool,
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
}

/// Rollup of one index of one course
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSummary {
    pub course: String,
    pub total: usize,
    pub with_metadata: usize,
    pub missing_metadata: usize,
    pub by_generator: BTreeMap<String, usize>,
    pub by_model: BTreeMap<String, usize>,
    pub earliest_timestamp: Option<String>,
    pub latest_timestamp: Option<String>,
    pub entries: Vec<GenerationEntry>,
}

/// Summarizes the entries of one exercises or supplements index.
pub fn summarize(course: &str, entries: &[Value]) -> GenerationSummary {
    let mut summary = GenerationSummary {
        course: course.to_string(),
        total: entries.len(),
        with_metadata: 0,
        missing_metadata: 0,
        by_generator: BTreeMap::new(),
        by_model: BTreeMap::new(),
        earliest_timestamp: None,
        latest_timestamp: None,
        entries: Vec::with_capacity(entries.len()),
    };
    let mut earliest: Option<(String, DateTime<Utc>)> = None;
    let mut latest: Option<(String, DateTime<Utc>)> = None;

    for entry in entries {
        let metadata = entry.get("metadata");
        let text = |field: &str| {
            metadata
                .and_then(|m| m.get(field))
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        let generated_by = text("generatedBy");
        let model = text("model");
        let timestamp = text("timestamp");

        if GENERATION_FIELDS
            .iter()
            .all(|field| has_generation_field(entry, field))
        {
            summary.with_metadata += 1;
        } else {
            summary.missing_metadata += 1;
        }
        if let Some(generator) = &generated_by {
            *summary.by_generator.entry(generator.clone()).or_default() += 1;
        }
        if let Some(model) = &model {
            *summary.by_model.entry(model.clone()).or_default() += 1;
        }
        if let Some((raw, at)) = timestamp.as_ref().and_then(|raw| Some((raw, parse_iso(raw)?))) {
            if earliest.as_ref().map_or(true, |(_, first)| at < *first) {
                earliest = Some((raw.clone(), at));
            }
            if latest.as_ref().map_or(true, |(_, last)| at > *last) {
                latest = Some((raw.clone(), at));
            }
        }

        summary.entries.push(GenerationEntry {
            id: entry_id(entry).unwrap_or_default().to_string(),
            generated_by,
            model,
            timestamp,
            available: entry.get("available").and_then(Value::as_bool).unwrap_or(false),
            entry_type: entry.get("type").and_then(Value::as_str).map(str::to_string),
        });
    }

    summary.entries.sort_by(|a, b| a.id.cmp(&b.id));
    summary.earliest_timestamp = earliest.map(|(raw, _)| raw);
    summary.latest_timestamp = latest.map(|(raw, _)| raw);
    summary
}

/// Rollups of every course, per artifact kind, sorted by course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub exercises: Vec<GenerationSummary>,
    pub supplements: Vec<GenerationSummary>,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the summary of one course index, keeping course order.
    pub fn push(&mut self, kind: ArtifactKind, summary: GenerationSummary) {
        let target = match kind {
            ArtifactKind::Exercises => &mut self.exercises,
            ArtifactKind::Supplements => &mut self.supplements,
        };
        let at = target.partition_point(|existing| existing.course <= summary.course);
        target.insert(at, summary);
    }

    pub fn of(&self, kind: ArtifactKind) -> &[GenerationSummary] {
        match kind {
            ArtifactKind::Exercises => &self.exercises,
            ArtifactKind::Supplements => &self.supplements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_counts() {
        let entries = vec![
            json!({ "id": "ex-2", "available": true, "metadata": {
                "generatedBy": "workbench", "model": "gpt-4o", "timestamp": "2024-05-02T00:00:00Z" } }),
            json!({ "id": "ex-1", "metadata": {
                "generatedBy": "workbench", "model": "claude", "timestamp": "2024-04-30" } }),
            json!({ "id": "ex-3", "metadata": { "generatedBy": "manual" } }),
        ];
        let summary = summarize("algi", &entries);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.with_metadata, 2);
        assert_eq!(summary.missing_metadata, 1);
        assert_eq!(summary.by_generator.get("workbench"), Some(&2));
        assert_eq!(summary.by_generator.get("manual"), Some(&1));
        assert_eq!(summary.by_model.len(), 2);
        assert_eq!(summary.earliest_timestamp.as_deref(), Some("2024-04-30"));
        assert_eq!(summary.latest_timestamp.as_deref(), Some("2024-05-02T00:00:00Z"));

        let ids: Vec<_> = summary.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["ex-1", "ex-2", "ex-3"]);
        assert!(summary.entries[1].available);
    }

    #[test]
    fn test_invalid_timestamp_counts_as_missing() {
        let entries = vec![json!({ "id": "s-1", "type": "video", "metadata": {
            "generatedBy": "a", "model": "b", "timestamp": "soon" } })];
        let summary = summarize("algi", &entries);
        assert_eq!(summary.missing_metadata, 1);
        assert_eq!(summary.earliest_timestamp, None);
        assert_eq!(summary.entries[0].entry_type.as_deref(), Some("video"));
    }

    #[test]
    fn test_report_keeps_courses_sorted() {
        let mut report = GenerationReport::new();
        report.push(ArtifactKind::Exercises, summarize("poo", &[]));
        report.push(ArtifactKind::Exercises, summarize("algi", &[]));
        report.push(ArtifactKind::Supplements, summarize("ddm", &[]));

        let courses: Vec<_> = report.exercises.iter().map(|s| s.course.as_str()).collect();
        assert_eq!(courses, vec!["algi", "poo"]);
        assert_eq!(report.of(ArtifactKind::Supplements).len(), 1);
    }

    #[test]
    fn test_serialized_shape() {
        let summary = summarize("algi", &[json!({ "id": "ex-1" })]);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["withMetadata"], 0);
        assert_eq!(value["missingMetadata"], 1);
        assert!(value["earliestTimestamp"].is_null());
        assert_eq!(value["entries"][0]["type"], Value::Null);
        assert_eq!(value["entries"][0]["generatedBy"], Value::Null);
    }
}
