//! Block Rule Tests
//!
//! Content blocks validated through a whole lesson document:
//! - canonical casing of enumerated values
//! - deprecated card variants
//! - truth table row width
//! - legacy and unknown block types

use std::path::Path;

use lessonguard::documents::validate_lesson;
use lessonguard::findings::{Finding, FindingKind, Findings};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

const LESSON_PATH: &str = "courses/algi/lessons/lesson-01.json";

fn validate_blocks(blocks: Value) -> Findings {
    let lesson = json!({
        "id": "lesson-01",
        "title": "Variáveis",
        "content": blocks
    });
    let mut findings = Findings::new();
    validate_lesson("algi", Path::new(LESSON_PATH), &lesson, &mut findings);
    findings
}

fn block_problems(findings: &Findings) -> Vec<&Finding> {
    findings
        .problems
        .iter()
        .filter(|p| p.kind == FindingKind::BlockField)
        .collect()
}

// =============================================================================
// Canonical Casing Tests
// =============================================================================

/// A recognised callout variant in the wrong case is one problem naming the canonical form.
#[test]
fn test_callout_variant_casing() {
    let findings = validate_blocks(json!([
        { "type": "callout", "content": "x", "variant": "Info" }
    ]));

    assert_eq!(findings.problems.len(), 1);
    let problem = &findings.problems[0];
    assert_eq!(problem.kind, FindingKind::BlockField);
    assert!(problem.message.starts_with("content[0]: "));
    assert!(problem.message.contains("\"info\""));
}

/// Casing mismatch and unknown value are reported differently.
#[test]
fn test_callout_unknown_variant_is_distinct_from_casing() {
    let findings = validate_blocks(json!([
        { "type": "callout", "content": "x", "variant": "INFO" },
        { "type": "callout", "content": "x", "variant": "danger" }
    ]));

    let problems = block_problems(&findings);
    assert_eq!(problems.len(), 2);
    assert!(problems[0].message.contains("canonical form \"info\""));
    assert!(problems[1].message.contains("unsupported value \"danger\""));
}

/// Card tones must already be lowercase.
#[test]
fn test_card_tone_casing() {
    let findings = validate_blocks(json!([
        { "type": "cardGrid", "cards": [{ "title": "A", "body": "x", "tone": "Primary" }] }
    ]));

    let problems = block_problems(&findings);
    assert_eq!(problems.len(), 1);
    assert!(problems[0].message.contains("use \"primary\""));
}

// =============================================================================
// Card Grid Tests
// =============================================================================

/// The deprecated alias is flagged and the replacement recommended.
#[test]
fn test_card_grid_deprecated_variant() {
    let findings = validate_blocks(json!([
        { "type": "cardGrid", "items": [{ "title": "A", "variant": "best-practice", "content": "x" }] }
    ]));

    assert_eq!(findings.problems.len(), 1);
    assert!(findings.problems[0].message.contains("\"good-practice\""));
}

/// Columns outside 1..=4 are rejected.
#[test]
fn test_card_grid_columns_range() {
    for columns in [json!(0), json!(5), json!(2.5), json!("3")] {
        let findings = validate_blocks(json!([
            { "type": "cardGrid", "columns": columns, "cards": [{ "title": "A", "body": "x" }] }
        ]));
        assert_eq!(block_problems(&findings).len(), 1, "columns = {}", columns);
    }

    let findings = validate_blocks(json!([
        { "type": "cardGrid", "columns": 4, "cards": [{ "title": "A", "body": "x" }] }
    ]));
    assert!(findings.problems.is_empty());
}

/// Every action needs a label and an href.
#[test]
fn test_card_grid_actions() {
    let findings = validate_blocks(json!([
        {
            "type": "cardGrid",
            "cards": [{
                "title": "A",
                "actions": [{ "label": "Abrir" }, { "label": "Docs", "href": "/d", "external": "yes" }]
            }]
        }
    ]));

    let problems = block_problems(&findings);
    assert_eq!(problems.len(), 2);
    assert!(problems[0].message.contains("actions[0]"));
    assert!(problems[1].message.contains("external"));
}

// =============================================================================
// Truth Table Tests
// =============================================================================

/// Exactly one problem per row whose width differs from the header count.
#[test]
fn test_truth_table_row_width() {
    let findings = validate_blocks(json!([
        {
            "type": "truthTable",
            "title": "AND",
            "headers": ["A", "B", "C", "S"],
            "rows": [
                ["V", "V", "V", "V"],
                ["V", "V", "F"],
                ["V", "F", "F", "F", "F"],
                ["F", "F", "F", "F"]
            ]
        }
    ]));

    let problems = block_problems(&findings);
    assert_eq!(problems.len(), 2);
    assert!(problems[0].message.contains("rows[1]"));
    assert!(problems[1].message.contains("rows[2]"));
}

/// md3Table has no per-row width rule.
#[test]
fn test_md3_table_rows_unchecked() {
    let findings = validate_blocks(json!([
        { "type": "md3Table", "headers": ["A", "B"], "rows": [["1"], ["1", "2", "3"]] }
    ]));
    assert!(findings.problems.is_empty());
}

// =============================================================================
// Block Type Classification Tests
// =============================================================================

/// Legacy blocks warn and are not validated further.
#[test]
fn test_legacy_block_warns() {
    let findings = validate_blocks(json!([
        { "type": "quiz" },
        { "type": "dragAndDrop" },
        { "type": "fileTree" }
    ]));

    assert!(findings.problems.is_empty());
    assert_eq!(findings.warnings_of(FindingKind::LegacyBlock).count(), 3);
}

/// Types are case-sensitive: an unknown spelling is a problem.
#[test]
fn test_unknown_block_is_problem() {
    let findings = validate_blocks(json!([
        { "type": "html", "html": "<p>ok</p>" },
        { "type": "HTML", "html": "<p>ok</p>" }
    ]));

    let unknown: Vec<_> = findings.problems_of(FindingKind::UnknownBlock).collect();
    assert_eq!(unknown.len(), 1);
    assert!(unknown[0].message.contains("content[1]"));
}

/// Component blocks accept only known custom components.
#[test]
fn test_component_allow_list() {
    let findings = validate_blocks(json!([
        { "type": "component", "component": "CardGrid" },
        { "type": "component", "component": "FancyWidget" },
        { "type": "component" }
    ]));

    assert_eq!(findings.problems_of(FindingKind::InvalidComponent).count(), 2);
}

/// Whitespace-only strings count as missing.
#[test]
fn test_whitespace_is_missing() {
    let findings = validate_blocks(json!([
        { "type": "html", "html": "   " },
        { "type": "audio", "title": "\t", "src": "a.mp3" }
    ]));

    let problems = block_problems(&findings);
    assert_eq!(problems.len(), 2);
    assert!(problems[0].message.starts_with("content[0]:"));
    assert!(problems[1].message.starts_with("content[1]:"));
}

/// Bibliography entries must be strings or objects with html.
#[test]
fn test_bibliography_entries() {
    let findings = validate_blocks(json!([
        { "type": "bibliography", "title": "Refs", "references": ["ok", { "html": "ok" }, { "text": "no" }, ""] }
    ]));
    assert_eq!(block_problems(&findings).len(), 2);
}
