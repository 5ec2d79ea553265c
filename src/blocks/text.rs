//! Rules for blocks whose contract is a handful of required fields

use super::fields::{BlockContext, Field, Record};

pub fn html(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    ctx.require_text(block, "html", "Block \"html\" requires a non-empty \"html\" field.");
}

pub fn legacy_section(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    ctx.require_text(
        block,
        "html",
        "Block \"legacySection\" requires a non-empty \"html\" field.",
    );
}

pub fn code(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    if !ctx.require_text(block, "code", "Block \"code\" requires a non-empty \"code\" field.") {
        return;
    }
    match block.field("language") {
        Field::Absent | Field::Text(_) => {}
        other => ctx.problem(format!(
            "Field \"language\" must be a string when present (got {}).",
            other.type_name()
        )),
    }
}

pub fn content_block(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    ctx.require_text(block, "title", "Block \"contentBlock\" requires a \"title\".");
    ctx.require_items(
        block,
        "content",
        "Block \"contentBlock\" requires a \"content\" array with at least one item.",
    );
}

pub fn checklist(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    ctx.require_text(block, "title", "Block \"checklist\" requires a \"title\".");
    ctx.require_items(
        block,
        "items",
        "Block \"checklist\" requires an \"items\" array with checklist entries.",
    );
}

pub fn flight_plan(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    ctx.require_text(block, "title", "Block \"flightPlan\" requires a \"title\".");
    ctx.require_items(
        block,
        "items",
        "Block \"flightPlan\" requires an \"items\" array with at least one item.",
    );
}

pub fn audio(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    ctx.require_text(block, "title", "Block \"audio\" requires a \"title\".");
    ctx.require_text(
        block,
        "src",
        "Block \"audio\" requires a \"src\" field with the audio URL.",
    );
}

/// Unlike `truthTable`, row widths are not checked
pub fn md3_table(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    ctx.require_items(
        block,
        "headers",
        "Block \"md3Table\" requires a \"headers\" array with at least one item.",
    );
    ctx.require_items(
        block,
        "rows",
        "Block \"md3Table\" requires a \"rows\" array with at least one row.",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::Findings;
    use serde_json::{json, Value};
    use std::path::Path;

    fn run(rule: fn(&Record<'_>, &mut BlockContext<'_>), block: Value) -> Vec<String> {
        let mut findings = Findings::new();
        let mut ctx = BlockContext {
            course: "algi",
            file: Path::new("lesson-01.json"),
            index: 0,
            findings: &mut findings,
        };
        rule(&Record::from_value(&block).unwrap(), &mut ctx);
        findings.problems.into_iter().map(|p| p.message).collect()
    }

    #[test]
    fn test_html_requires_content() {
        assert!(run(html, json!({ "type": "html", "html": "<p>x</p>" })).is_empty());
        assert_eq!(run(html, json!({ "type": "html", "html": "  " })).len(), 1);
    }

    #[test]
    fn test_code_language_must_be_string() {
        assert!(run(code, json!({ "code": "int x;", "language": "c" })).is_empty());
        let problems = run(code, json!({ "code": "int x;", "language": 7 }));
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("language"));
    }

    #[test]
    fn test_code_missing_skips_language_check() {
        let problems = run(code, json!({ "language": 7 }));
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("\"code\""));
    }

    #[test]
    fn test_audio_requires_title_and_src() {
        assert_eq!(run(audio, json!({})).len(), 2);
        assert!(run(audio, json!({ "title": "Intro", "src": "intro.mp3" })).is_empty());
    }

    #[test]
    fn test_md3_table_ignores_row_width() {
        let block = json!({ "headers": ["a", "b"], "rows": [["1"], ["1", "2", "3"]] });
        assert!(run(md3_table, block).is_empty());
    }
}
