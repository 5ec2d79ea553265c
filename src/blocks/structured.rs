//! Rules for blocks built from lists of sub-entries
//!
//! Each rule stops after the "list is empty" problem; per-entry checks only
//! run on a non-empty list.

use serde_json::Value;

use super::fields::{BlockContext, Field, Record};

pub fn videos(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    ctx.require_text(block, "title", "Video block requires a \"title\".");
    let videos = block.items("videos");
    if videos.is_empty() {
        ctx.problem("Video block requires a \"videos\" array with at least one item.");
        return;
    }

    for (position, video) in videos.iter().enumerate() {
        let Some(video) = Record::from_value(video) else {
            ctx.problem(format!(
                "Item videos[{}] must be an object with \"src\", \"url\" or \"youtubeId\".",
                position
            ));
            continue;
        };
        if !["src", "url", "youtubeId"].iter().any(|name| video.has_text(name)) {
            ctx.problem(format!(
                "Item videos[{}] must provide \"src\", \"url\" or \"youtubeId\" with a valid identifier.",
                position
            ));
        }
    }
}

pub fn bibliography(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    ctx.require_text(block, "title", "Block \"bibliography\" requires a \"title\".");

    let lists = ["items", "content", "references"].map(|name| (name, block.items(name)));
    if lists.iter().all(|(_, entries)| entries.is_empty()) {
        ctx.problem(
            "Block \"bibliography\" requires \"items\", \"content\" or \"references\" with at least one reference.",
        );
        return;
    }

    for (name, entries) in lists {
        for (position, entry) in entries.iter().enumerate() {
            if !is_reference(entry) {
                ctx.problem(format!(
                    "Reference {}[{}] must be a non-empty string or an object with a non-empty \"html\".",
                    name, position
                ));
            }
        }
    }
}

fn is_reference(entry: &Value) -> bool {
    match Field::of(Some(entry)) {
        Field::Text(text) => !text.trim().is_empty(),
        Field::Record(map) => Record::new(map).has_text("html"),
        _ => false,
    }
}

pub fn timeline(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    ctx.require_text(block, "title", "Block \"timeline\" requires a \"title\".");
    let steps = block.items("steps");
    if steps.is_empty() {
        ctx.problem("Block \"timeline\" requires a \"steps\" array with at least one step.");
        return;
    }

    for (position, step) in steps.iter().enumerate() {
        let Some(step) = Record::from_value(step) else {
            ctx.problem(format!(
                "Step steps[{}] of block \"timeline\" must be an object with \"title\" and \"content\".",
                position
            ));
            continue;
        };
        if !step.has_text("title") {
            ctx.problem(format!(
                "Step steps[{}] of block \"timeline\" requires a non-empty \"title\".",
                position
            ));
        }
        if !step.has_text("content") {
            ctx.problem(format!(
                "Step steps[{}] of block \"timeline\" requires a non-empty \"content\".",
                position
            ));
        }
    }
}

pub fn accordion(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    let items = block.items("items");
    if items.is_empty() {
        ctx.problem("Block \"accordion\" requires an \"items\" array with at least one item.");
        return;
    }

    for (position, item) in items.iter().enumerate() {
        let Some(item) = Record::from_value(item) else {
            ctx.problem(format!(
                "Item items[{}] of block \"accordion\" must be an object with \"title\" and \"content\".",
                position
            ));
            continue;
        };
        if !item.has_text("title") {
            ctx.problem(format!(
                "Item items[{}] of block \"accordion\" requires a non-empty \"title\".",
                position
            ));
        }
        if !item.field("content").is_renderable() {
            ctx.problem(format!(
                "Item items[{}] of block \"accordion\" requires \"content\" with text or structured content.",
                position
            ));
        }
    }
}

pub fn representations(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    ctx.require_text(block, "title", "Block \"representations\" requires a \"title\".");
    let items = block.items("items");
    if items.is_empty() {
        ctx.problem("Block \"representations\" requires an \"items\" array with at least one element.");
        return;
    }

    for (position, item) in items.iter().enumerate() {
        let Some(item) = Record::from_value(item) else {
            ctx.problem(format!(
                "Item items[{}] of block \"representations\" must be an object with \"title\" and \"content\".",
                position
            ));
            continue;
        };
        if !item.has_text("title") {
            ctx.problem(format!(
                "Item items[{}] of block \"representations\" requires a non-empty \"title\".",
                position
            ));
        }
        if !item.has_text("content") {
            ctx.problem(format!(
                "Item items[{}] of block \"representations\" requires a non-empty \"content\".",
                position
            ));
        }
    }
}

/// Every row must be an array exactly as wide as `headers`
pub fn truth_table(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    ctx.require_text(block, "title", "Block \"truthTable\" requires a \"title\".");
    let headers = ctx.require_items(
        block,
        "headers",
        "Block \"truthTable\" requires a \"headers\" array with at least one item.",
    );
    let rows = block.items("rows");
    if rows.is_empty() {
        ctx.problem("Block \"truthTable\" requires a \"rows\" array with at least one row.");
        return;
    }

    for (position, row) in rows.iter().enumerate() {
        match row {
            Value::Array(cells) => {
                if !headers.is_empty() && cells.len() != headers.len() {
                    ctx.problem(format!(
                        "Row rows[{}] of block \"truthTable\" must have {} columns to match the headers (found {}).",
                        position,
                        headers.len(),
                        cells.len()
                    ));
                }
            }
            _ => ctx.problem(format!(
                "Row rows[{}] of block \"truthTable\" must be an array of values or cell objects.",
                position
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::Findings;
    use serde_json::json;
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
    fn test_videos_need_an_identifier() {
        let block = json!({
            "title": "Aulas",
            "videos": [{ "youtubeId": "abc" }, { "title": "no id" }, "raw"]
        });
        let problems = run(videos, block);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("videos[1]"));
        assert!(problems[1].contains("videos[2]"));
    }

    #[test]
    fn test_bibliography_entries() {
        let block = json!({
            "title": "Referências",
            "references": ["Knuth, TAOCP", { "html": "<em>SICP</em>" }, { "html": " " }, 3]
        });
        let problems = run(bibliography, block);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("references[2]"));
        assert!(problems[1].contains("references[3]"));
    }

    #[test]
    fn test_bibliography_without_lists() {
        let problems = run(bibliography, json!({ "title": "Referências", "items": "x" }));
        assert_eq!(problems.len(), 1);
    }

    #[test]
    fn test_timeline_steps() {
        let block = json!({
            "title": "Etapas",
            "steps": [{ "title": "1", "content": "a" }, { "title": "", "content": "b" }, 5]
        });
        let problems = run(timeline, block);
        assert_eq!(problems.len(), 2);
    }

    #[test]
    fn test_accordion_accepts_structured_content() {
        let block = json!({
            "items": [{ "title": "A", "content": [{ "type": "html" }] }, { "title": "B", "content": {} }]
        });
        let problems = run(accordion, block);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("items[1]"));
    }

    #[test]
    fn test_representations_content_must_be_text() {
        let block = json!({ "title": "R", "items": [{ "title": "A", "content": ["x"] }] });
        assert_eq!(run(representations, block).len(), 1);
    }

    #[test]
    fn test_truth_table_one_problem_per_bad_row() {
        let block = json!({
            "title": "AND",
            "headers": ["A", "B", "C", "A∧B∧C"],
            "rows": [["V", "V", "V", "V"], ["V", "F"], "nope", ["F", "F", "F", "F", "F"]]
        });
        let problems = run(truth_table, block);
        assert_eq!(problems.len(), 3);
        assert!(problems[0].contains("rows[1]"));
        assert!(problems[1].contains("rows[2]"));
        assert!(problems[2].contains("rows[3]"));
    }

    #[test]
    fn test_truth_table_without_headers_skips_width() {
        let block = json!({ "title": "T", "rows": [["a"], ["a", "b"]] });
        let problems = run(truth_table, block);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("headers"));
    }
}
