//! `lessonPlan` rule
//!
//! A plan needs a title and at least one of: a `unit` object, `cards`, or
//! `content` entries. Icons inside cards and content entries must be
//! written in canonical kebab-case.

use serde_json::Value;

use super::canonical::{match_kebab, Canonical, ICONS};
use super::fields::{BlockContext, Field, Record};

pub fn validate(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    ctx.require_text(block, "title", "Block \"lessonPlan\" requires a \"title\".");

    let unit = block.field("unit");
    match unit {
        Field::Absent => {}
        Field::Record(map) => {
            let unit = Record::new(map);
            if !unit.has_text("title") {
                ctx.problem("Field \"unit.title\" must be a non-empty string.");
            }
            if !unit.has_text("content") {
                ctx.problem("Field \"unit.content\" must be a non-empty string.");
            }
        }
        _ => ctx.problem("Field \"unit\" must be an object with \"title\" and \"content\"."),
    }

    let cards = block.items("cards");
    let content = block.items("content");
    let has_unit = !matches!(unit, Field::Absent | Field::Null);
    if !has_unit && cards.is_empty() && content.is_empty() {
        ctx.problem(
            "Block \"lessonPlan\" must provide \"unit\", \"cards\" or \"content\" with at least one item.",
        );
    }

    check_icons(ctx, "cards", cards);
    check_icons(ctx, "content", content);
}

fn check_icons(ctx: &mut BlockContext<'_>, collection: &str, entries: &[Value]) {
    for (position, entry) in entries.iter().enumerate() {
        let Some(entry) = Record::from_value(entry) else {
            continue;
        };
        match entry.field("icon") {
            Field::Absent => {}
            Field::Text(icon) if !icon.trim().is_empty() => match match_kebab(icon, ICONS) {
                Canonical::Exact => {}
                Canonical::Recased(canonical) => ctx.problem(format!(
                    "Icon {}[{}].icon \"{}\" must be written in canonical form \"{}\".",
                    collection, position, icon, canonical
                )),
                Canonical::Unknown => ctx.problem(format!(
                    "Icon {}[{}].icon \"{}\" is not a supported icon.",
                    collection, position, icon
                )),
            },
            _ => ctx.problem(format!(
                "Icon {}[{}].icon must be a non-empty string.",
                collection, position
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

    fn run(block: Value) -> Vec<String> {
        let mut findings = Findings::new();
        let mut ctx = BlockContext {
            course: "algi",
            file: Path::new("lesson-01.json"),
            index: 2,
            findings: &mut findings,
        };
        validate(&Record::from_value(&block).unwrap(), &mut ctx);
        findings.problems.into_iter().map(|p| p.message).collect()
    }

    #[test]
    fn test_unit_only_plan_is_valid() {
        let block = json!({
            "type": "lessonPlan",
            "title": "Plano",
            "unit": { "title": "Unidade 1", "content": "Vetores" }
        });
        assert!(run(block).is_empty());
    }

    #[test]
    fn test_plan_without_any_body() {
        let problems = run(json!({ "type": "lessonPlan", "title": "Plano", "cards": [] }));
        assert_eq!(problems.len(), 1);
        assert!(problems[0].starts_with("content[2]: "));
    }

    #[test]
    fn test_unit_must_be_object() {
        let problems = run(json!({ "title": "Plano", "unit": "text", "content": [{}] }));
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("\"unit\""));
    }

    #[test]
    fn test_icon_casing_is_flagged() {
        let block = json!({
            "title": "Plano",
            "cards": [
                { "title": "A", "icon": "book-open" },
                { "title": "B", "icon": "bookOpen" },
                { "title": "C", "icon": "dragon" }
            ]
        });
        let problems = run(block);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("cards[1].icon"));
        assert!(problems[0].contains("\"book-open\""));
        assert!(problems[1].contains("cards[2].icon"));
    }
}
