//! Block validators
//!
//! One structural rule per supported block kind. Each rule inspects one
//! content block and appends zero or more problems through `BlockContext`,
//! every message prefixed with `content[index]:`.
//!
//! Classification of the `type` string (supported / legacy / unknown)
//! happens in the lesson validator; only supported kinds reach
//! `validate_block`.

mod callout;
mod canonical;
mod card_grid;
mod fields;
mod kind;
mod lesson_plan;
mod structured;
mod text;

pub use canonical::{
    match_kebab, match_lowercase, to_kebab_case, Canonical, CALLOUT_VARIANTS, DEPRECATED_VARIANT,
    ICONS, TONES,
};
pub use fields::{BlockContext, Field, Record};
pub use kind::{BlockKind, BlockType, LegacyKind, SUPPORTED_COMPONENTS};

/// Runs the rule for `kind` against one block.
pub fn validate_block(kind: BlockKind, block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    match kind {
        BlockKind::Html => text::html(block, ctx),
        BlockKind::LegacySection => text::legacy_section(block, ctx),
        BlockKind::Code => text::code(block, ctx),
        BlockKind::ContentBlock => text::content_block(block, ctx),
        BlockKind::Checklist => text::checklist(block, ctx),
        BlockKind::FlightPlan => text::flight_plan(block, ctx),
        BlockKind::Audio | BlockKind::AudioBlock => text::audio(block, ctx),
        BlockKind::Md3Table => text::md3_table(block, ctx),
        BlockKind::LessonPlan => lesson_plan::validate(block, ctx),
        BlockKind::Videos | BlockKind::VideosBlock => structured::videos(block, ctx),
        BlockKind::Bibliography | BlockKind::BibliographyBlock => structured::bibliography(block, ctx),
        BlockKind::Timeline => structured::timeline(block, ctx),
        BlockKind::Accordion => structured::accordion(block, ctx),
        BlockKind::Representations => structured::representations(block, ctx),
        BlockKind::TruthTable => structured::truth_table(block, ctx),
        BlockKind::CardGrid => card_grid::validate(block, ctx),
        BlockKind::Callout => callout::callout(block, ctx),
        BlockKind::Component => callout::component(block, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::Findings;
    use serde_json::json;
    use std::path::Path;

    #[test]
    fn test_minimal_valid_block_for_every_kind() {
        let samples = [
            json!({ "type": "html", "html": "<p>x</p>" }),
            json!({ "type": "code", "code": "x = 1" }),
            json!({ "type": "lessonPlan", "title": "P", "content": [{ "title": "a" }] }),
            json!({ "type": "contentBlock", "title": "T", "content": [{ "type": "paragraph" }] }),
            json!({ "type": "videos", "title": "V", "videos": [{ "url": "https://v" }] }),
            json!({ "type": "videosBlock", "title": "V", "videos": [{ "src": "v.mp4" }] }),
            json!({ "type": "checklist", "title": "C", "items": ["a"] }),
            json!({ "type": "bibliography", "title": "B", "items": ["ref"] }),
            json!({ "type": "bibliographyBlock", "title": "B", "content": [{ "html": "ref" }] }),
            json!({ "type": "cardGrid", "cards": [{ "title": "A", "body": "x" }] }),
            json!({ "type": "callout", "content": "x", "variant": "task" }),
            json!({ "type": "timeline", "title": "T", "steps": [{ "title": "a", "content": "b" }] }),
            json!({ "type": "flightPlan", "title": "F", "items": ["a"] }),
            json!({ "type": "accordion", "items": [{ "title": "a", "content": "b" }] }),
            json!({ "type": "representations", "title": "R", "items": [{ "title": "a", "content": "b" }] }),
            json!({ "type": "truthTable", "title": "T", "headers": ["A"], "rows": [["V"]] }),
            json!({ "type": "audio", "title": "A", "src": "a.mp3" }),
            json!({ "type": "audioBlock", "title": "A", "src": "a.mp3" }),
            json!({ "type": "md3Table", "headers": ["A"], "rows": [["1"]] }),
            json!({ "type": "component", "component": "OrderedList" }),
            json!({ "type": "legacySection", "html": "<section/>" }),
        ];
        assert_eq!(samples.len(), BlockKind::ALL.len());

        for sample in &samples {
            let kind = BlockKind::parse(sample["type"].as_str().unwrap()).unwrap();
            let mut findings = Findings::new();
            let mut ctx = BlockContext {
                course: "algi",
                file: Path::new("lesson-01.json"),
                index: 0,
                findings: &mut findings,
            };
            validate_block(kind, &Record::from_value(sample).unwrap(), &mut ctx);
            assert!(findings.is_clean(), "{}: {:?}", kind, findings.problems);
        }
    }
}
