//! `callout` and `component` rules

use super::canonical::{describe, match_lowercase, Canonical, CALLOUT_VARIANTS};
use super::fields::{BlockContext, Field, Record};
use super::kind::SUPPORTED_COMPONENTS;
use crate::findings::FindingKind;

pub fn callout(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    if !block.field("content").is_renderable() {
        ctx.problem("Block \"callout\" requires \"content\" with text or structured content.");
    }

    match block.field("title") {
        Field::Absent | Field::Text(_) => {}
        _ => ctx.problem("Field \"title\" of block \"callout\" must be a string when present."),
    }

    let variant = match block.field("variant") {
        Field::Absent => return,
        Field::Text(variant) => variant,
        _ => {
            ctx.problem("Field \"variant\" of block \"callout\" must be a string when present.");
            return;
        }
    };
    match match_lowercase(variant, CALLOUT_VARIANTS) {
        Canonical::Exact => {}
        Canonical::Recased(canonical) => ctx.problem(format!(
            "Field \"variant\" of block \"callout\" must use the canonical form \"{}\" (found \"{}\").",
            canonical, variant
        )),
        Canonical::Unknown => ctx.problem(format!(
            "Field \"variant\" of block \"callout\" has unsupported value \"{}\". Allowed: {}.",
            variant,
            describe(CALLOUT_VARIANTS)
        )),
    }
}

/// Custom components are reported as `invalid-component`, not `block-field`
pub fn component(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    let Some(name) = block.field("component").non_empty_text() else {
        ctx.push(
            FindingKind::InvalidComponent,
            "Block \"component\" requires a \"component\" field with a valid name.",
        );
        return;
    };
    if !SUPPORTED_COMPONENTS.iter().any(|supported| *supported == name) {
        ctx.push(
            FindingKind::InvalidComponent,
            format!("Unsupported custom component \"{}\".", name),
        );
    }
}
