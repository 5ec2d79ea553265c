//! `cardGrid` rule
//!
//! Cards come from the modern `cards[]` list or the legacy `items[]` list.
//! Both share the per-card contract; `variant` is only meaningful on legacy
//! items, where it is checked against the callout variants plus the
//! deprecated `best-practice` alias.

use serde_json::Value;

use super::canonical::{
    describe, match_lowercase, Canonical, CALLOUT_VARIANTS, DEPRECATED_VARIANT,
    DEPRECATED_VARIANT_REPLACEMENT, TONES,
};
use super::fields::{BlockContext, Field, Record};

const MAX_COLUMNS: u64 = 4;

/// Fields that give a card a body
const BODY_FIELDS: &[&str] = &["content", "description", "body", "footer"];

pub fn validate(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    check_columns(block, ctx);

    let cards = block.items("cards");
    let items = block.items("items");
    if cards.is_empty() && items.is_empty() {
        ctx.problem("Block \"cardGrid\" requires \"cards\" or \"items\" with at least one card.");
    }

    for (position, card) in cards.iter().enumerate() {
        check_card(ctx, "cards", position, card, false);
    }
    for (position, item) in items.iter().enumerate() {
        check_card(ctx, "items", position, item, true);
    }
}

fn check_columns(block: &Record<'_>, ctx: &mut BlockContext<'_>) {
    let columns = match block.field("columns") {
        Field::Absent => return,
        Field::Scalar(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        _ => None,
    };
    match columns {
        Some(count) if (1..=MAX_COLUMNS).contains(&count) => {}
        _ => ctx.problem(format!(
            "Field \"columns\" of block \"cardGrid\" must be an integer between 1 and {}.",
            MAX_COLUMNS
        )),
    }
}

fn check_card(ctx: &mut BlockContext<'_>, collection: &str, position: usize, card: &Value, legacy: bool) {
    let Some(card) = Record::from_value(card) else {
        ctx.problem(format!(
            "Card {}[{}] of block \"cardGrid\" must be an object.",
            collection, position
        ));
        return;
    };
    let at = format!("{}[{}]", collection, position);

    if !card.has_text("title") {
        ctx.problem(format!("Card {} of block \"cardGrid\" requires a non-empty \"title\".", at));
    }

    for optional in ["subtitle", "badge", "icon"] {
        let field = card.field(optional);
        if !field.is_absent() && field.non_empty_text().is_none() {
            ctx.problem(format!(
                "Field {}.{} of block \"cardGrid\" must be a non-empty string when present.",
                at, optional
            ));
        }
    }

    check_tone(ctx, &at, card.field("tone"));

    let variant = card.field("variant");
    if legacy {
        check_item_variant(ctx, &at, variant);
    } else if !variant.is_absent() {
        ctx.problem(format!(
            "Field {}.variant is not supported on \"cards\"; use \"tone\" instead.",
            at
        ));
    }

    let actions = card.items("actions");
    for (action_position, action) in actions.iter().enumerate() {
        check_action(ctx, &at, action_position, action);
    }

    let has_body = BODY_FIELDS.iter().any(|name| card.field(name).is_renderable())
        || !card.items("items").is_empty()
        || !actions.is_empty();
    if !has_body {
        ctx.problem(format!(
            "Card {} of block \"cardGrid\" requires \"content\", \"description\", \"body\", \"footer\", \"items\" or \"actions\".",
            at
        ));
    }
}

fn check_tone(ctx: &mut BlockContext<'_>, at: &str, tone: Field<'_>) {
    let tone = match tone {
        Field::Absent => return,
        Field::Text(tone) => tone,
        other => {
            ctx.problem(format!(
                "Field {}.tone must be a string (got {}).",
                at,
                other.type_name()
            ));
            return;
        }
    };
    match match_lowercase(tone, TONES) {
        Canonical::Exact => {}
        Canonical::Recased(canonical) => ctx.problem(format!(
            "Field {}.tone \"{}\" must be lowercase: use \"{}\".",
            at, tone, canonical
        )),
        Canonical::Unknown => ctx.problem(format!(
            "Field {}.tone \"{}\" is not supported. Allowed: {}.",
            at,
            tone,
            describe(TONES)
        )),
    }
}

fn check_item_variant(ctx: &mut BlockContext<'_>, at: &str, variant: Field<'_>) {
    let variant = match variant {
        Field::Absent => return,
        Field::Text(variant) => variant,
        other => {
            ctx.problem(format!(
                "Field {}.variant must be a string (got {}).",
                at,
                other.type_name()
            ));
            return;
        }
    };

    if variant.to_lowercase() == DEPRECATED_VARIANT {
        ctx.problem(format!(
            "Field {}.variant \"{}\" is deprecated: use \"{}\".",
            at, variant, DEPRECATED_VARIANT_REPLACEMENT
        ));
        return;
    }

    match match_lowercase(variant, CALLOUT_VARIANTS) {
        Canonical::Exact => {}
        Canonical::Recased(canonical) => ctx.problem(format!(
            "Field {}.variant \"{}\" must be lowercase: use \"{}\".",
            at, variant, canonical
        )),
        Canonical::Unknown => ctx.problem(format!(
            "Field {}.variant \"{}\" is not supported. Allowed: {}.",
            at,
            variant,
            describe(CALLOUT_VARIANTS)
        )),
    }
}

fn check_action(ctx: &mut BlockContext<'_>, at: &str, position: usize, action: &Value) {
    let Some(action) = Record::from_value(action) else {
        ctx.problem(format!(
            "Action {}.actions[{}] must be an object with \"label\" and \"href\".",
            at, position
        ));
        return;
    };
    for required in ["label", "href"] {
        if !action.has_text(required) {
            ctx.problem(format!(
                "Action {}.actions[{}] requires a non-empty \"{}\".",
                at, position, required
            ));
        }
    }
    match action.field("external") {
        Field::Absent | Field::Scalar(Value::Bool(_)) => {}
        _ => ctx.problem(format!(
            "Field {}.actions[{}].external must be a boolean when present.",
            at, position
        )),
    }
}
