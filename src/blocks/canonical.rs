//! Allow-lists and canonical-form checks for enumerated block values
//!
//! A value can be recognized but written in a non-canonical form
//! (`"Info"` for `"info"`, `"bookOpen"` for `"book-open"`). That is reported
//! separately from an unrecognized value, so authors get the exact fix.

/// Icons accepted by lesson plans and card grids (kebab-case)
pub const ICONS: &[&str] = &[
    "alert-triangle",
    "book",
    "book-open",
    "calendar",
    "check-circle",
    "clipboard-list",
    "clock",
    "code",
    "compass",
    "flag",
    "graduation-cap",
    "home",
    "house",
    "info",
    "layout-dashboard",
    "lightbulb",
    "list-checks",
    "puzzle",
    "rocket",
    "settings",
    "shield-check",
    "target",
    "users",
];

/// Callout variants, also the modern card-grid item variants
pub const CALLOUT_VARIANTS: &[&str] = &["info", "good-practice", "academic", "warning", "task", "error"];

/// Deprecated alias still found on legacy `cardGrid.items[].variant`
pub const DEPRECATED_VARIANT: &str = "best-practice";

/// Replacement for `DEPRECATED_VARIANT`
pub const DEPRECATED_VARIANT_REPLACEMENT: &str = "good-practice";

/// Card tones
pub const TONES: &[&str] = &[
    "primary",
    "secondary",
    "tertiary",
    "success",
    "info",
    "warning",
    "danger",
    "neutral",
];

/// Outcome of matching a value against an allow-list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Canonical {
    /// Value is already the canonical form
    Exact,
    /// Value is recognized but must be written as the contained form
    Recased(&'static str),
    /// Value is not recognized at all
    Unknown,
}

/// Case-insensitive match; only the lowercase form is canonical
pub fn match_lowercase(value: &str, allowed: &[&'static str]) -> Canonical {
    let lowered = value.to_lowercase();
    match allowed.iter().copied().find(|candidate| *candidate == lowered) {
        Some(canonical) if canonical == value => Canonical::Exact,
        Some(canonical) => Canonical::Recased(canonical),
        None => Canonical::Unknown,
    }
}

/// Separator-insensitive match; only the kebab-case form is canonical
pub fn match_kebab(value: &str, allowed: &[&'static str]) -> Canonical {
    let normalized = to_kebab_case(value);
    match allowed.iter().copied().find(|candidate| *candidate == normalized) {
        Some(canonical) if canonical == value => Canonical::Exact,
        Some(canonical) => Canonical::Recased(canonical),
        None => Canonical::Unknown,
    }
}

/// `checkCircle`, `check_circle`, `Check Circle` all become `check-circle`
pub fn to_kebab_case(value: &str) -> String {
    let mut output = String::with_capacity(value.len() + 4);
    let mut after_lower_or_digit = false;

    for c in value.trim().chars() {
        if c == '-' || c == '_' || c.is_whitespace() {
            if !output.is_empty() && !output.ends_with('-') {
                output.push('-');
            }
            after_lower_or_digit = false;
            continue;
        }

        if c.is_uppercase() {
            if after_lower_or_digit && !output.ends_with('-') {
                output.push('-');
            }
            output.extend(c.to_lowercase());
            after_lower_or_digit = false;
        } else {
            output.push(c);
            after_lower_or_digit = c.is_lowercase() || c.is_ascii_digit();
        }
    }

    while output.ends_with('-') {
        output.pop();
    }
    output
}

/// Quoted, comma-separated list for messages
pub fn describe(allowed: &[&str]) -> String {
    allowed
        .iter()
        .map(|v| format!("\"{}\"", v))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case_conversions() {
        assert_eq!(to_kebab_case("checkCircle"), "check-circle");
        assert_eq!(to_kebab_case("BookOpen"), "book-open");
        assert_eq!(to_kebab_case("clipboard_list"), "clipboard-list");
        assert_eq!(to_kebab_case("  Graduation Cap "), "graduation-cap");
        assert_eq!(to_kebab_case("layout--dashboard"), "layout-dashboard");
        assert_eq!(to_kebab_case("house"), "house");
    }

    #[test]
    fn test_match_lowercase() {
        assert_eq!(match_lowercase("info", CALLOUT_VARIANTS), Canonical::Exact);
        assert_eq!(match_lowercase("Info", CALLOUT_VARIANTS), Canonical::Recased("info"));
        assert_eq!(match_lowercase("GOOD-PRACTICE", CALLOUT_VARIANTS), Canonical::Recased("good-practice"));
        assert_eq!(match_lowercase("note", CALLOUT_VARIANTS), Canonical::Unknown);
    }

    #[test]
    fn test_match_kebab() {
        assert_eq!(match_kebab("book-open", ICONS), Canonical::Exact);
        assert_eq!(match_kebab("bookOpen", ICONS), Canonical::Recased("book-open"));
        assert_eq!(match_kebab("shield_check", ICONS), Canonical::Recased("shield-check"));
        assert_eq!(match_kebab("unicorn", ICONS), Canonical::Unknown);
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&["a", "b"]), "\"a\", \"b\"");
    }
}
