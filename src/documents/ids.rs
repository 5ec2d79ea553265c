//! Id helpers shared by the index validators

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::findings::{FindingKind, Findings};

/// The `id` of an index entry, if it is a string
pub fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

/// Ids listed more than once, with every position they appear at.
///
/// Ordered by first appearance.
pub fn duplicate_ids(entries: &[Value]) -> Vec<(&str, Vec<usize>)> {
    let mut positions: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    let mut order = Vec::new();
    for (position, entry) in entries.iter().enumerate() {
        let Some(id) = entry_id(entry) else {
            continue;
        };
        let seen = positions.entry(id).or_default();
        if seen.is_empty() {
            order.push(id);
        }
        seen.push(position);
    }

    order
        .into_iter()
        .filter_map(|id| {
            let at = positions.remove(id)?;
            (at.len() > 1).then_some((id, at))
        })
        .collect()
}

/// One `duplicate` problem per repeated id, naming every position.
pub fn report_duplicates(
    course: &str,
    path: &Path,
    label: &str,
    entries: &[Value],
    findings: &mut Findings,
) {
    for (id, positions) in duplicate_ids(entries) {
        let positions: Vec<String> = positions.iter().map(|p| format!("entries[{}]", p)).collect();
        findings.problem(
            FindingKind::Duplicate,
            path,
            course,
            format!(
                "Duplicated {} id \"{}\" at {}.",
                label,
                id,
                positions.join(" and ")
            ),
        );
    }
}
