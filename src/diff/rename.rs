//! Collapse of Remove/Add pairs into renames.

use super::change::{ChangeKind, SemanticChange};

/// Largest difference in line span for a Remove/Add pair to count as a rename.
pub const MAX_RENAME_SPAN_DELTA: usize = 2;

/// Replace matching Remove/Add pairs with Rename changes.
///
/// Matching is greedy first-fit: Removes are visited in list order and each
/// takes the first still-unmatched Add of the same node type whose line span
/// is within [`MAX_RENAME_SPAN_DELTA`]. This is not a minimum-cost
/// assignment. Only declarations with an identity on both sides pair up;
/// positional keys never match across edits. Renames are appended after the
/// surviving changes, in the order their Removes appeared.
pub(crate) fn collapse_renames(changes: Vec<SemanticChange>) -> Vec<SemanticChange> {
    let mut consumed = vec![false; changes.len()];
    let mut renames = Vec::new();

    for (remove_index, remove) in changes.iter().enumerate() {
        if remove.kind != ChangeKind::Remove || remove.old_identity.is_none() {
            continue;
        }
        let Some(old_span) = remove.node_info.as_ref().map(|i| i.line_span()) else {
            continue;
        };

        let candidate = changes.iter().enumerate().find(|(add_index, add)| {
            add.kind == ChangeKind::Add
                && add.new_identity.is_some()
                && !consumed[*add_index]
                && add.node_type == remove.node_type
                && add
                    .node_info
                    .as_ref()
                    .map(|i| i.line_span().abs_diff(old_span) <= MAX_RENAME_SPAN_DELTA)
                    .unwrap_or(false)
        });

        if let Some((add_index, add)) = candidate {
            tracing::trace!(
                "rename {:?} -> {:?} ({})",
                remove.old_identity,
                add.new_identity,
                remove.node_type
            );
            renames.push(SemanticChange::renamed(remove, add));
            consumed[add_index] = true;
            consumed[remove_index] = true;
        }
    }

    if !renames.is_empty() {
        tracing::debug!("collapsed {} remove/add pairs into renames", renames.len());
    }

    let mut result: Vec<SemanticChange> = changes
        .into_iter()
        .zip(consumed)
        .filter(|(_, used)| !used)
        .map(|(change, _)| change)
        .collect();
    result.extend(renames);
    result
}
