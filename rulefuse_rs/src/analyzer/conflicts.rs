use crate::types::{ConflictCandidate, RuleRecord};

use super::keys;

/// Shown in place of a missing trigger value.
pub const UNSET_TRIGGER: &str = "(unset)";

/// Pairs of glob-scoped rules that share a pattern but disagree on `trigger`.
///
/// Only records with a non-empty `globs` value take part. A missing trigger
/// on one side and a present one on the other counts as a disagreement.
pub fn find_conflicts(records: &[RuleRecord]) -> Vec<ConflictCandidate> {
    let scoped: Vec<(&RuleRecord, &str)> = records
        .iter()
        .filter_map(|r| r.meta(keys::GLOBS).map(|glob| (r, glob)))
        .collect();

    let mut conflicts = Vec::new();
    for (i, (a, glob_a)) in scoped.iter().enumerate() {
        for (b, glob_b) in &scoped[i + 1..] {
            if glob_a != glob_b {
                continue;
            }
            let trigger_a = a.raw_meta(keys::TRIGGER);
            let trigger_b = b.raw_meta(keys::TRIGGER);
            if trigger_a == trigger_b {
                continue;
            }
            conflicts.push(ConflictCandidate {
                file_a: a.source_path.clone(),
                file_b: b.source_path.clone(),
                glob: glob_a.to_string(),
                trigger_a: trigger_a.unwrap_or(UNSET_TRIGGER).to_string(),
                trigger_b: trigger_b.unwrap_or(UNSET_TRIGGER).to_string(),
            });
        }
    }
    conflicts
}
