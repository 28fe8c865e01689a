use crate::types::{FormatCounts, FormatVariant, RuleRecord};

use super::keys;

pub fn count_by_format(records: &[RuleRecord]) -> FormatCounts {
    records
        .iter()
        .fold(FormatCounts::default(), |mut counts, record| {
            match record.format {
                FormatVariant::Mdc => counts.mdc += 1,
                FormatVariant::Md => counts.md += 1,
            }
            counts
        })
}

/// Bucket key used by [`count_by_trigger`].
///
/// Falls back from `trigger` to `alwaysApply` to `"unknown"`. The second step
/// mixes two unrelated fields (a Windsurf activation mode and a Cursor boolean)
/// into one histogram; the order is kept because reports depend on it.
pub fn trigger_key(record: &RuleRecord) -> &str {
    record
        .meta(keys::TRIGGER)
        .or_else(|| record.meta(keys::ALWAYS_APPLY))
        .unwrap_or("unknown")
}

/// Count records per trigger key, keys ordered by first occurrence.
pub fn count_by_trigger(records: &[RuleRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        let key = trigger_key(record);
        match counts.iter_mut().find(|(k, _)| k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key.to_string(), 1)),
        }
    }
    counts
}
