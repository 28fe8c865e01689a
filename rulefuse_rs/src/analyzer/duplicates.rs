//! Pairwise duplicate detection.
//!
//! Every unordered pair `(i, j)`, `i < j` in input order, is checked twice:
//! once for an identical non-empty `description`, once for body similarity.
//! The two checks are independent, so one pair can yield two candidates.

use std::collections::HashSet;

use crate::similarity::{jaccard, word_set};
use crate::types::{DuplicateCandidate, DuplicateReason, RuleRecord};

use super::keys;

/// Bodies must score strictly above this to be reported.
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

pub fn find_duplicates(records: &[RuleRecord]) -> Vec<DuplicateCandidate> {
    // Token sets are built once per record; the pairwise scores are unchanged.
    let word_sets: Vec<HashSet<String>> = records.iter().map(|r| word_set(&r.body)).collect();
    let mut duplicates = Vec::new();

    for i in 0..records.len() {
        for j in (i + 1)..records.len() {
            let (a, b) = (&records[i], &records[j]);

            if let (Some(desc_a), Some(desc_b)) =
                (a.meta(keys::DESCRIPTION), b.meta(keys::DESCRIPTION))
                && desc_a == desc_b
            {
                duplicates.push(DuplicateCandidate {
                    file_a: a.source_path.clone(),
                    file_b: b.source_path.clone(),
                    reason: DuplicateReason::SameDescription,
                    description: Some(desc_a.to_string()),
                    similarity: None,
                    similarity_percent: None,
                });
            }

            let score = jaccard(&word_sets[i], &word_sets[j]);
            if score > SIMILARITY_THRESHOLD {
                duplicates.push(DuplicateCandidate {
                    file_a: a.source_path.clone(),
                    file_b: b.source_path.clone(),
                    reason: DuplicateReason::SimilarContent,
                    description: None,
                    similarity: Some(score),
                    similarity_percent: Some(round_percent(score)),
                });
            }
        }
    }

    duplicates
}

fn round_percent(score: f64) -> f64 {
    (score * 1000.0).round() / 10.0
}
