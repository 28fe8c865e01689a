use std::collections::HashSet;

pub fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Jaccard index of the lower-cased whitespace token sets of `a` and `b`.
///
/// Two inputs without any tokens score 0.0, never NaN.
pub fn similarity(a: &str, b: &str) -> f64 {
    jaccard(&word_set(a), &word_set(b))
}

pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_scores_one() {
        assert_eq!(similarity("use tabs not spaces", "use tabs not spaces"), 1.0);
    }

    #[test]
    fn symmetric() {
        let a = "Prefer explicit imports over globs";
        let b = "prefer globs in tests";
        assert_eq!(similarity(a, b), similarity(b, a));
    }

    #[test]
    fn disjoint_vocabulary_scores_zero() {
        assert_eq!(similarity("alpha beta", "gamma delta"), 0.0);
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("   \n\t ", ""), 0.0);
        assert_eq!(similarity("word", ""), 0.0);
    }

    #[test]
    fn case_and_whitespace_runs_are_normalised() {
        assert_eq!(similarity("Alpha   BETA\n\ngamma", "alpha beta gamma"), 1.0);
    }

    #[test]
    fn repeated_tokens_count_once() {
        assert_eq!(similarity("a a a b", "a b"), 1.0);
    }

    #[test]
    fn threshold_examples() {
        assert!((similarity("a b c d", "a b c e") - 0.6).abs() < 1e-12);
        assert!((similarity("a b c d", "a b c d e") - 0.8).abs() < 1e-12);
        assert!((similarity("a b c d e", "a b c d f") - 4.0 / 6.0).abs() < 1e-12);
        assert!((similarity("alpha beta", "alpha beta gamma") - 2.0 / 3.0).abs() < 1e-12);
    }
}
