//! Local rule analysis: counts, duplicate candidates and conflict candidates.
//!
//! Everything here is a pure function of the record slice. No I/O, no
//! configuration, no clock. Absent or empty metadata keys are treated as
//! absent, never as errors.

pub mod conflicts;
pub mod counts;
pub mod duplicates;

use crate::types::{AnalysisReport, RuleRecord};

pub use conflicts::find_conflicts;
pub use counts::{count_by_format, count_by_trigger, trigger_key};
pub use duplicates::{SIMILARITY_THRESHOLD, find_duplicates};

/// Metadata keys the analyzer reads.
pub mod keys {
    pub const DESCRIPTION: &str = "description";
    pub const TRIGGER: &str = "trigger";
    pub const ALWAYS_APPLY: &str = "alwaysApply";
    pub const GLOBS: &str = "globs";
}

/// Build the full report for one run.
pub fn analyze(records: &[RuleRecord]) -> AnalysisReport {
    let report = AnalysisReport {
        total: records.len(),
        by_format: count_by_format(records),
        by_trigger: count_by_trigger(records),
        duplicates: find_duplicates(records),
        conflicts: find_conflicts(records),
    };
    tracing::debug!(
        total = report.total,
        duplicates = report.duplicates.len(),
        conflicts = report.conflicts.len(),
        "local analysis finished"
    );
    report
}


#[cfg(test)]
mod tests {
    use super::test_support::rule;
    use super::*;
    use crate::types::DuplicateReason;

    #[test]
    fn empty_input_yields_empty_report() {
        let report = analyze(&[]);
        assert_eq!(report.total, 0);
        assert_eq!(report.by_format.total(), 0);
        assert!(report.by_trigger.is_empty());
        assert!(report.duplicates.is_empty());
        assert!(report.conflicts.is_empty());
        assert!(!report.has_findings());
    }

    #[test]
    fn worked_example_from_two_formatter_rules() {
        let records = vec![
            rule(
                "fmt-a.mdc",
                &[("description", "fmt"), ("trigger", "auto"), ("globs", "*.ts")],
                "alpha beta",
            ),
            rule(
                "fmt-b.md",
                &[
                    ("description", "fmt"),
                    ("trigger", "manual"),
                    ("globs", "*.ts"),
                ],
                "alpha beta gamma",
            ),
        ];

        let report = analyze(&records);
        assert_eq!(report.total, 2);
        assert_eq!(report.by_format.mdc, 1);
        assert_eq!(report.by_format.md, 1);
        assert_eq!(
            report.by_trigger,
            vec![("auto".to_string(), 1), ("manual".to_string(), 1)]
        );

        // 2/3 similarity stays under the threshold, so only the description fires.
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.duplicates[0].reason, DuplicateReason::SameDescription);
        assert_eq!(report.duplicates[0].description.as_deref(), Some("fmt"));

        assert_eq!(report.conflicts.len(), 1);
        let conflict = &report.conflicts[0];
        assert_eq!(conflict.file_a, "fmt-a.mdc");
        assert_eq!(conflict.file_b, "fmt-b.md");
        assert_eq!(conflict.glob, "*.ts");
        assert_eq!(conflict.trigger_a, "auto");
        assert_eq!(conflict.trigger_b, "manual");
    }

    #[test]
    fn candidates_only_reference_input_records() {
        let records = vec![
            rule("a.md", &[("description", "x")], "one two three"),
            rule("b.md", &[("description", "x")], "one two three"),
            rule("c.md", &[("globs", "*.rs"), ("trigger", "a")], "z"),
            rule("d.md", &[("globs", "*.rs"), ("trigger", "b")], "y"),
        ];
        let report = analyze(&records);
        let paths: Vec<&str> = records.iter().map(|r| r.source_path.as_str()).collect();
        for dup in &report.duplicates {
            assert!(paths.contains(&dup.file_a.as_str()));
            assert!(paths.contains(&dup.file_b.as_str()));
        }
        for conflict in &report.conflicts {
            assert!(paths.contains(&conflict.file_a.as_str()));
            assert!(paths.contains(&conflict.file_b.as_str()));
        }
        // a/b match on both reasons
        assert_eq!(report.duplicates.len(), 2);
        assert_eq!(report.conflicts.len(), 1);
    }

    #[test]
    fn analysis_is_deterministic() {
        let records = vec![
            rule("a.mdc", &[("trigger", "x"), ("globs", "*")], "same words here"),
            rule("b.mdc", &[("trigger", "y"), ("globs", "*")], "same words here"),
            rule("c.md", &[], ""),
        ];
        assert_eq!(analyze(&records), analyze(&records));
    }
}
