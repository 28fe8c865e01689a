//! Rendering of the local analysis report: terminal text, JSON and Markdown.

use std::fmt::Write as _;

use crate::colors::Painter;
use crate::progress::format_count;
use crate::types::{AnalysisReport, DuplicateCandidate, DuplicateReason};

fn duplicate_detail(dup: &DuplicateCandidate) -> String {
    match dup.reason {
        DuplicateReason::SameDescription => format!(
            "same description \"{}\"",
            dup.description.as_deref().unwrap_or_default()
        ),
        DuplicateReason::SimilarContent => format!(
            "{:.1}% similar content",
            dup.similarity_percent.unwrap_or_default()
        ),
    }
}

/// Human-readable report for the terminal.
pub fn render_text(report: &AnalysisReport, painter: &Painter) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", painter.header("Rule analysis"));
    let _ = writeln!(
        out,
        "  Total: {} ({} .mdc, {} .md)",
        painter.number(report.total),
        painter.number(report.by_format.mdc),
        painter.number(report.by_format.md)
    );

    if !report.by_trigger.is_empty() {
        let _ = writeln!(out, "\n{}", painter.header("By trigger"));
        for (trigger, count) in &report.by_trigger {
            let _ = writeln!(out, "  {:<20} {}", trigger, painter.number(count));
        }
    }

    let _ = writeln!(
        out,
        "\n{} {}",
        painter.header("Duplicates:"),
        painter.dim(&format_count(report.duplicates.len(), "candidate", "candidates"))
    );
    for dup in &report.duplicates {
        let _ = writeln!(
            out,
            "  {} {} <-> {}  {}",
            painter.warn("~"),
            painter.path(&dup.file_a),
            painter.path(&dup.file_b),
            painter.dim(&duplicate_detail(dup))
        );
    }

    let _ = writeln!(
        out,
        "\n{} {}",
        painter.header("Conflicts:"),
        painter.dim(&format_count(report.conflicts.len(), "candidate", "candidates"))
    );
    for conflict in &report.conflicts {
        let _ = writeln!(
            out,
            "  {} {} <-> {}  globs {} ({} vs {})",
            painter.error("!"),
            painter.path(&conflict.file_a),
            painter.path(&conflict.file_b),
            conflict.glob,
            conflict.trigger_a,
            conflict.trigger_b
        );
    }

    if !report.has_findings() {
        let _ = writeln!(out, "\n{}", painter.ok("No duplicates or conflicts found."));
    }

    out
}

pub fn render_json(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Markdown version of the report, for saving next to the rules.
pub fn render_markdown(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Rule analysis\n");
    let _ = writeln!(
        out,
        "- Total rules: {}\n- `.mdc` rules: {}\n- `.md` rules: {}\n",
        report.total, report.by_format.mdc, report.by_format.md
    );

    let _ = writeln!(out, "## By trigger\n");
    if report.by_trigger.is_empty() {
        let _ = writeln!(out, "_none_\n");
    } else {
        let _ = writeln!(out, "| Trigger | Count |\n|---|---|");
        for (trigger, count) in &report.by_trigger {
            let _ = writeln!(out, "| {} | {} |", trigger, count);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "## Duplicates\n");
    if report.duplicates.is_empty() {
        let _ = writeln!(out, "_none_\n");
    } else {
        for dup in &report.duplicates {
            let _ = writeln!(
                out,
                "- `{}` and `{}`: {}",
                dup.file_a,
                dup.file_b,
                duplicate_detail(dup)
            );
        }
        out.push('\n');
    }

    let _ = writeln!(out, "## Conflicts\n");
    if report.conflicts.is_empty() {
        let _ = writeln!(out, "_none_");
    } else {
        for conflict in &report.conflicts {
            let _ = writeln!(
                out,
                "- `{}` and `{}` share globs `{}` but trigger `{}` vs `{}`",
                conflict.file_a,
                conflict.file_b,
                conflict.glob,
                conflict.trigger_a,
                conflict.trigger_b
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::analyzer::test_support::rule;

    fn sample() -> AnalysisReport {
        analyze(&[
            rule(
                "a.mdc",
                &[("description", "fmt"), ("trigger", "auto"), ("globs", "*.ts")],
                "x y z w v",
            ),
            rule(
                "b.md",
                &[("description", "fmt"), ("trigger", "manual"), ("globs", "*.ts")],
                "x y z w v u",
            ),
        ])
    }

    #[test]
    fn text_report_lists_findings() {
        let text = render_text(&sample(), &Painter::plain());
        assert!(text.contains("Total: 2 (1 .mdc, 1 .md)"));
        assert!(text.contains("Duplicates: 2 candidates"));
        assert!(text.contains("same description \"fmt\""));
        assert!(text.contains("83.3% similar content"));
        assert!(text.contains("Conflicts: 1 candidate"));
        assert!(text.contains("globs *.ts (auto vs manual)"));
        assert!(!text.contains("No duplicates"));
    }

    #[test]
    fn text_report_for_clean_input() {
        let text = render_text(&analyze(&[]), &Painter::plain());
        assert!(text.contains("Total: 0"));
        assert!(text.contains("No duplicates or conflicts found."));
    }

    #[test]
    fn json_report_shape() {
        let json = render_json(&sample()).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["total"], 2);
        assert_eq!(value["by_format"]["mdc"], 1);
        assert_eq!(value["by_trigger"][0]["trigger"], "auto");
        assert_eq!(value["by_trigger"][1]["count"], 1);
        assert_eq!(value["duplicates"][0]["reason"], "same_description");
        assert_eq!(value["duplicates"][1]["reason"], "similar_content");
        assert_eq!(value["conflicts"][0]["glob"], "*.ts");
    }

    #[test]
    fn markdown_report_sections() {
        let md = render_markdown(&sample());
        assert!(md.starts_with("# Rule analysis"));
        assert!(md.contains("| auto | 1 |"));
        assert!(md.contains("- `a.mdc` and `b.md`: same description \"fmt\""));
        assert!(md.contains("share globs `*.ts` but trigger `auto` vs `manual`"));

        let empty = render_markdown(&analyze(&[]));
        assert!(empty.contains("## Duplicates\n\n_none_"));
    }
}
